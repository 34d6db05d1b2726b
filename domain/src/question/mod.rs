//! Questions on the live form and the answers submitted to them.

pub mod answer;
pub mod entities;
