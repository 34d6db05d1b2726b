//! Choice pools and the depletion policy applied to them.

pub mod choice_pool;
