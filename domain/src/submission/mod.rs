//! Submission handling states and per-response outcomes.

pub mod entities;
