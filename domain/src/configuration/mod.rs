//! Question gating configuration.
//!
//! - [`settings`]: per-question records and the [`Configuration`](settings::Configuration) mapping
//! - [`keys`]: how records are laid out in the document property bag
//! - [`ownership`]: first-writer-wins ownership rule
//! - [`trigger`]: when the submission trigger should exist

pub mod keys;
pub mod ownership;
pub mod settings;
pub mod trigger;
