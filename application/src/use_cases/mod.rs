//! Use cases (application services)

pub mod configuration_store;
pub mod handle_submission;
pub mod list_questions;
pub mod notify_reauthorization;
pub mod update_configuration;

#[cfg(test)]
pub(crate) mod test_support;
