//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod form_gateway;
pub mod host;
pub mod notification;
pub mod property_store;
pub mod submission_logger;
pub mod trigger;
