//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`DepletionParams`]: placeholder text and versioned write retries
//! - [`ReauthorizationParams`]: notice rate-limit window

pub mod depletion_params;
pub mod reauthorization_params;

pub use depletion_params::DepletionParams;
pub use reauthorization_params::ReauthorizationParams;
