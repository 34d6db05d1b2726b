//! Outbound notification adapters.

mod outbox;

pub use outbox::JsonlOutbox;
