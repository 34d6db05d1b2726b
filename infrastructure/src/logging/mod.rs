//! Logging infrastructure: structured submission logging.
//!
//! Provides [`JsonlSubmissionLogger`], a JSONL file writer that implements
//! the [`SubmissionLogger`](slotguard_application::SubmissionLogger) port.

mod jsonl_logger;
pub(crate) mod jsonl_writer;

pub use jsonl_logger::JsonlSubmissionLogger;
