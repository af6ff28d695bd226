//! Logging infrastructure: tracing setup and structured result logging.
//!
//! - [`init_tracing`] installs the `tracing` subscriber (stderr or a
//!   daily-rolling file)
//! - [`JsonlResolutionReporter`] writes resolutions as JSONL and implements
//!   the [`ResolutionReporter`](vetting_application::ResolutionReporter) port

mod jsonl_reporter;
mod subscriber;

pub use jsonl_reporter::JsonlResolutionReporter;
pub use subscriber::{LOG_FILE_PREFIX, LoggingError, init_tracing, verbosity_filter};
