//! Structured logging for the page core.
//!
//! Every state machine logs through `tracing`: a debug span per handled event,
//! with structured fields on transitions. This module installs the subscriber
//! that turns those into text.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → stdout (native) / console.log (web)
//! ```
//!
//! # Configuration
//!
//! The level comes from `Config::trace_level` and accepts any `EnvFilter`
//! directive (`debug`, `portfolio::carousel=trace,info`, ...). Default: `"info"`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - `console_writer`: Browser console sink (web builds only)

#[cfg(feature = "web")]
mod console_writer;
mod init;

pub use init::init_tracing;
