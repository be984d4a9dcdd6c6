//! Contact form and submission delivery.
//!
//! - [`form`]: Field editing, validation, and submission status
//! - [`transport`]: Posting the payload to the form relay

pub mod form;
pub mod transport;

pub use form::{ContactFields, ContactForm, ContactSnapshot, Field, SubmissionStatus, SubmitOutcome};
#[cfg(feature = "web")]
pub use transport::FetchTransport;
pub use transport::{send_submission, ContactTransport, Delivery, DEFAULT_ENDPOINT};
