//! Delivery of contact submissions to the form relay.
//!
//! The relay is a third-party endpoint that accepts a JSON body. The crate
//! only depends on [`ContactTransport`]; the browser build plugs in a
//! `fetch`-backed implementation.

use super::form::ContactFields;
use crate::domain::{PortfolioError, Result};
use futures_util::future::LocalBoxFuture;

/// Relay that receives submissions unless the host configures another one.
pub const DEFAULT_ENDPOINT: &str = "https://formspree.io/f/manwkpkn";

/// Posts a JSON body and reports the HTTP status.
///
/// Implementations return [`PortfolioError::Network`] when no response was
/// received at all.
pub trait ContactTransport {
    fn post_json<'a>(&'a self, endpoint: &'a str, body: String) -> LocalBoxFuture<'a, Result<u16>>;
}

/// Serializes `fields`, posts them once, and classifies the answer.
///
/// # Errors
///
/// - [`PortfolioError::HttpStatus`] for any non-2xx response
/// - [`PortfolioError::Network`] when the request could not be made
/// - [`PortfolioError::Serialization`] if the payload cannot be encoded
pub async fn send_submission<T>(transport: &T, endpoint: &str, fields: &ContactFields) -> Result<()>
where
    T: ContactTransport + ?Sized,
{
    let body = serde_json::to_string(fields)?;
    tracing::debug!(endpoint, bytes = body.len(), "posting contact submission");

    let status = transport
        .post_json(endpoint, body)
        .await
        .map_err(|err| match err {
            PortfolioError::Network(_) => err,
            other => PortfolioError::Network(other.to_string()),
        })?;

    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(PortfolioError::HttpStatus(status))
    }
}

/// Outcome of a submission as reported back to the state machines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The relay answered 2xx.
    Delivered,
    /// The relay answered with this non-2xx status.
    Rejected(u16),
    /// No response was received.
    Unreachable(String),
}

impl Delivery {
    #[must_use]
    pub fn from_result(result: &Result<()>) -> Self {
        match result {
            Ok(()) => Self::Delivered,
            Err(PortfolioError::HttpStatus(status)) => Self::Rejected(*status),
            Err(other) => Self::Unreachable(other.to_string()),
        }
    }

    /// Converts back into the crate's error type.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::HttpStatus`] or [`PortfolioError::Network`]
    /// for anything but [`Delivery::Delivered`].
    pub fn into_result(self) -> Result<()> {
        match self {
            Self::Delivered => Ok(()),
            Self::Rejected(status) => Err(PortfolioError::HttpStatus(status)),
            Self::Unreachable(reason) => Err(PortfolioError::Network(reason)),
        }
    }
}

/// `fetch`-backed transport for the browser build.
#[cfg(feature = "web")]
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

#[cfg(feature = "web")]
impl ContactTransport for FetchTransport {
    fn post_json<'a>(&'a self, endpoint: &'a str, body: String) -> LocalBoxFuture<'a, Result<u16>> {
        use futures_util::FutureExt;
        use gloo_net::http::Request;

        async move {
            let request = Request::post(endpoint)
                .header("Content-Type", "application/json")
                .body(body)
                .map_err(|e| PortfolioError::Network(e.to_string()))?;
            let response = request
                .send()
                .await
                .map_err(|e| PortfolioError::Network(e.to_string()))?;
            Ok(response.status())
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;
    use std::cell::RefCell;

    struct MockTransport {
        reply: std::result::Result<u16, String>,
        sent: RefCell<Vec<(String, String)>>,
    }

    impl MockTransport {
        fn replying(reply: std::result::Result<u16, String>) -> Self {
            Self {
                reply,
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl ContactTransport for MockTransport {
        fn post_json<'a>(&'a self, endpoint: &'a str, body: String) -> LocalBoxFuture<'a, Result<u16>> {
            self.sent.borrow_mut().push((endpoint.to_string(), body));
            let reply = self.reply.clone().map_err(PortfolioError::Network);
            async move { reply }.boxed_local()
        }
    }

    fn fields() -> ContactFields {
        ContactFields {
            name: "Ada".into(),
            email: "ada@example.org".into(),
            subject: "Hi".into(),
            message: "Hello there".into(),
        }
    }

    fn send(transport: &MockTransport) -> Result<()> {
        send_submission(transport, DEFAULT_ENDPOINT, &fields())
            .now_or_never()
            .expect("mock transport resolves immediately")
    }

    #[test]
    fn two_hundred_range_is_success() {
        let transport = MockTransport::replying(Ok(201));
        assert!(send(&transport).is_ok());

        let sent = transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, DEFAULT_ENDPOINT);
        let body: serde_json::Value = serde_json::from_str(&sent[0].1).unwrap();
        assert_eq!(body["email"], "ada@example.org");
        assert_eq!(body["message"], "Hello there");
    }

    #[test]
    fn non_success_status_is_an_http_error() {
        let transport = MockTransport::replying(Ok(422));
        assert!(matches!(send(&transport), Err(PortfolioError::HttpStatus(422))));
    }

    #[test]
    fn transport_failure_is_a_network_error() {
        let transport = MockTransport::replying(Err("connection reset".into()));
        let err = send(&transport).unwrap_err();
        assert!(matches!(err, PortfolioError::Network(ref msg) if msg == "connection reset"));
    }

    #[test]
    fn delivery_keeps_the_rejection_status() {
        let delivery = Delivery::from_result(&Err(PortfolioError::HttpStatus(503)));
        assert_eq!(delivery, Delivery::Rejected(503));
        assert!(matches!(delivery.into_result(), Err(PortfolioError::HttpStatus(503))));
        assert_eq!(Delivery::from_result(&Ok(())), Delivery::Delivered);
    }
}
