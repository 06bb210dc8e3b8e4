//! The network seam between a session and the compiler service.
//!
//! [`CompilerTransport`] is the one suspension point of a compile attempt.
//! Its futures are not required to be `Send`: in the browser they wrap
//! `fetch`, which lives on the page's single thread.

#[cfg(feature = "http")]
pub mod http;

use async_trait::async_trait;
use miette::Diagnostic;
use thiserror::Error;

use crate::protocol::{CompileRequest, CompileResponse};

/// The call to the compiler service itself failed.
///
/// A well-formed `{ "error": ... }` answer is *not* a transport error; it
/// arrives as [`CompileResponse::Failure`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum TransportError {
    #[error("could not reach the compiler service: {0}")]
    #[diagnostic(code(bytepad::transport::unreachable))]
    Unreachable(String),

    #[error("compiler service answered with HTTP status {0}")]
    #[diagnostic(code(bytepad::transport::status))]
    Status(u16),

    #[error("compiler service sent a malformed response: {0}")]
    #[diagnostic(code(bytepad::transport::malformed))]
    MalformedResponse(String),
}

/// Sends one request to the compiler service and waits for its answer.
///
/// Implementations must not retry: one call, one request.
#[async_trait(?Send)]
pub trait CompilerTransport {
    async fn compile(&self, request: &CompileRequest) -> Result<CompileResponse, TransportError>;
}

/// Decodes a response body, mapping anything unexpected to
/// [`TransportError::MalformedResponse`].
pub fn decode_response(body: &str) -> Result<CompileResponse, TransportError> {
    serde_json::from_str(body).map_err(|err| TransportError::MalformedResponse(err.to_string()))
}

pub mod mock {
    //! Mock transport for testing.
    //!
    //! Available for integration tests and external test crates.

    use super::*;
    use std::cell::RefCell;
    use std::future::Future;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    /// What the mock answers with.
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Answer with this response.
        Respond(CompileResponse),
        /// Answer with this raw body, decoded like a real HTTP answer.
        RespondJson(String),
        /// Fail the call.
        Fail(TransportError),
    }

    /// Transport that records requests and answers from a script.
    pub struct MockTransport {
        behavior: RefCell<MockBehavior>,
        requests: RefCell<Vec<CompileRequest>>,
        suspend: bool,
    }

    impl MockTransport {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: RefCell::new(behavior),
                requests: RefCell::new(Vec::new()),
                suspend: false,
            }
        }

        /// Makes every call yield to the executor once before answering, so
        /// tests can interleave other work with an in-flight request.
        pub fn suspending(mut self) -> Self {
            self.suspend = true;
            self
        }

        /// Changes the mock behavior (for multi-stage tests).
        pub fn set_behavior(&self, behavior: MockBehavior) {
            *self.behavior.borrow_mut() = behavior;
        }

        /// Requests received so far, oldest first.
        pub fn requests(&self) -> Vec<CompileRequest> {
            self.requests.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl CompilerTransport for MockTransport {
        async fn compile(
            &self,
            request: &CompileRequest,
        ) -> Result<CompileResponse, TransportError> {
            self.requests.borrow_mut().push(request.clone());
            if self.suspend {
                YieldOnce(false).await;
            }
            let behavior = self.behavior.borrow().clone();
            match behavior {
                MockBehavior::Respond(response) => Ok(response),
                MockBehavior::RespondJson(body) => decode_response(&body),
                MockBehavior::Fail(err) => Err(err),
            }
        }
    }

    /// Returns `Pending` exactly once.
    struct YieldOnce(bool);

    impl Future for YieldOnce {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_body_is_a_transport_error() {
        let err = decode_response("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, TransportError::MalformedResponse(_)));
    }

    #[test]
    fn wrong_shape_is_a_transport_error() {
        let err = decode_response(r#"{"bytecode": "Push(1)"}"#).unwrap_err();
        assert!(matches!(err, TransportError::MalformedResponse(_)));
    }

    #[test]
    fn unrelated_json_object_is_a_transport_error() {
        for body in ["{}", r#"{"detail": "Not Found"}"#] {
            let err = decode_response(body).unwrap_err();
            assert!(matches!(err, TransportError::MalformedResponse(_)), "{body}");
        }
    }

    #[test]
    fn failure_body_decodes() {
        let response = decode_response(r#"{"error": "Lexer error at 1:1: bad"}"#).unwrap();
        assert!(response.is_failure());
    }
}
