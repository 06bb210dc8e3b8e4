//! HTTP transport for the `/compile` endpoint, built on `reqwest`.
//!
//! Works natively and on `wasm32`, where reqwest sits on top of `fetch`.

use async_trait::async_trait;
use miette::Diagnostic;
use reqwest::{Client, Url};
use thiserror::Error;

use super::{CompilerTransport, TransportError, decode_response};
use crate::protocol::{CompileRequest, CompileResponse};

/// Invalid configuration for the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ConfigError {
    #[error("invalid compiler endpoint `{endpoint}`: {reason}")]
    #[diagnostic(
        code(bytepad::config::endpoint),
        help("use an absolute http(s) URL such as http://127.0.0.1:8080/compile")
    )]
    InvalidEndpoint { endpoint: String, reason: String },
}

/// Posts requests as JSON to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Creates a transport for `endpoint`, which must be an absolute
    /// `http` or `https` URL.
    pub fn new(endpoint: &str) -> Result<Self, ConfigError> {
        Self::with_client(Client::new(), endpoint)
    }

    /// Like [`HttpTransport::new`] but with a preconfigured client.
    pub fn with_client(client: Client, endpoint: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason,
        };
        let url = Url::parse(endpoint).map_err(|err| invalid(err.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(Self {
                client,
                endpoint: url,
            }),
            other => Err(invalid(format!("unsupported scheme `{other}`"))),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl CompilerTransport for HttpTransport {
    async fn compile(&self, request: &CompileRequest) -> Result<CompileResponse, TransportError> {
        tracing::debug!(endpoint = %self.endpoint, "posting compile request");
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|err| TransportError::Unreachable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|err| TransportError::MalformedResponse(err.to_string()))?;
        decode_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_endpoints() {
        let transport = HttpTransport::new("http://127.0.0.1:8080/compile").unwrap();
        assert_eq!(transport.endpoint().path(), "/compile");
    }

    #[test]
    fn rejects_relative_endpoint() {
        let err = HttpTransport::new("/compile").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
    }

    #[test]
    fn rejects_other_schemes() {
        let err = HttpTransport::new("ftp://example.com/compile").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid compiler endpoint `ftp://example.com/compile`: unsupported scheme `ftp`"
        );
    }
}
