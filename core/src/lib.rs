//! Core of the Bytepad control surface.
//!
//! Bytepad drives an external compiler service through a single
//! `POST /compile` call and turns what comes back into something a front end
//! can render: a result value, a classified bytecode listing, or an error
//! message with an optional source position.
//!
//! The pieces, leaves first:
//!
//! - [`bytecode`]: splits raw instruction strings into styled tokens.
//! - [`diagnostics`]: pulls a `line:column` position out of an error message.
//! - [`markers`]: owns the highlights a failed attempt leaves in the editor.
//! - [`session`]: the controller running one attempt end to end.
//! - [`transport`]: the network seam, with an HTTP implementation behind the
//!   `http` feature.
//! - [`protocol`]: the JSON request/response contract.

pub mod bytecode;
pub mod diagnostics;
pub mod markers;
pub mod options;
pub mod protocol;
pub mod session;
pub mod transport;

pub use bytecode::{BytecodeLine, BytecodeToken, TokenKind, tokenize, tokenize_listing};
pub use diagnostics::{DiagnosticLocation, locate, trim_origin};
pub use markers::{MarkerClasses, MarkerKind, MarkerRegistry, Position, SourceView};
pub use options::{Placeholders, SessionOptions};
pub use protocol::{CompileRequest, CompileResponse, DEFAULT_LANGUAGE};
pub use session::{
    BytecodePanel, CompileOutput, CompileSession, Notice, OutputPanels, SessionError,
    SessionState,
};
pub use transport::{CompilerTransport, TransportError, decode_response};

#[cfg(feature = "http")]
pub use transport::http::{ConfigError, HttpTransport};

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub mod test_utils {
    /// Initialize tracing subscriber for tests with DEBUG level
    /// Call this at the start of tests where you want to see logging output
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
