//! Bytepad - a control surface for a remote bytecode compiler
//!
//! # Overview
//!
//! Bytepad sends source text to a compiler service (`POST /compile`) and
//! turns the reply into something a front end can show: the program's
//! result, a bytecode listing split into styled tokens, or the compiler's
//! error with the offending line and column highlighted.
//!
//! The state machine lives in [`CompileSession`]. Front ends plug in three
//! collaborators:
//!
//! - a [`CompilerTransport`] ([`HttpTransport`] with the default `http`
//!   feature),
//! - a [`SourceView`], the editor that holds the text and receives markers,
//! - [`OutputPanels`], where results, listings and diagnostics go.
//!
//! # Quick Start
//!
//! ```ignore
//! use bytepad::{CompileSession, HttpTransport, SessionOptions};
//!
//! let transport = HttpTransport::new("http://127.0.0.1:8080/compile")?;
//! let session = CompileSession::new(transport, my_view, my_panels, SessionOptions::default());
//!
//! match session.run_compile("int x = 15;\nx;").await {
//!     Ok(output) => println!("{:?}", output.result),
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```
//!
//! # Terminal rendering
//!
//! [`render_failure`] and friends draw a rejected program with `ariadne`,
//! using the markers the session left behind as labels.

mod error_renderer;

pub use error_renderer::{
    render_failure, render_failure_to, render_failure_to_string, render_failure_to_string_no_color,
};

// Re-export public API from bytepad_core
pub use bytepad_core::{
    BytecodeLine, BytecodePanel, BytecodeToken, CompileOutput, CompileRequest, CompileResponse,
    CompileSession, CompilerTransport, DEFAULT_LANGUAGE, DiagnosticLocation, MarkerClasses,
    MarkerKind, MarkerRegistry, Notice, OutputPanels, Placeholders, Position, SessionError,
    SessionOptions, SessionState, SourceView, TokenKind, TransportError, decode_response, locate,
    tokenize, tokenize_listing, trim_origin,
};

#[cfg(feature = "http")]
pub use bytepad_core::{ConfigError, HttpTransport};

// Collaborator mocks for tests in downstream crates
pub use bytepad_core::{markers, session, transport};
