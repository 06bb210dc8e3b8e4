use miette::Diagnostic;
use thiserror::Error;

use crate::diagnostics::DiagnosticLocation;
use crate::transport::TransportError;

/// Why a compile attempt did not produce output.
///
/// By the time one of these is returned the session has already shown it
/// to the user; callers only need it to branch (exit codes, tests).
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SessionError {
    /// Nothing but whitespace was submitted. No request was sent.
    #[error("Please enter some code to compile")]
    #[diagnostic(code(bytepad::empty_input))]
    EmptyInput,

    /// Another attempt is still in flight; this call was ignored.
    #[error("a compile attempt is already in progress")]
    #[diagnostic(code(bytepad::busy))]
    Busy,

    /// The request never got a usable answer.
    #[error("compile request failed")]
    #[diagnostic(code(bytepad::transport))]
    Transport {
        #[source]
        source: TransportError,
        /// The session's configured remediation hint.
        #[help]
        hint: String,
    },

    /// The compiler service rejected the program.
    #[error("{message}")]
    #[diagnostic(code(bytepad::compile))]
    Compile {
        message: String,
        /// Position recovered from `message`, if it carried one.
        location: Option<DiagnosticLocation>,
    },
}
