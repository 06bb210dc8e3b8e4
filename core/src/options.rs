//! Configuration options for a compile session.

use crate::markers::MarkerClasses;
use crate::protocol::DEFAULT_LANGUAGE;

/// Fixed texts shown in the result and bytecode panels.
///
/// # Example
///
/// ```
/// use bytepad_core::options::Placeholders;
///
/// let placeholders = Placeholders::default();
/// assert_eq!(placeholders.no_output, "No output");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    /// Shown in both panels while a request is in flight.
    pub compiling: String,

    /// Result panel text when the service sent no result.
    pub no_output: String,

    /// Bytecode panel text when the listing is empty.
    pub no_bytecode: String,

    /// Shown in both panels after any kind of failure.
    pub failed: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            compiling: "Compiling...".to_string(),
            no_output: "No output".to_string(),
            no_bytecode: "No bytecode generated".to_string(),
            failed: "Compilation failed".to_string(),
        }
    }
}

/// Configuration options for a [`CompileSession`](crate::session::CompileSession).
///
/// # Example
///
/// ```
/// use bytepad_core::SessionOptions;
///
/// let options = SessionOptions {
///     language: "custom".to_string(),
///     ..SessionOptions::default()
/// };
/// assert_eq!(options.marker_classes.line, "error-line");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Language tag sent with every request.
    ///
    /// Default: `"custom"`
    pub language: String,

    pub placeholders: Placeholders,

    /// Appended to transport errors in the diagnostic panel.
    pub remediation_hint: String,

    /// Classes used for line and point highlights.
    pub marker_classes: MarkerClasses,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            placeholders: Placeholders::default(),
            remediation_hint: "Make sure the compiler service is running and reachable; \
                               static or serverless deployments cannot compile."
                .to_string(),
            marker_classes: MarkerClasses::default(),
        }
    }
}
