//! JSON contract of the `/compile` endpoint.
//!
//! Requests are `{ "source": ..., "language": ... }`. Responses come in two
//! shapes, `{ "result": ..., "bytecode": [...] }` and `{ "error": ... }`, but
//! the service is free to send every key at once (`"error": null` on success,
//! `"result": ""` on failure). [`CompileResponse`] normalises all of that into
//! a proper sum type: a non-empty `error` always wins. A body with neither a
//! non-empty `error` nor a `bytecode` key is not a compile response at all
//! and fails to decode.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Language tag sent with every request unless configured otherwise.
pub const DEFAULT_LANGUAGE: &str = "custom";

/// Body of a single `POST /compile` call.
///
/// Built fresh for every attempt and never modified afterwards, hence the
/// private fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileRequest {
    source: String,
    language: String,
}

impl CompileRequest {
    /// Builds a request from raw editor text.
    ///
    /// The source is trimmed. Returns `None` when nothing but whitespace is
    /// left, since there is nothing to send.
    pub fn new(source: &str, language: impl Into<String>) -> Option<Self> {
        let source = source.trim();
        if source.is_empty() {
            return None;
        }
        Some(Self {
            source: source.to_string(),
            language: language.into(),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

/// What the compiler service answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireResponse", into = "WireResponse")]
pub enum CompileResponse {
    /// The program compiled (and ran).
    Success {
        /// Rendered value of the program, `None` when the service sent nothing.
        result: Option<String>,
        /// One human-readable instruction per entry, in execution order.
        bytecode: Vec<String>,
    },
    /// The service rejected the program.
    Failure { error: String },
}

impl CompileResponse {
    pub fn is_failure(&self) -> bool {
        matches!(self, CompileResponse::Failure { .. })
    }
}

/// The response exactly as it travels over the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WireResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    /// Outer `None`: key missing. Inner `None`: explicit `null`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    bytecode: Option<Option<Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl TryFrom<WireResponse> for CompileResponse {
    type Error = &'static str;

    fn try_from(wire: WireResponse) -> Result<Self, Self::Error> {
        match (wire.error, wire.bytecode) {
            (Some(error), _) if !error.is_empty() => Ok(CompileResponse::Failure { error }),
            (_, Some(bytecode)) => Ok(CompileResponse::Success {
                result: wire.result.and_then(render_result),
                bytecode: bytecode.unwrap_or_default(),
            }),
            (_, None) => Err("response has neither an `error` nor a `bytecode` field"),
        }
    }
}

impl From<CompileResponse> for WireResponse {
    fn from(response: CompileResponse) -> Self {
        match response {
            CompileResponse::Success { result, bytecode } => WireResponse {
                result: result.map(Value::String),
                bytecode: Some(Some(bytecode)),
                error: None,
            },
            CompileResponse::Failure { error } => WireResponse {
                error: Some(error),
                ..Default::default()
            },
        }
    }
}

/// `null` and `""` both mean "no output"; strings are shown without quotes,
/// everything else as its JSON text.
fn render_result(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}
