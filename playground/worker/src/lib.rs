mod editor;
mod panels;

use std::rc::Rc;

use bytepad_core::{
    CompileOutput, CompileSession, DiagnosticLocation, HttpTransport, SessionError,
    SessionOptions, locate, tokenize, tokenize_listing,
};
use js_sys::{Function, JSON, Promise, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

pub use editor::{CodeMirror, EditorView, TextMarker};
pub use panels::{DomPanels, render_listing_html};

type Session = CompileSession<HttpTransport, EditorView, DomPanels>;

/// A compile session bound to a CodeMirror editor and the page's panels.
///
/// `options` may be `undefined` or an object with any of:
///
/// - `endpoint`: compiler URL, default `<origin>/compile`
/// - `language`: language tag, default `"custom"`
/// - `notify`: `(kind, message) => void`, called with `"success"` or `"error"`
#[wasm_bindgen]
pub struct PlaygroundSession {
    session: Rc<Session>,
}

#[wasm_bindgen]
impl PlaygroundSession {
    #[wasm_bindgen(constructor)]
    pub fn new(editor: CodeMirror, options: JsValue) -> Result<PlaygroundSession, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let endpoint = match string_option(&options, "endpoint") {
            Some(endpoint) => endpoint,
            None => format!("{}/compile", window.location().origin()?),
        };
        let transport =
            HttpTransport::new(&endpoint).map_err(|err| JsValue::from_str(&err.to_string()))?;

        let mut session_options = SessionOptions::default();
        if let Some(language) = string_option(&options, "language") {
            session_options.language = language;
        }
        let notify = option(&options, "notify").and_then(|value| value.dyn_into::<Function>().ok());

        let session = CompileSession::new(
            transport,
            EditorView::new(editor),
            DomPanels::from_document(&document, notify),
            session_options,
        );
        Ok(PlaygroundSession {
            session: Rc::new(session),
        })
    }

    /// Compile whatever the editor holds.
    ///
    /// The page is updated before the returned promise settles. The promise
    /// resolves to `{status: "ok", data}` or `{status: "err", error}`.
    #[wasm_bindgen]
    pub fn compile(&self) -> Promise {
        let session = Rc::clone(&self.session);
        future_to_promise(async move {
            let response = match session.compile_view().await {
                Ok(output) => WorkerResponse::ok(CompileSuccess::from(output)),
                Err(err) => WorkerResponse::err(err),
            };
            to_js_value(&response)
        })
    }

    /// Current session state: `idle`, `compiling`, `succeeded` or `failed`.
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.session.state().as_str().to_string()
    }
}

/// Splits one bytecode instruction into `{kind, text}` tokens.
#[wasm_bindgen]
pub fn tokenize_line(line: &str) -> Result<JsValue, JsValue> {
    to_js_value(&tokenize(line))
}

/// Extracts a 0-based `{line, column}` from a compiler error, or `null`.
#[wasm_bindgen]
pub fn locate_error(message: &str) -> Result<JsValue, JsValue> {
    to_js_value(&locate(message))
}

/// Renders a raw bytecode listing the way the bytecode panel shows it.
#[wasm_bindgen]
pub fn bytecode_html(lines: Vec<String>) -> String {
    render_listing_html(&tokenize_listing(&lines))
}

fn option(options: &JsValue, key: &str) -> Option<JsValue> {
    if !options.is_object() {
        return None;
    }
    Reflect::get(options, &JsValue::from_str(key))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

fn string_option(options: &JsValue, key: &str) -> Option<String> {
    option(options, key).and_then(|value| value.as_string())
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkerResponse<T> {
    Ok { data: T },
    Err { error: WorkerError },
}

impl<T> WorkerResponse<T> {
    fn ok(data: T) -> Self {
        WorkerResponse::Ok { data }
    }

    fn err(error: SessionError) -> Self {
        WorkerResponse::Err {
            error: WorkerError::from(error),
        }
    }
}

#[derive(Serialize)]
pub struct WorkerError {
    kind: &'static str,
    message: String,
    location: Option<DiagnosticLocation>,
}

#[derive(Serialize)]
pub struct CompileSuccess {
    result: Option<String>,
    bytecode: Vec<String>,
}

impl From<CompileOutput> for CompileSuccess {
    fn from(output: CompileOutput) -> Self {
        Self {
            result: output.result,
            bytecode: output.bytecode,
        }
    }
}

impl From<SessionError> for WorkerError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::EmptyInput => WorkerError {
                kind: "empty_input",
                message: err.to_string(),
                location: None,
            },
            SessionError::Busy => WorkerError {
                kind: "busy",
                message: err.to_string(),
                location: None,
            },
            SessionError::Transport { source, .. } => WorkerError {
                kind: "transport",
                message: source.to_string(),
                location: None,
            },
            SessionError::Compile { message, location } => WorkerError {
                kind: "compile",
                message,
                location,
            },
        }
    }
}

fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serialized = serde_json::to_string(value)
        .map_err(|err| JsValue::from_str(&format!("serialization error: {}", err)))?;
    JSON::parse(&serialized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytepad_core::TransportError;
    use serde_json::json;

    #[test]
    fn success_payload_is_tagged() {
        let response = WorkerResponse::ok(CompileSuccess::from(CompileOutput {
            result: Some("40".to_string()),
            bytecode: vec!["Push(40)".to_string()],
        }));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"status": "ok", "data": {"result": "40", "bytecode": ["Push(40)"]}})
        );
    }

    #[test]
    fn compile_error_carries_location() {
        let response = WorkerResponse::<CompileSuccess>::err(SessionError::Compile {
            message: "Parser error at 2:5".to_string(),
            location: locate("Parser error at 2:5"),
        });
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "status": "err",
                "error": {
                    "kind": "compile",
                    "message": "Parser error at 2:5",
                    "location": {"line": 1, "column": 4}
                }
            })
        );
    }

    #[test]
    fn transport_error_uses_inner_message() {
        let error = WorkerError::from(SessionError::Transport {
            source: TransportError::Status(503),
            hint: String::new(),
        });
        assert_eq!(error.kind, "transport");
        assert_eq!(error.message, TransportError::Status(503).to_string());
        assert!(error.location.is_none());
    }

    #[test]
    fn empty_input_message() {
        let error = WorkerError::from(SessionError::EmptyInput);
        assert_eq!(error.kind, "empty_input");
        assert_eq!(error.message, "Please enter some code to compile");
    }

    #[test]
    fn bytecode_html_renders_every_line() {
        let html = bytecode_html(vec!["Push(1)".to_string(), "Pop".to_string()]);
        assert_eq!(html.matches("bytecode-line").count(), 2);
    }
}
