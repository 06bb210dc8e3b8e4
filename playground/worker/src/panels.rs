//! Output panels backed by DOM elements.

use bytepad_core::{BytecodeLine, BytecodePanel, Notice, OutputPanels};
use js_sys::Function;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlButtonElement, HtmlElement};

pub const COMPILE_BUTTON_ID: &str = "compile-button";
pub const RESULT_OUTPUT_ID: &str = "result-output";
pub const BYTECODE_OUTPUT_ID: &str = "bytecode-output";
pub const ERROR_OUTPUT_ID: &str = "error-output";

/// Renders a listing as one `<div class="bytecode-line">` per instruction.
///
/// Token text is HTML-escaped; each token gets the class `bc-<kind>`.
pub fn render_listing_html(listing: &[BytecodeLine<'_>]) -> String {
    let mut html = String::new();
    for line in listing {
        html.push_str(r#"<div class="bytecode-line">"#);
        html.push_str(&format!(r#"<span class="bc-index">{}</span>"#, line.index));
        for token in &line.tokens {
            html.push_str(&format!(
                r#"<span class="bc-{}">{}</span>"#,
                token.kind.as_str(),
                html_escape::encode_text(token.text)
            ));
        }
        html.push_str("</div>");
    }
    html
}

/// The page's compile button, output panels and optional toast callback.
///
/// Missing elements are reported once on the console and then ignored.
pub struct DomPanels {
    button: Option<HtmlButtonElement>,
    result: Option<HtmlElement>,
    bytecode: Option<HtmlElement>,
    error: Option<HtmlElement>,
    notify: Option<Function>,
}

impl DomPanels {
    pub fn from_document(document: &Document, notify: Option<Function>) -> Self {
        Self {
            button: element(document, COMPILE_BUTTON_ID),
            result: element(document, RESULT_OUTPUT_ID),
            bytecode: element(document, BYTECODE_OUTPUT_ID),
            error: element(document, ERROR_OUTPUT_ID),
            notify,
        }
    }
}

fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    let found = document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok());
    if found.is_none() {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "bytepad: no usable element #{id}; its output is dropped"
        )));
    }
    found
}

impl OutputPanels for DomPanels {
    fn set_trigger_enabled(&mut self, enabled: bool) {
        if let Some(button) = &self.button {
            button.set_disabled(!enabled);
        }
    }

    fn show_result(&mut self, text: &str) {
        if let Some(result) = &self.result {
            result.set_text_content(Some(text));
        }
    }

    fn show_bytecode(&mut self, panel: BytecodePanel<'_>) {
        let Some(bytecode) = &self.bytecode else {
            return;
        };
        match panel {
            BytecodePanel::Placeholder(text) => bytecode.set_text_content(Some(text)),
            BytecodePanel::Listing(listing) => bytecode.set_inner_html(&render_listing_html(listing)),
        }
    }

    fn show_diagnostic(&mut self, text: &str) {
        if let Some(error) = &self.error {
            error.set_text_content(Some(text));
            error.set_hidden(false);
        }
    }

    fn clear_diagnostic(&mut self) {
        if let Some(error) = &self.error {
            error.set_text_content(None);
            error.set_hidden(true);
        }
    }

    fn notify(&mut self, notice: Notice, message: &str) {
        if let Some(notify) = &self.notify {
            let kind = JsValue::from_str(notice.as_str());
            if let Err(err) = notify.call2(&JsValue::NULL, &kind, &JsValue::from_str(message)) {
                web_sys::console::error_1(&err);
            }
        }
    }
}
