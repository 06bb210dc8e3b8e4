//! Bindings to a CodeMirror 5 editor instance.

use bytepad_core::{Position, SourceView};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::to_js_value;

#[wasm_bindgen]
extern "C" {
    /// The editor object created by `CodeMirror.fromTextArea` or `CodeMirror(...)`.
    pub type CodeMirror;

    #[wasm_bindgen(method, js_name = getValue)]
    fn get_value(this: &CodeMirror) -> String;

    #[wasm_bindgen(method, js_name = setValue)]
    fn set_value(this: &CodeMirror, value: &str);

    #[wasm_bindgen(method, js_name = addLineClass)]
    fn add_line_class(this: &CodeMirror, line: u32, place: &str, class: &str) -> JsValue;

    #[wasm_bindgen(method, js_name = removeLineClass)]
    fn remove_line_class(this: &CodeMirror, line: u32, place: &str, class: &str) -> JsValue;

    #[wasm_bindgen(method, js_name = markText)]
    fn mark_text(this: &CodeMirror, from: &JsValue, to: &JsValue, options: &JsValue) -> TextMarker;

    #[wasm_bindgen(method, js_name = scrollIntoView)]
    fn scroll_into_view(this: &CodeMirror, position: &JsValue);

    /// Handle returned by `markText`.
    pub type TextMarker;

    #[wasm_bindgen(method)]
    fn clear(this: &TextMarker);
}

/// Line classes go on the line's background layer.
const LINE_CLASS_PLACE: &str = "background";

/// CodeMirror's `{line, ch}` position object.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct CmPosition {
    line: u32,
    ch: u32,
}

impl From<Position> for CmPosition {
    fn from(position: Position) -> Self {
        Self {
            line: position.line,
            ch: position.column,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MarkOptions<'a> {
    class_name: &'a str,
}

/// A highlight placed in the editor.
pub enum EditorMark {
    /// Removed with `removeLineClass`, which needs the class back.
    Line { line: u32, class: String },
    Text(TextMarker),
}

/// [`SourceView`] over a live CodeMirror editor.
pub struct EditorView {
    editor: CodeMirror,
}

impl EditorView {
    pub fn new(editor: CodeMirror) -> Self {
        Self { editor }
    }
}

fn position_value(position: Position) -> JsValue {
    to_js_value(&CmPosition::from(position)).unwrap_or(JsValue::UNDEFINED)
}

impl SourceView for EditorView {
    type Marker = EditorMark;

    fn value(&self) -> String {
        self.editor.get_value()
    }

    fn set_value(&mut self, text: &str) {
        self.editor.set_value(text);
    }

    fn add_line_class(&mut self, line: u32, class: &str) -> EditorMark {
        self.editor.add_line_class(line, LINE_CLASS_PLACE, class);
        EditorMark::Line {
            line,
            class: class.to_string(),
        }
    }

    fn mark_range(&mut self, from: Position, to: Position, class: &str) -> EditorMark {
        let options = to_js_value(&MarkOptions { class_name: class }).unwrap_or(JsValue::UNDEFINED);
        let marker = self
            .editor
            .mark_text(&position_value(from), &position_value(to), &options);
        EditorMark::Text(marker)
    }

    fn remove_marker(&mut self, marker: EditorMark) {
        match marker {
            EditorMark::Line { line, class } => {
                self.editor.remove_line_class(line, LINE_CLASS_PLACE, &class);
            }
            EditorMark::Text(marker) => marker.clear(),
        }
    }

    fn scroll_into_view(&mut self, position: Position) {
        self.editor.scroll_into_view(&position_value(position));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_uses_codemirror_field_names() {
        let json = serde_json::to_string(&CmPosition::from(Position::new(1, 4))).unwrap();
        assert_eq!(json, r#"{"line":1,"ch":4}"#);
    }

    #[test]
    fn mark_options_are_camel_case() {
        let json = serde_json::to_string(&MarkOptions {
            class_name: "error-mark",
        })
        .unwrap();
        assert_eq!(json, r#"{"className":"error-mark"}"#);
    }
}
