//! Terminal implementations of the session's editor and output panels.

use std::collections::BTreeMap;
use std::io::Write;

use bytepad_core::{BytecodePanel, MarkerKind, Notice, OutputPanels, Position, SourceView};
use nu_ansi_term::{Color, Style};

use crate::highlighter::paint_listing;

/// In-memory stand-in for an editor.
///
/// Highlights are kept as [`MarkerKind`]s so that a failure can be drawn by
/// the ariadne renderer once the attempt is over.
#[derive(Debug, Default)]
pub struct TerminalSource {
    name: String,
    text: String,
    next_handle: u64,
    marks: BTreeMap<u64, MarkerKind>,
}

impl TerminalSource {
    #[cfg(test)]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Label used for the source in rendered reports.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces both the text and its label.
    pub fn load(&mut self, name: impl Into<String>, text: &str) {
        self.name = name.into();
        self.set_value(text);
    }

    /// Highlights currently placed, oldest first.
    pub fn marks(&self) -> Vec<MarkerKind> {
        self.marks.values().copied().collect()
    }

    fn insert(&mut self, mark: MarkerKind) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.marks.insert(handle, mark);
        handle
    }
}

impl SourceView for TerminalSource {
    type Marker = u64;

    fn value(&self) -> String {
        self.text.clone()
    }

    fn set_value(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn add_line_class(&mut self, line: u32, _class: &str) -> u64 {
        self.insert(MarkerKind::Line { line })
    }

    fn mark_range(&mut self, from: Position, _to: Position, _class: &str) -> u64 {
        self.insert(MarkerKind::Point {
            line: from.line,
            column: from.column,
        })
    }

    fn remove_marker(&mut self, marker: u64) {
        self.marks.remove(&marker);
    }

    fn scroll_into_view(&mut self, position: Position) {
        tracing::trace!(line = position.line, column = position.column, "focus");
    }
}

#[derive(Debug)]
enum Bytecode {
    Placeholder(String),
    Lines(Vec<String>),
}

/// Collects panel updates and prints the outcome of a successful attempt.
///
/// Intermediate states ("Compiling...") are not printed. Failures are left
/// to the caller, which has the source text needed to draw them.
pub struct TerminalPanels<W> {
    out: W,
    color: bool,
    result: String,
    bytecode: Bytecode,
}

impl<W: Write> TerminalPanels<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            result: String::new(),
            bytecode: Bytecode::Placeholder(String::new()),
        }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            Style::new().bold().paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn print_success(&mut self) -> std::io::Result<()> {
        let result = self.heading("Result:");
        writeln!(self.out, "{result} {}", self.result)?;

        let bytecode = self.heading("Bytecode:");
        match &self.bytecode {
            Bytecode::Placeholder(text) => {
                let text = if self.color {
                    Color::DarkGray.paint(text.as_str()).to_string()
                } else {
                    text.clone()
                };
                writeln!(self.out, "{bytecode} {text}")?;
            }
            Bytecode::Lines(lines) => {
                writeln!(self.out, "{bytecode}")?;
                for line in lines {
                    writeln!(self.out, "  {line}")?;
                }
            }
        }
        self.out.flush()
    }
}

impl<W: Write> OutputPanels for TerminalPanels<W> {
    // A single attempt runs at a time; there is no button to lock.
    fn set_trigger_enabled(&mut self, _enabled: bool) {}

    fn show_result(&mut self, text: &str) {
        self.result = text.to_string();
    }

    fn show_bytecode(&mut self, panel: BytecodePanel<'_>) {
        self.bytecode = match panel {
            BytecodePanel::Placeholder(text) => Bytecode::Placeholder(text.to_string()),
            BytecodePanel::Listing(listing) => Bytecode::Lines(paint_listing(listing, self.color)),
        };
    }

    // Failures are reported from the returned error, with the source at hand.
    fn show_diagnostic(&mut self, _text: &str) {}

    fn clear_diagnostic(&mut self) {}

    fn notify(&mut self, notice: Notice, message: &str) {
        tracing::debug!(notice = notice.as_str(), message, "notification");
        if notice == Notice::Success {
            if let Err(err) = self.print_success() {
                tracing::warn!(%err, "failed to write compile output");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytepad_core::transport::mock::{MockBehavior, MockTransport};
    use bytepad_core::{CompileResponse, CompileSession, SessionOptions};
    use pretty_assertions::assert_eq;

    type Session = CompileSession<MockTransport, TerminalSource, TerminalPanels<Vec<u8>>>;

    fn session(response: CompileResponse) -> Session {
        CompileSession::new(
            MockTransport::new(MockBehavior::Respond(response)),
            TerminalSource::new("<test>"),
            TerminalPanels::new(Vec::new(), false),
            SessionOptions::default(),
        )
    }

    fn printed(session: &Session) -> String {
        String::from_utf8_lossy(session.panels().output()).to_string()
    }

    #[tokio::test]
    async fn test_success_prints_result_and_listing() {
        let session = session(CompileResponse::Success {
            result: Some("40".to_string()),
            bytecode: vec!["Push(40)".to_string(), "Pop".to_string()],
        });
        session.view_mut().load("<test>", "40;");

        session.compile_view().await.unwrap();

        assert_eq!(
            printed(&session),
            "Result: 40\nBytecode:\n  0  Push(40)\n  1  Pop\n"
        );
    }

    #[tokio::test]
    async fn test_success_without_bytecode_prints_placeholder() {
        let session = session(CompileResponse::Success {
            result: None,
            bytecode: vec![],
        });

        session.run_compile("int x;").await.unwrap();

        assert_eq!(
            printed(&session),
            "Result: No output\nBytecode: No bytecode generated\n"
        );
    }

    #[tokio::test]
    async fn test_failure_leaves_marks_and_prints_nothing() {
        let session = session(CompileResponse::Failure {
            error: "Parser error at 2:5: Expected ';'".to_string(),
        });
        session.view_mut().load("<test>", "int x = 1;\nint ;");

        let err = session.compile_view().await.unwrap_err();

        assert_eq!(err.to_string(), "Parser error at 2:5: Expected ';'");
        assert_eq!(
            session.view().marks(),
            vec![
                MarkerKind::Line { line: 1 },
                MarkerKind::Point { line: 1, column: 4 },
            ]
        );
        assert_eq!(printed(&session), "");
    }

    #[test]
    fn test_removed_marks_are_forgotten() {
        let mut source = TerminalSource::new("<test>");
        let line = source.add_line_class(3, "error-line");
        source.mark_range(Position::new(3, 1), Position::new(3, 2), "error-mark");

        source.remove_marker(line);

        assert_eq!(source.marks(), vec![MarkerKind::Point { line: 3, column: 1 }]);
    }
}
