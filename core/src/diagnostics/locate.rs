use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::markers::Position;

/// 0-based position extracted from an error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DiagnosticLocation {
    pub line: u32,
    /// Absent when the message carried a line but no usable column.
    pub column: Option<u32>,
}

impl DiagnosticLocation {
    /// Where the editor should scroll to: the column if known, else the
    /// start of the line.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column.unwrap_or(0))
    }

    /// Moves a location reported against trimmed text back into the
    /// untrimmed text whose trimmed content starts at `origin`.
    pub fn shifted(self, origin: Position) -> Self {
        let column = if self.line == 0 {
            self.column.map(|column| column.saturating_add(origin.column))
        } else {
            self.column
        };
        Self {
            line: self.line.saturating_add(origin.line),
            column,
        }
    }
}

/// Where the trimmed content of `text` starts, counting columns in chars.
///
/// The compiler service only ever sees trimmed source, so its positions are
/// relative to this origin.
pub fn trim_origin(text: &str) -> Position {
    let leading = &text[..text.len() - text.trim_start().len()];
    let line = leading.matches('\n').count();
    let column = leading
        .rsplit('\n')
        .next()
        .map_or(0, |tail| tail.chars().count());
    Position::new(
        u32::try_from(line).unwrap_or(u32::MAX),
        u32::try_from(column).unwrap_or(u32::MAX),
    )
}

/// `at <line>:<column>`; the column digits are optional so a line-only
/// position still matches.
static LOCATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bat (\d+):(\d+)?").expect("valid location pattern"));

/// Finds the first `at <line>:<column>` in `message`.
///
/// Positions in messages are 1-based; the result is 0-based. A missing column,
/// or one too large for `u32`, is dropped while the line is kept. A line
/// number too large for `u32` counts as no match.
pub fn locate(message: &str) -> Option<DiagnosticLocation> {
    let captures = LOCATION.captures(message)?;
    let line: u32 = captures.get(1)?.as_str().parse().ok()?;
    let column = captures
        .get(2)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .map(|column| column.saturating_sub(1));

    Some(DiagnosticLocation {
        line: line.saturating_sub(1),
        column,
    })
}
