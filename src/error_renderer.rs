//! Terminal rendering of rejected programs using ariadne
//!
//! The compiler service only returns a message; the position comes from the
//! markers the session placed. Each marker becomes a label: a line highlight
//! spans the whole line, a point highlight a single character.

use ariadne::{ColorGenerator, Config, Label, Report, ReportKind, Source};
use bytepad_core::MarkerKind;
use std::io::Write;
use std::ops::Range;

/// Render a compile failure with source context to stderr
///
/// # Example
/// ```
/// use bytepad::{MarkerKind, render_failure};
///
/// let source = "int x = 1;\nint ;";
/// render_failure(
///     "<input>",
///     source,
///     "Unexpected token ';' at 2:5",
///     &[MarkerKind::Line { line: 1 }, MarkerKind::Point { line: 1, column: 4 }],
/// );
/// ```
pub fn render_failure(name: &str, source: &str, message: &str, markers: &[MarkerKind]) {
    render_failure_to_writer(name, source, message, markers, &mut std::io::stderr(), true).ok();
}

/// Render a compile failure to a specific writer
pub fn render_failure_to(
    name: &str,
    source: &str,
    message: &str,
    markers: &[MarkerKind],
    writer: &mut dyn Write,
) -> std::io::Result<()> {
    render_failure_to_writer(name, source, message, markers, writer, true)
}

/// Render a compile failure to a String
pub fn render_failure_to_string(
    name: &str,
    source: &str,
    message: &str,
    markers: &[MarkerKind],
) -> String {
    let mut buf = Vec::new();
    render_failure_to_writer(name, source, message, markers, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Same as [`render_failure_to_string`] but without ANSI color codes
pub fn render_failure_to_string_no_color(
    name: &str,
    source: &str,
    message: &str,
    markers: &[MarkerKind],
) -> String {
    let mut buf = Vec::new();
    render_failure_to_writer(name, source, message, markers, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_failure_to_writer(
    name: &str,
    source: &str,
    message: &str,
    markers: &[MarkerKind],
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    let spans: Vec<(Range<usize>, bool)> = markers
        .iter()
        .filter_map(|marker| marker_span(source, marker))
        .collect();
    let has_point = spans.iter().any(|(_, is_point)| *is_point);

    let primary = spans.first().map_or(0..0, |(span, _)| span.clone());
    let mut report = Report::build(ReportKind::Error, (name, primary))
        .with_message(message)
        .with_config(Config::default().with_color(use_color));

    for (span, is_point) in spans {
        let mut label = Label::new((name, span)).with_color(colors.next());
        // The most precise label carries the message.
        if is_point || !has_point {
            label = label.with_message(message);
        }
        report = report.with_label(label);
    }

    report.finish().write((name, Source::from(source)), &mut *writer)
}

/// Char range a marker covers in `source`, paired with whether it is a
/// point marker. Markers past the end of the source are dropped.
fn marker_span(source: &str, marker: &MarkerKind) -> Option<(Range<usize>, bool)> {
    match *marker {
        MarkerKind::Line { line } => line_span(source, line).map(|span| (span, false)),
        MarkerKind::Point { line, column } => {
            let span = line_span(source, line)?;
            let start = span.start + (column as usize).min(span.len());
            let end = (start + 1).min(source.chars().count());
            Some((start..end, true))
        }
    }
}

/// Char range of `line`, excluding its line break.
fn line_span(source: &str, line: u32) -> Option<Range<usize>> {
    let mut start = 0;
    for (index, text) in source.split('\n').enumerate() {
        let width = text.chars().count();
        if index == line as usize {
            let len = text.trim_end_matches('\r').chars().count();
            return Some(start..start + len);
        }
        start += width + 1;
    }
    None
}
