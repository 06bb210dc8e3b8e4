use bytepad_core::{BytecodeLine, TokenKind};
use logos::Logos;
use nu_ansi_term::{Color, Style};
use reedline::StyledText;

use crate::lexer::{KEYWORDS, Token};

#[derive(Debug)]
struct PaletteItem {
    kind: TokenKind,
    fg: Color,
    bold: bool,
}

const PALETTE: &[PaletteItem] = &[
    PaletteItem { kind: TokenKind::Operator, fg: Color::Magenta, bold: true },
    PaletteItem { kind: TokenKind::NumericLiteral, fg: Color::Cyan, bold: false },
    PaletteItem { kind: TokenKind::JumpTarget, fg: Color::Yellow, bold: true },
    PaletteItem { kind: TokenKind::JumpOffset, fg: Color::Yellow, bold: false },
    PaletteItem { kind: TokenKind::VariableOp, fg: Color::Blue, bold: true },
    PaletteItem { kind: TokenKind::VariableName, fg: Color::Green, bold: false },
    PaletteItem { kind: TokenKind::PlainText, fg: Color::White, bold: false },
];

fn style_for(kind: TokenKind) -> Style {
    PALETTE
        .iter()
        .find(|item| item.kind == kind)
        .map_or_else(Style::new, |item| {
            let style = Style::new().fg(item.fg);
            if item.bold { style.bold() } else { style }
        })
}

/// One display line per instruction, prefixed with its right-aligned index.
pub fn paint_listing(listing: &[BytecodeLine<'_>], color: bool) -> Vec<String> {
    let width = listing.len().saturating_sub(1).to_string().len();
    let gutter = Style::new().fg(Color::DarkGray);

    listing
        .iter()
        .map(|line| {
            let index = format!("{:>width$}", line.index);
            let mut out = if color {
                gutter.paint(index).to_string()
            } else {
                index
            };
            out.push_str("  ");
            for token in &line.tokens {
                if color {
                    out.push_str(&style_for(token.kind).paint(token.text).to_string());
                } else {
                    out.push_str(token.text);
                }
            }
            out
        })
        .collect()
}

/// Colors REPL input using the bracket lexer's tokens.
pub struct SourceHighlighter;

impl SourceHighlighter {
    fn style(token: Token, text: &str) -> Style {
        match token {
            Token::Word if KEYWORDS.contains(&text) => Style::new().fg(Color::Magenta),
            Token::Word => Style::new().fg(Color::Red),
            Token::Number => Style::new().fg(Color::Cyan),
            Token::Str | Token::OpenStr => Style::new().fg(Color::Green),
            Token::LineComment | Token::BlockComment | Token::OpenComment => {
                Style::new().fg(Color::DarkGray)
            }
            _ => Style::new().fg(Color::White),
        }
    }
}

impl reedline::Highlighter for SourceHighlighter {
    fn highlight(&self, line: &str, _: usize) -> StyledText {
        let mut output = StyledText::new();
        let plain = Style::new().fg(Color::White);
        let mut curr_end = 0;

        for (token, span) in Token::lexer(line).spanned() {
            // Skipped whitespace between tokens
            if span.start > curr_end {
                output.push((plain, line[curr_end..span.start].to_string()));
            }
            let text = &line[span.clone()];
            let style = match token {
                Ok(token) => Self::style(token, text),
                Err(_) => plain,
            };
            output.push((style, text.to_string()));
            curr_end = span.end;
        }

        if curr_end < line.len() {
            output.push((plain, line[curr_end..].to_string()));
        }

        output
    }
}
