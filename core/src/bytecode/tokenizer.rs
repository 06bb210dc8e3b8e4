use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::cmp::Reverse;

/// Display category of a slice of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Operator,
    NumericLiteral,
    JumpTarget,
    JumpOffset,
    VariableOp,
    VariableName,
    PlainText,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Operator => "operator",
            TokenKind::NumericLiteral => "numeric_literal",
            TokenKind::JumpTarget => "jump_target",
            TokenKind::JumpOffset => "jump_offset",
            TokenKind::VariableOp => "variable_op",
            TokenKind::VariableName => "variable_name",
            TokenKind::PlainText => "plain_text",
        }
    }
}

/// A classified slice of one instruction string.
///
/// Tokens borrow from the listing they were cut from; they are rebuilt on
/// every render and never edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BytecodeToken<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> BytecodeToken<'a> {
    pub fn new(kind: TokenKind, text: &'a str) -> Self {
        Self { kind, text }
    }
}

/// One tokenized instruction together with its position in the listing.
///
/// Jump offsets refer to these indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BytecodeLine<'a> {
    pub index: usize,
    pub tokens: Vec<BytecodeToken<'a>>,
}

static PUSH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bPush\(").expect("valid push pattern"));

static OPERATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:Add|Subtract|Multiply|Divide|Negate)\b").expect("valid operator pattern")
});

static JUMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(JumpIfFalse|Jump)\((\d+)\)").expect("valid jump pattern"));

static VARIABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(LoadVariable|StoreVariable)\("((?:[^"\\]|\\.)*)"\)"#)
        .expect("valid variable pattern")
});

/// A tagged byte range.
#[derive(Debug, Clone, Copy)]
struct Part {
    start: usize,
    end: usize,
    kind: TokenKind,
}

/// One pattern hit: the whole matched range plus the parts it tags.
#[derive(Debug)]
struct Hit {
    start: usize,
    end: usize,
    parts: Vec<Part>,
}

impl Hit {
    fn new(start: usize, end: usize, parts: impl IntoIterator<Item = Part>) -> Option<Self> {
        let parts: Vec<Part> = parts.into_iter().filter(|p| p.start < p.end).collect();
        if parts.is_empty() {
            None
        } else {
            Some(Self { start, end, parts })
        }
    }
}

/// Splits one instruction string into classified tokens.
///
/// Every category pattern runs over the whole line; where two hits overlap
/// the earlier (then the longer) one is kept. Text outside any tagged part
/// comes back as [`TokenKind::PlainText`], so joining the token texts always
/// gives back `line` unchanged. Never fails.
pub fn tokenize(line: &str) -> Vec<BytecodeToken<'_>> {
    let mut hits = Vec::new();
    collect_push(line, &mut hits);
    collect_operators(line, &mut hits);
    collect_keyword_pairs(&JUMP, TokenKind::JumpTarget, TokenKind::JumpOffset, line, &mut hits);
    collect_keyword_pairs(
        &VARIABLE,
        TokenKind::VariableOp,
        TokenKind::VariableName,
        line,
        &mut hits,
    );
    hits.sort_by_key(|hit| (hit.start, Reverse(hit.end)));

    let mut tokens = Vec::new();
    let mut emitted = 0;
    let mut claimed = 0;
    for hit in hits {
        if hit.start < claimed {
            continue;
        }
        claimed = hit.end;
        for part in hit.parts {
            push_plain(line, emitted, part.start, &mut tokens);
            tokens.push(BytecodeToken::new(part.kind, &line[part.start..part.end]));
            emitted = part.end;
        }
    }
    push_plain(line, emitted, line.len(), &mut tokens);
    tokens
}

/// Tokenizes a whole listing, numbering each instruction from zero.
pub fn tokenize_listing<S: AsRef<str>>(lines: &[S]) -> Vec<BytecodeLine<'_>> {
    lines
        .iter()
        .enumerate()
        .map(|(index, line)| BytecodeLine {
            index,
            tokens: tokenize(line.as_ref()),
        })
        .collect()
}

fn push_plain<'a>(line: &'a str, start: usize, end: usize, tokens: &mut Vec<BytecodeToken<'a>>) {
    if start < end {
        tokens.push(BytecodeToken::new(TokenKind::PlainText, &line[start..end]));
    }
}

/// `Push(...)` with balanced parentheses, so `Push(Number(15.0))` tags
/// `Number(15.0)`. An unclosed `Push(` is left alone.
fn collect_push(line: &str, hits: &mut Vec<Hit>) {
    for found in PUSH.find_iter(line) {
        let open = found.end();
        let Some(close) = matching_paren(&line[open..]).map(|offset| open + offset) else {
            continue;
        };
        let content = Part {
            start: open,
            end: close,
            kind: TokenKind::NumericLiteral,
        };
        hits.extend(Hit::new(found.start(), close + 1, [content]));
    }
}

/// Byte offset of the `)` closing an already opened parenthesis.
fn matching_paren(rest: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (offset, ch) in rest.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(offset);
                }
            }
            _ => {}
        }
    }
    None
}

fn collect_operators(line: &str, hits: &mut Vec<Hit>) {
    for found in OPERATOR.find_iter(line) {
        let part = Part {
            start: found.start(),
            end: found.end(),
            kind: TokenKind::Operator,
        };
        hits.extend(Hit::new(found.start(), found.end(), [part]));
    }
}

/// Patterns with a keyword in group 1 and its argument in group 2.
fn collect_keyword_pairs(
    pattern: &Regex,
    keyword_kind: TokenKind,
    argument_kind: TokenKind,
    line: &str,
    hits: &mut Vec<Hit>,
) {
    for captures in pattern.captures_iter(line) {
        let (Some(whole), Some(keyword), Some(argument)) =
            (captures.get(0), captures.get(1), captures.get(2))
        else {
            continue;
        };
        let parts = [
            Part {
                start: keyword.start(),
                end: keyword.end(),
                kind: keyword_kind,
            },
            Part {
                start: argument.start(),
                end: argument.end(),
                kind: argument_kind,
            },
        ];
        hits.extend(Hit::new(whole.start(), whole.end(), parts));
    }
}
