//! Tests for the bytecode line tokenizer.

use super::{BytecodeToken, TokenKind, tokenize, tokenize_listing};
use pretty_assertions::assert_eq;

fn tok(kind: TokenKind, text: &str) -> BytecodeToken<'_> {
    BytecodeToken::new(kind, text)
}

fn joined(line: &str) -> String {
    tokenize(line).iter().map(|t| t.text).collect()
}

#[test]
fn push_tags_parenthesized_value() {
    assert_eq!(
        tokenize("Push(42)"),
        vec![
            tok(TokenKind::PlainText, "Push("),
            tok(TokenKind::NumericLiteral, "42"),
            tok(TokenKind::PlainText, ")"),
        ]
    );
}

#[test]
fn push_keeps_nested_parentheses_together() {
    let tokens = tokenize("Push(Number(15.0))");
    assert_eq!(tokens[1], tok(TokenKind::NumericLiteral, "Number(15.0)"));
    assert_eq!(tokens.len(), 3);
}

#[test]
fn unclosed_push_is_plain() {
    assert_eq!(tokenize("Push(1"), vec![tok(TokenKind::PlainText, "Push(1")]);
}

#[test]
fn empty_push_is_plain() {
    assert_eq!(tokenize("Push()"), vec![tok(TokenKind::PlainText, "Push()")]);
}

#[test]
fn operators_match_whole_words() {
    for op in ["Add", "Subtract", "Multiply", "Divide", "Negate"] {
        assert_eq!(tokenize(op), vec![tok(TokenKind::Operator, op)]);
    }
    assert_eq!(tokenize("Address"), vec![tok(TokenKind::PlainText, "Address")]);
    assert_eq!(tokenize("add"), vec![tok(TokenKind::PlainText, "add")]);
}

#[test]
fn jump_tags_keyword_and_offset() {
    assert_eq!(
        tokenize("Jump(7)"),
        vec![
            tok(TokenKind::JumpTarget, "Jump"),
            tok(TokenKind::PlainText, "("),
            tok(TokenKind::JumpOffset, "7"),
            tok(TokenKind::PlainText, ")"),
        ]
    );
}

#[test]
fn jump_if_false_is_one_keyword() {
    let tokens = tokenize("JumpIfFalse(12)");
    assert_eq!(tokens[0], tok(TokenKind::JumpTarget, "JumpIfFalse"));
    assert_eq!(tokens[2], tok(TokenKind::JumpOffset, "12"));
}

#[test]
fn jump_requires_numeric_argument() {
    assert_eq!(tokenize("Jump(x)"), vec![tok(TokenKind::PlainText, "Jump(x)")]);
}

#[test]
fn load_variable_tags_op_and_name() {
    assert_eq!(
        tokenize(r#"LoadVariable("x")"#),
        vec![
            tok(TokenKind::VariableOp, "LoadVariable"),
            tok(TokenKind::PlainText, "(\""),
            tok(TokenKind::VariableName, "x"),
            tok(TokenKind::PlainText, "\")"),
        ]
    );
}

#[test]
fn store_variable_tags_op_and_name() {
    let tokens = tokenize(r#"StoreVariable("sum")"#);
    assert_eq!(tokens[0], tok(TokenKind::VariableOp, "StoreVariable"));
    assert_eq!(tokens[2], tok(TokenKind::VariableName, "sum"));
}

#[test]
fn unknown_instruction_is_plain() {
    assert_eq!(tokenize("Pop"), vec![tok(TokenKind::PlainText, "Pop")]);
    assert_eq!(
        tokenize(r#"Call("<unknown>", 0)"#),
        vec![tok(TokenKind::PlainText, r#"Call("<unknown>", 0)"#)]
    );
    assert!(tokenize("").is_empty());
}

#[test]
fn several_categories_on_one_line() {
    let kinds: Vec<TokenKind> = tokenize("Push(1) Add Jump(3)")
        .into_iter()
        .filter(|t| t.kind != TokenKind::PlainText)
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::NumericLiteral,
            TokenKind::Operator,
            TokenKind::JumpTarget,
            TokenKind::JumpOffset,
        ]
    );
}

#[test]
fn earlier_match_wins_on_overlap() {
    // The operator name sits inside the variable name.
    let tokens = tokenize(r#"LoadVariable("Add")"#);
    assert_eq!(tokens[2], tok(TokenKind::VariableName, "Add"));
    assert!(tokens.iter().all(|t| t.kind != TokenKind::Operator));
}

#[test]
fn tokens_reassemble_the_line() {
    for line in [
        "Push(Number(15.0))",
        r#"StoreVariable("x")"#,
        "JumpIfFalse(9)",
        "Negate",
        "  Push(1)  Multiply  ",
        "Push(String(\"héllo\"))",
        "Print",
    ] {
        assert_eq!(joined(line), line);
    }
}

#[test]
fn no_adjacent_plain_tokens() {
    let tokens = tokenize("xx Push(1) yy Add zz");
    for pair in tokens.windows(2) {
        assert!(
            !(pair[0].kind == TokenKind::PlainText && pair[1].kind == TokenKind::PlainText),
            "adjacent plain tokens in {:?}",
            tokens
        );
    }
}

#[test]
fn listing_numbers_instructions() {
    let listing = tokenize_listing(&["Push(15)", r#"StoreVariable("x")"#, "Pop"]);
    assert_eq!(listing.len(), 3);
    assert_eq!(
        listing.iter().map(|line| line.index).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert_eq!(listing[2].tokens, vec![tok(TokenKind::PlainText, "Pop")]);
}
