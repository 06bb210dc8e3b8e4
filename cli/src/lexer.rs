use logos::Logos;
use reedline::{ValidationResult, Validator};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", priority = 4)]
    BlockComment,

    // Runs to the end of the buffer: the comment is still open
    #[regex(r"/\*([^*]|\*+[^*/])*\**", priority = 3)]
    OpenComment,

    // Strings never span lines
    #[regex(r#""(?:[^"\\\n]|\\.)*""#, priority = 4)]
    Str,

    #[regex(r#""(?:[^"\\\n]|\\.)*"#, priority = 3)]
    OpenStr,

    #[regex(r"[0-9]+(?:\.[0-9]+)?")]
    Number,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,

    #[token("/")]
    Slash,

    #[regex(r#"[^ \t\r\n\f\{\}\[\]\(\)"/A-Za-z0-9_]+"#)]
    Other,
}

pub const KEYWORDS: &[&str] = &["int", "float", "if", "else", "while", "return"];

/// Number of brackets still open at the end of `buffer`.
///
/// Returns `None` while a block comment is unterminated, since no amount of
/// bracket closing makes that input complete. Stray closing brackets are
/// left for the compiler to report and count as depth 0.
pub fn calculate_depth(buffer: &str) -> Option<usize> {
    let mut depth: isize = 0;

    for token in Token::lexer(buffer) {
        match token {
            Ok(Token::LBrace | Token::LBracket | Token::LParen) => depth += 1,
            Ok(Token::RBrace | Token::RBracket | Token::RParen) => depth -= 1,
            Ok(Token::OpenComment) => return None,

            // Everything else, including text logos cannot place, is left to
            // the compiler.
            Ok(_) | Err(_) => {}
        }
    }

    Some(depth.max(0) as usize)
}

/// Keeps the REPL reading lines until brackets balance.
pub struct BracketValidator;

impl Validator for BracketValidator {
    fn validate(&self, line: &str) -> ValidationResult {
        match calculate_depth(line) {
            Some(0) => ValidationResult::Complete,
            _ => ValidationResult::Incomplete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<Token> {
        Token::lexer(source).filter_map(Result::ok).collect()
    }

    #[test]
    fn test_balanced_input_has_no_depth() {
        assert_eq!(calculate_depth("int x = (1 + 2) * 3;"), Some(0));
        assert_eq!(calculate_depth(""), Some(0));
    }

    #[test]
    fn test_open_blocks_are_counted() {
        assert_eq!(calculate_depth("while (x) {"), Some(1));
        assert_eq!(calculate_depth("if (a) {\n  if (b) {\n"), Some(2));
        assert_eq!(calculate_depth("if (a) {\n  x;\n}"), Some(0));
    }

    #[test]
    fn test_brackets_in_comments_and_strings_are_ignored() {
        assert_eq!(calculate_depth("x; // {"), Some(0));
        assert_eq!(calculate_depth("x; /* { ( */"), Some(0));
        assert_eq!(calculate_depth(r#"print("{(");"#), Some(0));
        assert_eq!(calculate_depth(r#"print("\"{");"#), Some(0));
    }

    #[test]
    fn test_open_block_comment_needs_more_input() {
        assert_eq!(calculate_depth("x; /* still going"), None);
        assert_eq!(calculate_depth("x; /* still going **"), None);
    }

    #[test]
    fn test_stray_closer_does_not_go_negative() {
        assert_eq!(calculate_depth("}"), Some(0));
    }

    #[test]
    fn test_tokens() {
        assert_eq!(
            kinds("int x = 1.5; /* c */ \"s\" // end"),
            vec![
                Token::Word,
                Token::Word,
                Token::Other,
                Token::Number,
                Token::Other,
                Token::BlockComment,
                Token::Str,
                Token::LineComment,
            ]
        );
        assert_eq!(kinds("a / b"), vec![Token::Word, Token::Slash, Token::Word]);
        assert_eq!(kinds("\"open"), vec![Token::OpenStr]);
    }

    #[test]
    fn test_validator() {
        assert!(matches!(
            BracketValidator.validate("sum;"),
            ValidationResult::Complete
        ));
        assert!(matches!(
            BracketValidator.validate("while (1) {"),
            ValidationResult::Incomplete
        ));
        assert!(matches!(
            BracketValidator.validate("/* unfinished"),
            ValidationResult::Incomplete
        ));
    }
}
