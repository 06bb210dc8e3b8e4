//! Display classification of bytecode listings.
//!
//! The compiler service returns its bytecode as opaque strings such as
//! `Push(15)`, `JumpIfFalse(7)` or `StoreVariable("x")`. Nothing here
//! validates them; the tokenizer only finds the parts worth colouring and
//! leaves everything else as plain text.

mod tokenizer;

#[cfg(test)]
mod tokenizer_test;

pub use tokenizer::{BytecodeLine, BytecodeToken, TokenKind, tokenize, tokenize_listing};
