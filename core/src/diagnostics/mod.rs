//! Source positions recovered from compiler error messages.
//!
//! The compiler service does not send positions as structured data. Its
//! messages read like `Parser error at 2:5: Expected ';'`, so the position
//! is recovered by pattern matching. Messages without one are fine: they
//! are shown as-is and nothing gets highlighted.

mod locate;

#[cfg(test)]
mod locate_test;

pub use locate::{DiagnosticLocation, locate, trim_origin};
