//! Error tolerant parser for regular expression patterns.
//!
//! The parser never fails: malformed patterns still produce a tree, along with
//! [`Diagnostic`]s describing what was wrong.
//!
//! ```
//! let output = regast_parser::parse("(?<year>\\d{4})-[0-9]{2}", Default::default());
//! assert!(output.diagnostics.is_empty());
//! ```

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use parser::{ParseOutput, Parser, ParserOptions};

pub mod ast;
mod diagnostics;
mod parser;
mod print;


/// Parses `input` into a regex [`ast::Expression`].
pub fn parse(input: &str, options: ParserOptions) -> ParseOutput {
    Parser::with_options(input, options).parse()
}
