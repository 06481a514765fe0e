//! Error tolerant parsing of regular expression patterns.
//!
//! Re-exports the tokenizer from `regast-lexer` and the parser from
//! `regast-parser`.

pub use regast_lexer::{Position, Span, Token, TokenKind, TokenStream, Tokenizer};
pub use regast_parser::{
    ast, parse, Diagnostic, DiagnosticKind, Diagnostics, ParseOutput, Parser, ParserOptions,
};
