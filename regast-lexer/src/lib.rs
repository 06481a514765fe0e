//! Tokenizer for regular expression patterns along with the cursor the parser
//! uses to walk, look ahead in, and backtrack over the produced tokens.

pub use span::{Position, Span};
pub use stream::{Snapshot, TokenStream};
pub use tokenizer::{EscapeClass, Token, TokenKind, Tokenizer};

mod span;
mod stream;
mod tokenizer;
