use crate::{
    span::{Position, Span},
    tokenizer::{Token, TokenKind, Tokenizer},
};

/// Cursor over the tokens of a pattern.
///
/// The stream only stores the current token and the end of the previously
/// consumed one. Both are cheap to copy, which is what makes speculative
/// parsing possible: take a [`Snapshot`], try to parse, and [`restore`] on
/// failure.
///
/// [`restore`]: TokenStream::restore
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokenizer: Tokenizer,
    state: Snapshot,
}

/// Saved cursor state of a [`TokenStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    /// Token the cursor is at.
    current: Token,
    /// End position of the last consumed token.
    prev_end: Position,
}

impl TokenStream {
    /// Creates a token stream at the start of `input`.
    pub fn new(input: &str, unicode: bool) -> Self {
        let tokenizer = Tokenizer::new(input, unicode);
        let current = tokenizer.tokenize(0);

        Self {
            tokenizer,
            state: Snapshot {
                current,
                prev_end: 0,
            },
        }
    }

    /// Returns the token at the cursor without consuming it.
    pub fn current(&self) -> Token {
        self.state.current
    }

    /// Returns the token following the current one.
    pub fn lookahead(&self) -> Token {
        self.lookahead_from(&self.state.current)
    }

    /// Returns the token following `token`.
    ///
    /// Note: `token` should be a token of this stream, otherwise the returned
    /// token may start in the middle of an escape sequence.
    pub fn lookahead_from(&self, token: &Token) -> Token {
        self.tokenizer.tokenize(token.span.end)
    }

    /// Consumes the current token and returns it. At the end of the input,
    /// this keeps returning [`TokenKind::Eof`].
    pub fn advance(&mut self) -> Token {
        let consumed = self.state.current;

        if consumed.kind != TokenKind::Eof {
            self.state = Snapshot {
                current: self.tokenizer.tokenize(consumed.span.end),
                prev_end: consumed.span.end,
            };
        }

        consumed
    }

    /// Consumes the current token if it is of `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.state.current.kind == kind {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consumes the current token if it is the unescaped character `ch`.
    pub fn eat_character(&mut self, ch: char) -> Option<Token> {
        if self.state.current.kind.is_raw_character(ch) {
            Some(self.advance())
        } else {
            None
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state
    }

    pub fn restore(&mut self, snapshot: Snapshot) {
        self.state = snapshot;
    }

    pub fn is_eof(&self) -> bool {
        self.state.current.kind == TokenKind::Eof
    }

    /// Start position of the current token.
    pub fn position(&self) -> Position {
        self.state.current.span.start
    }

    /// End position of the last consumed token.
    pub fn prev_end(&self) -> Position {
        self.state.prev_end
    }

    /// Span from `start` up to the end of the last consumed token. When
    /// nothing was consumed since `start`, the span is empty.
    pub fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.state.prev_end.max(start))
    }

    /// Span between two explicit positions.
    pub fn span_between(&self, start: Position, end: Position) -> Span {
        Span::new(start, end)
    }
}
