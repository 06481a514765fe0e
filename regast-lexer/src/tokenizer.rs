use crate::span::{Position, Span};

#[cfg(test)]
use proptest_derive::Arbitrary;

/// Regex tokenizer.
///
/// Tokens are not produced in a single pass. Every token is computed on
/// demand from a position in the input, which makes it possible to restart
/// tokenization at any position that starts a token (see [`TokenStream`]).
///
/// [`TokenStream`]: crate::TokenStream
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Characters of the input (as defined in the rust `char` type). Token
    /// positions index into this list.
    chars: Vec<char>,
    /// Whether escapes only meaningful in unicode mode (`\p`, `\k`) are
    /// attempted.
    unicode: bool,
}

/// Regex token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Information about the kind of token along with the value of the token.
    /// The value is already decoded for escape sequences (e.g. `\n`).
    pub kind: TokenKind,
    /// Start and end position of the token in the input text. The end position
    /// is one further than the end of the current token.
    pub span: Span,
}

impl Token {
    /// Creates a new [`Token`].
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Regex token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Caret,
    Dollar,
    Dot,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    QuestionMark,
    LeftBrace,
    RightBrace,
    Plus,
    Asterisk,
    Vertical,
    /// A single character. `escaped` is set when the character was written as
    /// an escape that has no special meaning (e.g. `\.` or `\q`).
    Character { value: char, escaped: bool },
    /// A character class shorthand (e.g. `\d`, `\W`).
    EscapedCharacter(EscapeClass),
    /// A backslash without a character to escape.
    Invalid,
    /// End of the input.
    Eof,
}

/// Shorthand escapes (`\d`, `\D`, `\b`, `\B`, `\s`, `\S`, `\w`, `\W`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum EscapeClass {
    Digit,
    NonDigit,
    WordBoundary,
    NonWordBoundary,
    WhiteSpace,
    NonWhiteSpace,
    Word,
    NonWord,
}

impl TokenKind {
    /// Creates an unescaped [`TokenKind::Character`].
    pub fn character(value: char) -> Self {
        TokenKind::Character {
            value,
            escaped: false,
        }
    }

    /// Whether the token is the unescaped character `ch`.
    pub fn is_raw_character(&self, ch: char) -> bool {
        matches!(*self, TokenKind::Character { value, escaped: false } if value == ch)
    }

    /// The structural character this token was produced from, if it is one
    /// of the structural singletons.
    pub fn as_structural(&self) -> Option<char> {
        use TokenKind::*;
        let ch = match self {
            Caret => '^',
            Dollar => '$',
            Dot => '.',
            LeftBracket => '[',
            RightBracket => ']',
            LeftParen => '(',
            RightParen => ')',
            QuestionMark => '?',
            LeftBrace => '{',
            RightBrace => '}',
            Plus => '+',
            Asterisk => '*',
            Vertical => '|',

            Character { .. } | EscapedCharacter(_) | Invalid | Eof => return None,
        };

        Some(ch)
    }
}

impl EscapeClass {
    /// The letter following the backslash.
    pub fn letter(&self) -> char {
        use EscapeClass::*;
        match self {
            Digit => 'd',
            NonDigit => 'D',
            WordBoundary => 'b',
            NonWordBoundary => 'B',
            WhiteSpace => 's',
            NonWhiteSpace => 'S',
            Word => 'w',
            NonWord => 'W',
        }
    }

    fn from_letter(ch: char) -> Option<Self> {
        use EscapeClass::*;
        let class = match ch {
            'd' => Digit,
            'D' => NonDigit,
            'b' => WordBoundary,
            'B' => NonWordBoundary,
            's' => WhiteSpace,
            'S' => NonWhiteSpace,
            'w' => Word,
            'W' => NonWord,

            _ => return None,
        };

        Some(class)
    }
}

impl Tokenizer {
    /// Creates a new tokenizer.
    pub fn new(input: &str, unicode: bool) -> Self {
        Self {
            chars: input.chars().collect(),
            unicode,
        }
    }

    /// Amount of characters in the input.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Returns the token starting at `pos`.
    pub fn tokenize(&self, pos: Position) -> Token {
        let Some(&ch) = self.chars.get(pos) else {
            let end = self.len();
            return Token::new(TokenKind::Eof, Span::empty(end));
        };

        let kind = match ch {
            '\\' => return self.handle_escape_sequence(pos),
            '^' => TokenKind::Caret,
            '$' => TokenKind::Dollar,
            '.' => TokenKind::Dot,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '?' => TokenKind::QuestionMark,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '+' => TokenKind::Plus,
            '*' => TokenKind::Asterisk,
            '|' => TokenKind::Vertical,

            a => TokenKind::character(a),
        };

        Token::new(kind, Span::new(pos, pos + 1))
    }

    /// Handles the escape sequence starting with the backslash at `pos`.
    fn handle_escape_sequence(&self, pos: Position) -> Token {
        let Some(&ch) = self.chars.get(pos + 1) else {
            // The last character of the input was a '\', which should always
            // be followed by the escaped character.
            return Token::new(TokenKind::Invalid, Span::new(pos, pos + 1));
        };

        let kind = match ch {
            't' => TokenKind::character('\t'),
            'n' => TokenKind::character('\n'),
            'r' => TokenKind::character('\r'),
            'v' => TokenKind::character('\u{b}'),
            'f' => TokenKind::character('\u{c}'),
            // Named backreferences and unicode properties. Not implemented,
            // they match the escaped character.
            'k' | 'p' if self.unicode => Self::escaped_literal(ch),
            // Control characters, null, hexadecimal and unicode code points.
            // Not implemented either.
            'c' | '0' | 'x' | 'u' => Self::escaped_literal(ch),

            ch => match EscapeClass::from_letter(ch) {
                Some(class) => TokenKind::EscapedCharacter(class),
                None => Self::escaped_literal(ch),
            },
        };

        Token::new(kind, Span::new(pos, pos + 2))
    }

    fn escaped_literal(ch: char) -> TokenKind {
        TokenKind::Character {
            value: ch,
            escaped: true,
        }
    }
}
