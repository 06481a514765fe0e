//! Regex ast.
//!
//! # Grammar
//!
//! ```ebnf
//!     expression ::= sub_expression (VERTICAL sub_expression)*;
//!     sub_expression ::= body_item*;
//!     body_item ::= body_item_prefix quantifier*;
//!     body_item_prefix ::= CARET | DOLLAR | DOT | char_set | group | character;
//!     quantifier ::= (QUESTION_MARK | ASTERISK | PLUS | range) QUESTION_MARK?;
//!     range ::= LEFT_BRACE DIGIT+ (COMMA DIGIT*)? RIGHT_BRACE;
//!     group ::= LEFT_PAREN group_modifier? expression RIGHT_PAREN;
//!     group_modifier ::= "?:" | "?=" | "?!" | "?<=" | "?<!" | "?<" NAME ">";
//!     char_set ::= LEFT_BRACKET CARET? (character | char_set_range)* RIGHT_BRACKET;
//!     char_set_range ::= character "-" character;
//!     character ::= CHARACTER | ESCAPED_CHARACTER;
//! ```
//!
//! Alternations fold to the left: `a|b|c` is `((a|b)|c)`.

use regast_lexer::{EscapeClass, Span};
use serde::Serialize;

#[cfg(test)]
use proptest_derive::Arbitrary;

/// Root of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expression {
    Alternation(Alternation),
    SubExpression(SubExpression),
}

/// Two alternatives (e.g., `<expression>|<sub expression>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alternation {
    pub left: Box<Expression>,
    pub right: SubExpression,
    pub span: Span,
}

/// Concatenation of body items, a single alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubExpression {
    pub body: Vec<BodyItem>,
    pub span: Span,
}

/// A single unit of a concatenation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BodyItem {
    Character(CharacterItem),
    /// `^`
    StartCharacter(Span),
    /// `$`
    EndCharacter(Span),
    /// `.`
    AnyCharacter(Span),
    CharSet(CharSet),
    GroupCapture(GroupCapture),
    GroupNonCapture(GroupNonCapture),
    Quantified(Quantified),
}

/// A literal character or a character class shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CharacterItem {
    Character(Character),
    /// `\d`
    DigitCharacter(Span),
    /// `\D`
    NonDigitCharacter(Span),
    /// `\b`
    WordBoundaryCharacter(Span),
    /// `\B`
    NonWordBoundaryCharacter(Span),
    /// `\s`
    WhiteSpaceCharacter(Span),
    /// `\S`
    NonWhiteSpaceCharacter(Span),
    /// `\w`
    WordCharacter(Span),
    /// `\W`
    NonWordCharacter(Span),
}

/// A literal character. Escape sequences are already decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Character {
    pub value: char,
    pub span: Span,
}

/// Bracket expression (e.g. `[^a-cl47i]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharSet {
    pub invert: bool,
    pub body: Vec<CharSetItem>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CharSetItem {
    Character(CharacterItem),
    Range(CharSetRange),
}

/// A character range (e.g., `0-1`, `a-z`).
///
/// When both ends are literal characters, `start` never comes after `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CharSetRange {
    pub start: CharacterItem,
    pub end: CharacterItem,
    pub span: Span,
}

/// Capturing group, optionally named (e.g. `(a)`, `(?<year>\d+)`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCapture {
    pub expression: Box<Expression>,
    pub name: Option<String>,
    pub span: Span,
}

/// Non-capturing group or lookaround (e.g. `(?:a)`, `(?<!a)`). A `kind` of
/// `None` is a plain non-capturing group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupNonCapture {
    pub expression: Box<Expression>,
    pub kind: Option<Lookaround>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum Lookaround {
    /// `(?=...)`
    PositiveLookahead,
    /// `(?!...)`
    NegativeLookahead,
    /// `(?<=...)`
    PositiveLookbehind,
    /// `(?<!...)`
    NegativeLookbehind,
}

/// A quantified body item (e.g. `a*`, `[ab]{2,}?`).
///
/// `max` is `None` when unbounded and otherwise at least `min`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quantified {
    pub item: Box<BodyItem>,
    pub min: u32,
    pub max: Option<u32>,
    pub lazy: bool,
    pub span: Span,
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Alternation(alternation) => alternation.span,
            Expression::SubExpression(sub_expression) => sub_expression.span,
        }
    }

    /// Iterates over the alternatives in source order.
    pub fn alternatives(&self) -> impl Iterator<Item = &SubExpression> {
        let mut alternatives = Vec::new();
        let mut expression = self;

        loop {
            match expression {
                Expression::Alternation(Alternation { left, right, .. }) => {
                    alternatives.push(right);
                    expression = left;
                }
                Expression::SubExpression(sub_expression) => {
                    alternatives.push(sub_expression);
                    break;
                }
            }
        }

        alternatives.into_iter().rev()
    }
}

impl BodyItem {
    pub fn span(&self) -> Span {
        match self {
            BodyItem::Character(character) => character.span(),
            BodyItem::StartCharacter(span)
            | BodyItem::EndCharacter(span)
            | BodyItem::AnyCharacter(span) => *span,
            BodyItem::CharSet(set) => set.span,
            BodyItem::GroupCapture(group) => group.span,
            BodyItem::GroupNonCapture(group) => group.span,
            BodyItem::Quantified(quantified) => quantified.span,
        }
    }
}

impl CharacterItem {
    /// Creates the node for a shorthand escape.
    pub fn from_escape(class: EscapeClass, span: Span) -> Self {
        match class {
            EscapeClass::Digit => Self::DigitCharacter(span),
            EscapeClass::NonDigit => Self::NonDigitCharacter(span),
            EscapeClass::WordBoundary => Self::WordBoundaryCharacter(span),
            EscapeClass::NonWordBoundary => Self::NonWordBoundaryCharacter(span),
            EscapeClass::WhiteSpace => Self::WhiteSpaceCharacter(span),
            EscapeClass::NonWhiteSpace => Self::NonWhiteSpaceCharacter(span),
            EscapeClass::Word => Self::WordCharacter(span),
            EscapeClass::NonWord => Self::NonWordCharacter(span),
        }
    }

    /// The shorthand escape this node was parsed from, `None` for literal
    /// characters.
    pub fn escape_class(&self) -> Option<EscapeClass> {
        let class = match self {
            Self::Character(_) => return None,
            Self::DigitCharacter(_) => EscapeClass::Digit,
            Self::NonDigitCharacter(_) => EscapeClass::NonDigit,
            Self::WordBoundaryCharacter(_) => EscapeClass::WordBoundary,
            Self::NonWordBoundaryCharacter(_) => EscapeClass::NonWordBoundary,
            Self::WhiteSpaceCharacter(_) => EscapeClass::WhiteSpace,
            Self::NonWhiteSpaceCharacter(_) => EscapeClass::NonWhiteSpace,
            Self::WordCharacter(_) => EscapeClass::Word,
            Self::NonWordCharacter(_) => EscapeClass::NonWord,
        };

        Some(class)
    }

    pub fn span(&self) -> Span {
        match *self {
            Self::Character(character) => character.span,
            Self::DigitCharacter(span)
            | Self::NonDigitCharacter(span)
            | Self::WordBoundaryCharacter(span)
            | Self::NonWordBoundaryCharacter(span)
            | Self::WhiteSpaceCharacter(span)
            | Self::NonWhiteSpaceCharacter(span)
            | Self::WordCharacter(span)
            | Self::NonWordCharacter(span) => span,
        }
    }
}

impl CharSetItem {
    pub fn span(&self) -> Span {
        match self {
            CharSetItem::Character(character) => character.span(),
            CharSetItem::Range(range) => range.span,
        }
    }
}
