//! Regex recursive descent parser with error recovery.
//!
//! Malformed constructs never stop the parser. They are recorded as
//! [`Diagnostic`]s and the parser either keeps the partially built node or
//! skips the offending token.

use crate::{
    ast::{Alternation, BodyItem, Character, CharacterItem, Expression, SubExpression},
    diagnostics::{Diagnostic, DiagnosticKind, Diagnostics},
};
use regast_lexer::{Token, TokenKind, TokenStream};

mod charset;
mod group;
mod quantifier;

/// Groups nested deeper than this are skipped. Every level of nesting is a
/// level of recursion, in the parser and in everything walking the tree.
const MAX_GROUP_DEPTH: usize = 128;

/// Recursive descent regex parser.
///
/// A parser is created for a single pattern and consumed by [`parse`].
///
/// [`parse`]: Parser::parse
pub struct Parser {
    /// Stream of tokens being parsed.
    tokens: TokenStream,
    diagnostics: Diagnostics,
    /// Amount of groups enclosing the current token.
    depth: usize,
}

/// Configuration of the [`Parser`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Pattern is parsed in unicode mode (the `u` flag).
    pub unicode: bool,
}

/// Result of parsing a pattern. The tree is always present, even when the
/// pattern is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutput {
    pub expression: Expression,
    pub diagnostics: Diagnostics,
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unicode(mut self, unicode: bool) -> Self {
        self.unicode = unicode;
        self
    }
}

impl Parser {
    /// Creates a new regex parser from the `input`.
    pub fn new(input: &str) -> Self {
        Self::with_options(input, ParserOptions::default())
    }

    pub fn with_options(input: &str, options: ParserOptions) -> Self {
        Self {
            tokens: TokenStream::new(input, options.unicode),
            diagnostics: Diagnostics::new(),
            depth: 0,
        }
    }

    /// Parses the `input` into a regex [`Expression`].
    pub fn parse(mut self) -> ParseOutput {
        let expression = self.parse_expression(|_| true);

        debug_assert!(self.tokens.is_eof(), "top level expression stopped early");

        ParseOutput {
            expression,
            diagnostics: self.diagnostics,
        }
    }

    /// Rule: `expression ::= sub_expression (VERTICAL sub_expression)*`
    ///
    /// Parses until the end of the input or until `should_continue` returns
    /// `false` for the current token.
    fn parse_expression<P>(&mut self, should_continue: P) -> Expression
    where
        P: Fn(&TokenStream) -> bool,
    {
        let mut alternatives = Vec::new();
        let mut body = Vec::new();
        let mut start = self.tokens.position();

        while !self.tokens.is_eof() && should_continue(&self.tokens) {
            if self.tokens.current().kind == TokenKind::Vertical {
                alternatives.push(SubExpression {
                    body: std::mem::take(&mut body),
                    span: self.tokens.span_from(start),
                });
                self.tokens.advance();
                start = self.tokens.position();
                continue;
            }

            if let Some(item) = self.parse_body_item() {
                body.push(item);
            }
        }

        alternatives.push(SubExpression {
            body,
            span: self.tokens.span_from(start),
        });

        let mut alternatives = alternatives.into_iter();
        let Some(first) = alternatives.next() else {
            unreachable!("an expression has at least one alternative");
        };

        alternatives.fold(Expression::SubExpression(first), |left, right| {
            Expression::Alternation(Alternation {
                span: left.span().cover(right.span),
                left: Box::new(left),
                right,
            })
        })
    }

    /// Rule: `body_item ::= body_item_prefix quantifier*`
    fn parse_body_item(&mut self) -> Option<BodyItem> {
        let prefix = self.parse_body_item_prefix()?;
        Some(self.parse_quantified(prefix))
    }

    /// Rule: `body_item_prefix ::= CARET | DOLLAR | DOT | char_set | group |
    /// character`
    fn parse_body_item_prefix(&mut self) -> Option<BodyItem> {
        let token = self.tokens.current();

        let item = match token.kind {
            TokenKind::Dollar => BodyItem::EndCharacter(self.tokens.advance().span),
            TokenKind::Caret => BodyItem::StartCharacter(self.tokens.advance().span),
            TokenKind::Dot => BodyItem::AnyCharacter(self.tokens.advance().span),
            TokenKind::LeftBracket => BodyItem::CharSet(self.parse_char_set()),
            TokenKind::LeftParen => self.parse_group()?,
            TokenKind::RightParen => {
                self.skip_token(DiagnosticKind::UnopenedGroup);
                return None;
            }
            TokenKind::QuestionMark | TokenKind::Asterisk | TokenKind::Plus => {
                self.skip_token(DiagnosticKind::InvalidQuantifierTarget);
                return None;
            }
            // Not closing anything or not a valid quantifier, so these are
            // literals.
            TokenKind::RightBracket
            | TokenKind::LeftBrace
            | TokenKind::RightBrace
            | TokenKind::Character { .. }
            | TokenKind::EscapedCharacter(_) => {
                let token = self.tokens.advance();
                match Self::character_from_token(&token) {
                    Some(character) => BodyItem::Character(character),
                    None => unreachable!("token is not a character (`{:?}`)", token.kind),
                }
            }

            TokenKind::Vertical | TokenKind::Invalid | TokenKind::Eof => {
                self.skip_token(DiagnosticKind::UnknownRegexPart);
                return None;
            }
        };

        Some(item)
    }

    /// Converts a token to a character node. Structural tokens become the
    /// literal character they were written as.
    fn character_from_token(token: &Token) -> Option<CharacterItem> {
        let value = match token.kind {
            TokenKind::Character { value, .. } => value,
            TokenKind::EscapedCharacter(class) => {
                return Some(CharacterItem::from_escape(class, token.span))
            }
            kind => kind.as_structural()?,
        };

        Some(CharacterItem::Character(Character {
            value,
            span: token.span,
        }))
    }

    /// Records a diagnostic at the current token and consumes it.
    fn skip_token(&mut self, kind: DiagnosticKind) {
        let token = self.tokens.advance();
        self.report(Diagnostic::at_token(kind, &token));
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::Parser;
    use crate::{
        ast::{Alternation, BodyItem, Character, CharacterItem, Expression, SubExpression},
        diagnostics::DiagnosticKind,
    };
    use regast_lexer::Span;

    macro_rules! character {
        ($value:expr, $start:expr) => {
            BodyItem::Character(CharacterItem::Character(Character {
                value: $value,
                span: Span::new($start, $start + 1),
            }))
        };
    }

    fn sub_expression(body: Vec<BodyItem>, start: usize, end: usize) -> SubExpression {
        SubExpression {
            body,
            span: Span::new(start, end),
        }
    }

    #[test]
    fn single_alternative() {
        let output = Parser::new("ab").parse();

        assert_eq!(
            output.expression,
            Expression::SubExpression(sub_expression(
                vec![character!('a', 0), character!('b', 1)],
                0,
                2
            ))
        );
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn alternation_is_left_associative() {
        let output = Parser::new("a|b|c").parse();

        let a = sub_expression(vec![character!('a', 0)], 0, 1);
        let b = sub_expression(vec![character!('b', 2)], 2, 3);
        let c = sub_expression(vec![character!('c', 4)], 4, 5);

        assert_eq!(
            output.expression,
            Expression::Alternation(Alternation {
                left: Box::new(Expression::Alternation(Alternation {
                    left: Box::new(Expression::SubExpression(a)),
                    right: b,
                    span: Span::new(0, 3),
                })),
                right: c,
                span: Span::new(0, 5),
            })
        );
    }

    #[test]
    fn empty_alternatives() {
        let output = Parser::new("|").parse();

        assert_eq!(
            output.expression,
            Expression::Alternation(Alternation {
                left: Box::new(Expression::SubExpression(sub_expression(vec![], 0, 0))),
                right: sub_expression(vec![], 1, 1),
                span: Span::new(0, 1),
            })
        );
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn empty_pattern() {
        let output = Parser::new("").parse();

        assert_eq!(
            output.expression,
            Expression::SubExpression(sub_expression(vec![], 0, 0))
        );
    }

    #[test]
    fn anchors_and_wildcard() {
        let output = Parser::new("^.$").parse();

        assert_eq!(
            output.expression,
            Expression::SubExpression(sub_expression(
                vec![
                    BodyItem::StartCharacter(Span::new(0, 1)),
                    BodyItem::AnyCharacter(Span::new(1, 2)),
                    BodyItem::EndCharacter(Span::new(2, 3)),
                ],
                0,
                3
            ))
        );
    }

    #[test]
    fn stray_closing_tokens_are_literals() {
        let output = Parser::new("]}").parse();

        assert_eq!(
            output.expression,
            Expression::SubExpression(sub_expression(
                vec![character!(']', 0), character!('}', 1)],
                0,
                2
            ))
        );
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn unopened_group_is_skipped() {
        let output = Parser::new("a)b").parse();

        assert_eq!(
            output.expression,
            Expression::SubExpression(sub_expression(
                vec![character!('a', 0), character!('b', 2)],
                0,
                3
            ))
        );
        assert_eq!(output.diagnostics.kinds(), [DiagnosticKind::UnopenedGroup]);
        assert_eq!(output.diagnostics.iter().next().map(|d| d.span), Some(Span::new(1, 2)));
    }

    #[test]
    fn quantifier_without_target() {
        let output = Parser::new("*a|+").parse();

        assert_eq!(
            output.diagnostics.kinds(),
            [
                DiagnosticKind::InvalidQuantifierTarget,
                DiagnosticKind::InvalidQuantifierTarget
            ]
        );
        assert_eq!(output.expression.alternatives().count(), 2);
    }

    #[test]
    fn trailing_backslash() {
        let output = Parser::new("a\\").parse();

        assert_eq!(
            output.expression,
            Expression::SubExpression(sub_expression(vec![character!('a', 0)], 0, 2))
        );
        assert_eq!(output.diagnostics.kinds(), [DiagnosticKind::UnknownRegexPart]);
    }
}
