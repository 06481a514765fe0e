use super::Parser;
use crate::{
    ast::{BodyItem, Quantified},
    diagnostics::{Diagnostic, DiagnosticKind},
};
use regast_lexer::TokenKind;

/// Quantifiers past this amount on a single item are consumed and dropped.
const MAX_STACKED_QUANTIFIERS: usize = 16;

/// Bounds of a parsed quantifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Quantifier {
    min: u32,
    max: Option<u32>,
    lazy: bool,
}

impl Parser {
    /// Wraps `item` in every quantifier that directly follows it.
    pub(super) fn parse_quantified(&mut self, mut item: BodyItem) -> BodyItem {
        let mut stacked = 0;
        let mut dropped_from = None;

        loop {
            let start = self.tokens.position();
            let Some(Quantifier { min, max, lazy }) = self.parse_quantifier() else {
                break;
            };

            if stacked == MAX_STACKED_QUANTIFIERS {
                dropped_from.get_or_insert(start);
                continue;
            }

            stacked += 1;
            item = BodyItem::Quantified(Quantified {
                span: self.tokens.span_from(item.span().start),
                item: Box::new(item),
                min,
                max,
                lazy,
            });
        }

        if let Some(start) = dropped_from {
            self.report(Diagnostic::new(
                DiagnosticKind::QuantifiersStackedTooDeeply,
                self.tokens.span_from(start),
            ));
        }

        item
    }

    /// Rule: `quantifier ::= (QUESTION_MARK | ASTERISK | PLUS | range)
    /// QUESTION_MARK?`
    ///
    /// Returns `None` without consuming anything when the current token does
    /// not start a quantifier.
    fn parse_quantifier(&mut self) -> Option<Quantifier> {
        let (min, max) = match self.tokens.current().kind {
            TokenKind::QuestionMark => (0, Some(1)),
            TokenKind::Asterisk => (0, None),
            TokenKind::Plus => (1, None),
            TokenKind::LeftBrace => {
                // `{` is only a quantifier when the full range follows it,
                // otherwise it is a literal.
                let snapshot = self.tokens.snapshot();
                match self.parse_quantifier_range() {
                    Some(bounds) => return Some(self.finish_quantifier(bounds)),
                    None => {
                        self.tokens.restore(snapshot);
                        return None;
                    }
                }
            }

            _ => return None,
        };

        self.tokens.advance();
        Some(self.finish_quantifier((min, max)))
    }

    /// Takes the optional lazy marker following a quantifier.
    fn finish_quantifier(&mut self, (min, max): (u32, Option<u32>)) -> Quantifier {
        Quantifier {
            min,
            max,
            lazy: self.tokens.eat(TokenKind::QuestionMark).is_some(),
        }
    }

    /// Rule: `range ::= LEFT_BRACE DIGIT+ (COMMA DIGIT*)? RIGHT_BRACE`
    ///
    /// Consumes tokens even when it fails, the caller restores the stream.
    fn parse_quantifier_range(&mut self) -> Option<(u32, Option<u32>)> {
        let open = self.tokens.advance();
        let min = self.parse_digits()??;

        if self.tokens.eat_character(',').is_none() {
            self.tokens.eat(TokenKind::RightBrace)?;
            return Some((min, Some(min)));
        }

        let max = match self.parse_digits() {
            Some(max) => Some(max?),
            None => None,
        };
        self.tokens.eat(TokenKind::RightBrace)?;

        match max {
            Some(max) if max < min => {
                self.report(Diagnostic::new(
                    DiagnosticKind::ReversedQuantifierRange,
                    self.tokens.span_from(open.span.start),
                ));
                Some((max, Some(min)))
            }
            max => Some((min, max)),
        }
    }

    /// Takes all decimal characters from the stream.
    ///
    /// Returns `None` when there are no digits and `Some(None)` when the
    /// number overflows a [`u32`].
    fn parse_digits(&mut self) -> Option<Option<u32>> {
        let mut value = None;

        while let TokenKind::Character {
            value: ch,
            escaped: false,
        } = self.tokens.current().kind
        {
            let Some(digit) = ch.to_digit(10) else {
                break;
            };

            self.tokens.advance();
            value = Some(
                value
                    .unwrap_or(Some(0))
                    .and_then(|acc: u32| acc.checked_mul(10)?.checked_add(digit)),
            );
        }

        value
    }
}
