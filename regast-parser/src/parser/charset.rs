use super::Parser;
use crate::{
    ast::{CharSet, CharSetItem, CharSetRange, Character, CharacterItem},
    diagnostics::{Diagnostic, DiagnosticKind},
};
use regast_lexer::{EscapeClass, TokenKind};

/// Inside a character set `\b` is a backspace instead of a word boundary.
const BACKSPACE: char = '\u{8}';

impl Parser {
    /// Rule: `char_set ::= LEFT_BRACKET CARET? (character | char_set_range)*
    /// RIGHT_BRACKET`
    pub(super) fn parse_char_set(&mut self) -> CharSet {
        // LEFT_BRACKET
        let open = self.tokens.advance();

        // CARET?
        let invert = self.tokens.eat(TokenKind::Caret).is_some();

        let mut body = Vec::new();
        loop {
            match self.tokens.current().kind {
                TokenKind::RightBracket => {
                    self.tokens.advance();
                    break;
                }
                TokenKind::Eof => {
                    self.report(Diagnostic::at_token(DiagnosticKind::UnclosedCharSet, &open));
                    break;
                }

                _ => body.extend(self.parse_character_or_range()),
            }
        }

        CharSet {
            invert,
            body,
            span: self.tokens.span_from(open.span.start),
        }
    }

    /// Rule: `character | char_set_range` where `char_set_range ::= character
    /// "-" character`
    fn parse_character_or_range(&mut self) -> Option<CharSetItem> {
        let start = self.parse_set_character()?;

        // A dash right before the end of the set (or a nested `[`) is a
        // literal, it is picked up by the next call.
        let dash = self.tokens.current();
        let is_range = dash.kind.is_raw_character('-')
            && !matches!(
                self.tokens.lookahead_from(&dash).kind,
                TokenKind::LeftBracket | TokenKind::RightBracket | TokenKind::Eof | TokenKind::Invalid
            );
        if !is_range {
            return Some(CharSetItem::Character(start));
        }

        self.tokens.advance();
        let Some(end) = self.parse_set_character() else {
            unreachable!("range end is a character");
        };
        let span = start.span().cover(end.span());

        let (start, end) = match (start, end) {
            (CharacterItem::Character(first), CharacterItem::Character(second))
                if second.value < first.value =>
            {
                self.report(Diagnostic::new(DiagnosticKind::ReversedRange, span));
                (end, start)
            }

            bounds => bounds,
        };

        Some(CharSetItem::Range(CharSetRange { start, end, span }))
    }

    /// Parses a single character inside a set. Every structural token is a
    /// literal here.
    fn parse_set_character(&mut self) -> Option<CharacterItem> {
        let token = self.tokens.advance();

        if token.kind == TokenKind::EscapedCharacter(EscapeClass::WordBoundary) {
            return Some(CharacterItem::Character(Character {
                value: BACKSPACE,
                span: token.span,
            }));
        }

        match Self::character_from_token(&token) {
            Some(character) => Some(character),
            None => {
                self.report(Diagnostic::at_token(DiagnosticKind::UnknownRegexPart, &token));
                None
            }
        }
    }
}
