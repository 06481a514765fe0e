use super::{Parser, MAX_GROUP_DEPTH};
use crate::{
    ast::{BodyItem, GroupCapture, GroupNonCapture, Lookaround},
    diagnostics::{Diagnostic, DiagnosticKind},
};
use regast_lexer::{Token, TokenKind};

/// What follows the `?` at the start of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
enum GroupModifier {
    /// `?:`, `?=`, `?!`, `?<=` and `?<!`.
    NonCapturing(Option<Lookaround>),
    /// `?<name>`
    Named(String),
}

impl Parser {
    /// Rule: `group ::= LEFT_PAREN group_modifier? expression RIGHT_PAREN`
    ///
    /// Returns `None` when the group is nested too deeply. The whole group is
    /// skipped in that case.
    pub(super) fn parse_group(&mut self) -> Option<BodyItem> {
        if self.depth == MAX_GROUP_DEPTH {
            let start = self.tokens.position();
            self.skip_group();
            self.report(Diagnostic::new(
                DiagnosticKind::GroupNestedTooDeeply,
                self.tokens.span_from(start),
            ));
            return None;
        }

        // LEFT_PAREN
        let open = self.tokens.advance();

        // group_modifier?
        let modifier = match self.tokens.current().kind {
            TokenKind::QuestionMark => self.parse_group_modifier(),
            _ => None,
        };

        // expression
        self.depth += 1;
        let expression = Box::new(
            self.parse_expression(|tokens| tokens.current().kind != TokenKind::RightParen),
        );
        self.depth -= 1;

        // RIGHT_PAREN
        if self.tokens.eat(TokenKind::RightParen).is_none() {
            self.report(Diagnostic::at_token(DiagnosticKind::UnclosedGroup, &open));
        }

        let span = self.tokens.span_from(open.span.start);
        let item = match modifier {
            Some(GroupModifier::NonCapturing(kind)) => BodyItem::GroupNonCapture(GroupNonCapture {
                expression,
                kind,
                span,
            }),
            Some(GroupModifier::Named(name)) => BodyItem::GroupCapture(GroupCapture {
                expression,
                name: Some(name),
                span,
            }),
            None => BodyItem::GroupCapture(GroupCapture {
                expression,
                name: None,
                span,
            }),
        };

        Some(item)
    }

    /// Consumes the group at the cursor up to its matching `)` without
    /// building anything. Parentheses inside character sets do not count.
    fn skip_group(&mut self) {
        let mut open_groups = 0usize;

        loop {
            match self.tokens.advance().kind {
                TokenKind::LeftParen => open_groups += 1,
                TokenKind::RightParen => {
                    open_groups -= 1;
                    if open_groups == 0 {
                        return;
                    }
                }
                TokenKind::LeftBracket => {
                    // `]` right after `[` or `[^` closes the set.
                    self.tokens.eat(TokenKind::Caret);
                    while !matches!(
                        self.tokens.advance().kind,
                        TokenKind::RightBracket | TokenKind::Eof
                    ) {}
                }
                TokenKind::Eof => return,

                _ => {}
            }
        }
    }

    /// Rule: `group_modifier ::= "?:" | "?=" | "?!" | "?<=" | "?<!" | "?<"
    /// NAME ">"`
    ///
    /// Consumes the leading `?`. An unknown modifier is reported and the group
    /// falls back to an unnamed capturing group.
    fn parse_group_modifier(&mut self) -> Option<GroupModifier> {
        let question_mark = self.tokens.advance();
        let token = self.tokens.current();

        let lookaround = match token.kind {
            TokenKind::Character {
                value,
                escaped: false,
            } => match value {
                ':' => None,
                '=' => Some(Lookaround::PositiveLookahead),
                '!' => Some(Lookaround::NegativeLookahead),
                '<' => return self.parse_lookbehind_or_name(question_mark),

                _ => return self.invalid_group_modifier(&question_mark),
            },

            _ => return self.invalid_group_modifier(&question_mark),
        };

        self.tokens.advance();
        Some(GroupModifier::NonCapturing(lookaround))
    }

    /// Handles the modifiers starting with `?<`. The cursor is at the `<`.
    fn parse_lookbehind_or_name(&mut self, question_mark: Token) -> Option<GroupModifier> {
        let next = self.tokens.lookahead();

        let lookaround = if next.kind.is_raw_character('=') {
            Lookaround::PositiveLookbehind
        } else if next.kind.is_raw_character('!') {
            Lookaround::NegativeLookbehind
        } else {
            return match self.scan_group_name() {
                Some(name) => {
                    // `<`, the name and `>` are all single character tokens.
                    for _ in 0..name.chars().count() + 2 {
                        self.tokens.advance();
                    }
                    Some(GroupModifier::Named(name))
                }
                None => self.invalid_group_modifier(&question_mark),
            };
        };

        self.tokens.advance();
        self.tokens.advance();
        Some(GroupModifier::NonCapturing(Some(lookaround)))
    }

    /// Looks ahead for `NAME ">"` after the current `<` token without moving
    /// the cursor.
    fn scan_group_name(&self) -> Option<String> {
        let mut name = String::new();
        let mut token = self.tokens.lookahead();

        loop {
            match token.kind {
                TokenKind::Character {
                    value: '>',
                    escaped: false,
                } if !name.is_empty() => return Some(name),
                TokenKind::Character {
                    value,
                    escaped: false,
                } if is_identifier_char(value, name.is_empty()) => name.push(value),

                _ => return None,
            }

            token = self.tokens.lookahead_from(&token);
        }
    }

    fn invalid_group_modifier(&mut self, question_mark: &Token) -> Option<GroupModifier> {
        self.report(Diagnostic::at_token(
            DiagnosticKind::InvalidCaptureGroupModifier,
            question_mark,
        ));
        None
    }
}

/// Whether `c` can appear in a group name. The first character of a name
/// cannot be a digit.
fn is_identifier_char(c: char, first: bool) -> bool {
    match first {
        true => c == '_' || c.is_alphabetic(),
        false => c == '_' || c.is_alphanumeric(),
    }
}
