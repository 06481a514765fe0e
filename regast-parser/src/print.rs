//! Prints the ast back to regex source.
//!
//! The output is canonical rather than a copy of the original input: every
//! structural character is escaped and quantifiers use their shortest form.
//! Parsing the printed output results in a tree that prints the same.

use crate::ast::{
    Alternation, BodyItem, CharSet, CharSetItem, CharSetRange, CharacterItem, Expression,
    GroupCapture, GroupNonCapture, Lookaround, Quantified, SubExpression,
};
use std::fmt::{Display, Formatter, Result, Write};

/// Where a character is printed. Escaping rules differ inside a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Body,
    Set,
}

fn is_structural(c: char) -> bool {
    matches!(
        c,
        '^' | '$' | '.' | '[' | ']' | '(' | ')' | '?' | '{' | '}' | '+' | '*' | '|' | '\\'
    )
}

fn write_char(f: &mut Formatter<'_>, c: char, context: Context) -> Result {
    match c {
        '\t' => f.write_str(r"\t"),
        '\n' => f.write_str(r"\n"),
        '\r' => f.write_str(r"\r"),
        '\u{b}' => f.write_str(r"\v"),
        '\u{c}' => f.write_str(r"\f"),
        '\u{8}' if context == Context::Set => f.write_str(r"\b"),
        '-' if context == Context::Set => f.write_str(r"\-"),
        c if is_structural(c) => write!(f, "\\{}", c),

        c => f.write_char(c),
    }
}

fn write_character_item(f: &mut Formatter<'_>, item: &CharacterItem, context: Context) -> Result {
    match item.escape_class() {
        Some(class) => write!(f, "\\{}", class.letter()),
        None => match item {
            CharacterItem::Character(character) => write_char(f, character.value, context),
            _ => unreachable!("only literal characters have no escape class"),
        },
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Expression::Alternation(alternation) => alternation.fmt(f),
            Expression::SubExpression(sub_expression) => sub_expression.fmt(f),
        }
    }
}

impl Display for Alternation {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}|{}", self.left, self.right)
    }
}

impl Display for SubExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        self.body.iter().try_for_each(|item| item.fmt(f))
    }
}

impl Display for BodyItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            BodyItem::Character(character) => character.fmt(f),
            BodyItem::StartCharacter(_) => f.write_char('^'),
            BodyItem::EndCharacter(_) => f.write_char('$'),
            BodyItem::AnyCharacter(_) => f.write_char('.'),
            BodyItem::CharSet(set) => set.fmt(f),
            BodyItem::GroupCapture(group) => group.fmt(f),
            BodyItem::GroupNonCapture(group) => group.fmt(f),
            BodyItem::Quantified(quantified) => quantified.fmt(f),
        }
    }
}

impl Display for CharacterItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_character_item(f, self, Context::Body)
    }
}

impl Display for CharSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_char('[')?;
        if self.invert {
            f.write_char('^')?;
        }
        self.body.iter().try_for_each(|item| item.fmt(f))?;
        f.write_char(']')
    }
}

impl Display for CharSetItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            CharSetItem::Character(character) => write_character_item(f, character, Context::Set),
            CharSetItem::Range(range) => range.fmt(f),
        }
    }
}

impl Display for CharSetRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_character_item(f, &self.start, Context::Set)?;
        f.write_char('-')?;
        write_character_item(f, &self.end, Context::Set)
    }
}

impl Display for GroupCapture {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match &self.name {
            Some(name) => write!(f, "(?<{}>{})", name, self.expression),
            None => write!(f, "({})", self.expression),
        }
    }
}

impl Display for GroupNonCapture {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let modifier = match self.kind {
            None => "?:",
            Some(Lookaround::PositiveLookahead) => "?=",
            Some(Lookaround::NegativeLookahead) => "?!",
            Some(Lookaround::PositiveLookbehind) => "?<=",
            Some(Lookaround::NegativeLookbehind) => "?<!",
        };

        write!(f, "({}{})", modifier, self.expression)
    }
}

impl Display for Quantified {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        self.item.fmt(f)?;

        // A `?` directly after a greedy quantifier would make it lazy.
        let after_greedy = matches!(
            *self.item,
            BodyItem::Quantified(Quantified { lazy: false, .. })
        );

        match (self.min, self.max) {
            (0, Some(1)) if !after_greedy => f.write_char('?')?,
            (0, None) => f.write_char('*')?,
            (1, None) => f.write_char('+')?,
            (min, None) => write!(f, "{{{},}}", min)?,
            (min, Some(max)) if min == max => write!(f, "{{{}}}", min)?,
            (min, Some(max)) => write!(f, "{{{},{}}}", min, max)?,
        }

        if self.lazy {
            f.write_char('?')?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Parser;

    fn reprint(input: &str) -> String {
        Parser::new(input).parse().expression.to_string()
    }

    #[test]
    fn canonical_output() {
        assert_eq!(reprint("a|b|c"), "a|b|c");
        assert_eq!(reprint(r"\q\.\t"), r"q\.\t");
        assert_eq!(reprint("a{0,1}b{0,}c{1,}d{2,2}e{2,5}?"), "a?b*c+d{2}e{2,5}?");
        assert_eq!(reprint("a{"), r"a\{");
        assert_eq!(reprint("[^a-z.-]"), r"[^a-z\.\-]");
        assert_eq!(reprint(r"[\b]\b"), r"[\b]\b");
        assert_eq!(reprint("(?<n>x)(?:y)(?<!z)"), "(?<n>x)(?:y)(?<!z)");
    }

    #[test]
    fn stacked_optional_quantifier() {
        assert_eq!(reprint("a*{0,1}"), "a*{0,1}");
        assert_eq!(reprint("a*??"), "a*??");
        assert_eq!(reprint(&reprint("a*{0,1}")), "a*{0,1}");
    }
}
