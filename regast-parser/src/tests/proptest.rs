use crate::{
    ast::{
        Alternation, BodyItem, CharSet, CharSetItem, CharSetRange, Character, CharacterItem,
        Expression, GroupCapture, GroupNonCapture, Lookaround, Quantified, SubExpression,
    },
    Parser,
};
use proptest::{collection, option::of, prelude::*};
use regast_lexer::{EscapeClass, Span};

const ESCAPE_CLASSES: [EscapeClass; 8] = [
    EscapeClass::Digit,
    EscapeClass::NonDigit,
    EscapeClass::WordBoundary,
    EscapeClass::NonWordBoundary,
    EscapeClass::WhiteSpace,
    EscapeClass::NonWhiteSpace,
    EscapeClass::Word,
    EscapeClass::NonWord,
];

fn literal(value: char) -> CharacterItem {
    CharacterItem::Character(Character {
        value,
        span: Span::default(),
    })
}

/// Inside a set `\b` reads as a backspace, so word boundaries only show up in
/// the body.
fn arb_character_item(in_set: bool) -> impl Strategy<Value = CharacterItem> {
    prop_oneof![
        any::<char>().prop_map(literal),
        prop::sample::select(ESCAPE_CLASSES.to_vec())
            .prop_filter("no word boundaries in sets", move |class| {
                !in_set || *class != EscapeClass::WordBoundary
            })
            .prop_map(|class| CharacterItem::from_escape(class, Span::default())),
    ]
}

fn arb_char_set_item() -> impl Strategy<Value = CharSetItem> {
    prop_oneof![
        arb_character_item(true).prop_map(CharSetItem::Character),
        (any::<char>(), any::<char>()).prop_map(|(a, b)| {
            CharSetItem::Range(CharSetRange {
                start: literal(a.min(b)),
                end: literal(a.max(b)),
                span: Span::default(),
            })
        }),
    ]
}

fn arb_char_set() -> impl Strategy<Value = BodyItem> {
    (any::<bool>(), collection::vec(arb_char_set_item(), 0..5)).prop_map(|(invert, body)| {
        BodyItem::CharSet(CharSet {
            invert,
            body,
            span: Span::default(),
        })
    })
}

fn arb_leaf_item() -> impl Strategy<Value = BodyItem> {
    prop_oneof![
        Just(BodyItem::StartCharacter(Span::default())),
        Just(BodyItem::EndCharacter(Span::default())),
        Just(BodyItem::AnyCharacter(Span::default())),
        arb_character_item(false).prop_map(BodyItem::Character),
        arb_char_set(),
    ]
}

fn arb_group(inner: BoxedStrategy<Expression>) -> impl Strategy<Value = BodyItem> {
    prop_oneof![
        (inner.clone(), of("[a-zA-Z_][a-zA-Z0-9_]{0,6}")).prop_map(|(expression, name)| {
            BodyItem::GroupCapture(GroupCapture {
                expression: Box::new(expression),
                name,
                span: Span::default(),
            })
        }),
        (inner, any::<Option<Lookaround>>()).prop_map(|(expression, kind)| {
            BodyItem::GroupNonCapture(GroupNonCapture {
                expression: Box::new(expression),
                kind,
                span: Span::default(),
            })
        }),
    ]
}

fn arb_quantifier() -> impl Strategy<Value = (u32, Option<u32>, bool)> {
    (0u32..5, of(0u32..=5), any::<bool>()).prop_map(|(min, extra, lazy)| {
        (min, extra.map(|extra| min + extra), lazy)
    })
}

/// Wraps `item` in zero or more stacked quantifiers.
fn arb_quantified(item: impl Strategy<Value = BodyItem>) -> impl Strategy<Value = BodyItem> {
    (item, collection::vec(arb_quantifier(), 0..3)).prop_map(|(item, quantifiers)| {
        quantifiers
            .into_iter()
            .fold(item, |item, (min, max, lazy)| {
                BodyItem::Quantified(Quantified {
                    item: Box::new(item),
                    min,
                    max,
                    lazy,
                    span: Span::default(),
                })
            })
    })
}

fn arb_sub_expression(item: impl Strategy<Value = BodyItem>) -> impl Strategy<Value = SubExpression> {
    collection::vec(item, 0..5).prop_map(|body| SubExpression {
        body,
        span: Span::default(),
    })
}

fn arb_alternatives(item: impl Strategy<Value = BodyItem>) -> impl Strategy<Value = Expression> {
    collection::vec(arb_sub_expression(item), 1..4).prop_map(|alternatives| {
        let mut alternatives = alternatives.into_iter();
        let first = alternatives
            .next()
            .expect("there should always be one alternative");

        alternatives.fold(Expression::SubExpression(first), |left, right| {
            Expression::Alternation(Alternation {
                left: Box::new(left),
                right,
                span: Span::default(),
            })
        })
    })
}

fn arb_expression() -> impl Strategy<Value = Expression> {
    let leaf = arb_alternatives(arb_quantified(arb_leaf_item()));

    leaf.prop_recursive(4, 64, 5, |inner| {
        let item = prop_oneof![arb_leaf_item(), arb_group(inner)].boxed();
        arb_alternatives(arb_quantified(item))
    })
}

/// Calls `f` with every body item of the tree, depth first.
fn visit_body_items(expression: &Expression, f: &mut impl FnMut(&BodyItem)) {
    for alternative in expression.alternatives() {
        for item in &alternative.body {
            visit_body_item(item, f);
        }
    }
}

fn visit_body_item(item: &BodyItem, f: &mut impl FnMut(&BodyItem)) {
    f(item);

    match item {
        BodyItem::GroupCapture(GroupCapture { expression, .. })
        | BodyItem::GroupNonCapture(GroupNonCapture { expression, .. }) => {
            visit_body_items(expression, f)
        }
        BodyItem::Quantified(quantified) => visit_body_item(&quantified.item, f),

        _ => {}
    }
}

/// Calls `f` with every sub expression of the tree, depth first.
fn visit_sub_expressions(expression: &Expression, f: &mut impl FnMut(&SubExpression)) {
    for alternative in expression.alternatives() {
        f(alternative);
    }

    visit_body_items(expression, &mut |item: &BodyItem| match item {
        BodyItem::GroupCapture(GroupCapture { expression, .. })
        | BodyItem::GroupNonCapture(GroupNonCapture { expression, .. }) => {
            for alternative in expression.alternatives() {
                f(alternative);
            }
        }

        _ => {}
    });
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    #[test]
    fn printed_trees_parse_cleanly(expression in arb_expression()) {
        let printed = expression.to_string();
        let output = Parser::new(&printed).parse();

        prop_assert!(
            output.diagnostics.is_empty(),
            "`{}` reported:\n{}",
            printed,
            output.diagnostics
        );
        prop_assert_eq!(output.expression.to_string(), printed);
    }

    #[test]
    fn any_input_parses(input in any::<String>()) {
        let len = input.chars().count();
        let output = Parser::new(&input).parse();
        let expression = &output.expression;

        let mut failures = Vec::new();
        visit_body_items(expression, &mut |item: &BodyItem| {
            let span = item.span();
            if span.is_empty() || span.end > len {
                failures.push(format!("bad span {} for {:?}", span, item));
            }

            match item {
                BodyItem::Quantified(Quantified { min, max: Some(max), .. }) if max < min => {
                    failures.push(format!("quantifier {{{},{}}}", min, max));
                }
                BodyItem::CharSet(set) => {
                    for item in &set.body {
                        if let CharSetItem::Range(CharSetRange {
                            start: CharacterItem::Character(start),
                            end: CharacterItem::Character(end),
                            ..
                        }) = item
                        {
                            if start.value > end.value {
                                failures.push(format!("range {}-{}", start.value, end.value));
                            }
                        }
                    }
                }

                _ => {}
            }
        });
        prop_assert!(failures.is_empty(), "`{}`: {:?}", input, failures);

        if output.diagnostics.is_empty() {
            visit_sub_expressions(expression, &mut |alternative: &SubExpression| {
                for pair in alternative.body.windows(2) {
                    if pair[0].span().end != pair[1].span().start {
                        failures.push(format!("gap between {:?} and {:?}", pair[0], pair[1]));
                    }
                }
            });
            prop_assert!(failures.is_empty(), "`{}`: {:?}", input, failures);
        }

        let printed = expression.to_string();
        let reprinted = Parser::new(&printed).parse().expression.to_string();
        prop_assert_eq!(reprinted, printed);
    }
}
