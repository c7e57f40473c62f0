//! Property-based tests with proptest.
//!
//! Lexical shape properties: any identifier matching the documented
//! well-formedness rules lexes to a single identifier token with the
//! input text verbatim, and any valid decimal literal lexes to a number
//! token with the parsed value. Plus a structural property of the
//! precedence-climbing parser over random operator chains.

mod common;

use common::{lex_all, parse_expression};
use proptest::prelude::*;
use tern_syntax::{ExprKind, Token};

/// Well-formed identifier: letter start, letters/underscores, optional
/// trailing digit run, no doubled underscore, not a keyword.
fn identifier() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z_]{0,10}[0-9]{0,4}"
        .prop_filter("no doubled underscores", |s| !s.contains("__"))
        .prop_filter("keywords lex as keywords", |s| {
            !matches!(s.as_str(), "return" | "def" | "var")
        })
}

fn integral() -> impl Strategy<Value = String> {
    "[0-9]{1,6}".prop_map(|s| s)
}

fn fractional() -> impl Strategy<Value = String> {
    "[0-9]{1,4}\\.[0-9]{1,4}".prop_map(|s| s)
}

fn operator() -> impl Strategy<Value = char> {
    prop_oneof![Just('+'), Just('-'), Just('*'), Just('@')]
}

const fn precedence(op: char) -> i32 {
    match op {
        '+' | '-' => 20,
        _ => 40,
    }
}

proptest! {
    #[test]
    fn well_formed_identifiers_lex_verbatim(text in identifier()) {
        let (tokens, diags) = lex_all(&text);
        prop_assert_eq!(tokens, vec![Token::Identifier(text.clone())]);
        prop_assert!(diags.is_empty());
    }

    #[test]
    fn integral_literals_lex_to_their_value(text in integral()) {
        let expected: f64 = text.parse().expect("valid literal");
        let (tokens, diags) = lex_all(&text);
        prop_assert_eq!(tokens, vec![Token::Number(expected)]);
        prop_assert!(diags.is_empty());
    }

    #[test]
    fn fractional_literals_lex_to_their_value(text in fractional()) {
        let expected: f64 = text.parse().expect("valid literal");
        let (tokens, diags) = lex_all(&text);
        prop_assert_eq!(tokens, vec![Token::Number(expected)]);
        prop_assert!(diags.is_empty());
    }

    #[test]
    fn climbing_groups_by_precedence(
        a in 1..9i32,
        b in 1..9i32,
        c in 1..9i32,
        first in operator(),
        second in operator(),
    ) {
        let input = format!("{a}{first}{b}{second}{c}");
        let expr = parse_expression(&input).expect("parse failed");
        let ExprKind::Binary { op, lhs, rhs } = expr.kind else {
            panic!("expected a binary root");
        };

        if precedence(second) > precedence(first) {
            // The tighter trailing operator groups to the right.
            prop_assert_eq!(op, first);
            let rhs_is_binary = matches!(rhs.kind, ExprKind::Binary { .. });
            prop_assert!(rhs_is_binary);
            prop_assert_eq!(lhs.kind, ExprKind::Number(f64::from(a)));
        } else {
            // Equal or looser trailing operator associates left.
            prop_assert_eq!(op, second);
            let lhs_is_binary = matches!(lhs.kind, ExprKind::Binary { .. });
            prop_assert!(lhs_is_binary);
            prop_assert_eq!(rhs.kind, ExprKind::Number(f64::from(c)));
        }
    }
}
