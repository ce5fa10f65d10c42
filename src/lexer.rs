//! Tokenization for infixcalc
//!
//! Three small pieces run before conversion:
//! - classification predicates for identifiers and integer literals
//! - sign normalization, collapsing runs like `--` or `+-+` into one sign
//! - tokenization, splitting around operators and parentheses

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{multispace0, one_of},
    combinator::recognize,
    multi::many0,
    sequence::preceded,
    IResult,
};

/// Characters that always form a token of their own
const PUNCTUATION: &str = "()+-*/^";

/// True iff `s` is non-empty and made of ASCII letters only
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic())
}

/// True iff `s` parses as a base-10 `i64` (optional leading sign)
pub fn is_number(s: &str) -> bool {
    s.parse::<i64>().is_ok()
}

/// Replace `from` with `to` until no occurrence is left
fn replace_until_gone(mut expr: String, from: &str, to: &str) -> String {
    while expr.contains(from) {
        expr = expr.replace(from, to);
    }
    expr
}

/// Collapse runs of adjacent `+`/`-` into a single sign.
///
/// Rewrites `++` -> `+`, `--` -> `+`, `+-` -> `-`, `-+` -> `-` in that order,
/// repeating the whole group until nothing changes. Every rewrite keeps the
/// parity of minus signs, so a run ends up as `-` for an odd count of `-` and
/// `+` otherwise. Only textually adjacent signs are merged.
pub fn normalize(expr: &str) -> String {
    let mut current = expr.to_string();
    loop {
        let mut next = replace_until_gone(current.clone(), "++", "+");
        next = replace_until_gone(next, "--", "+");
        next = replace_until_gone(next, "+-", "-");
        next = replace_until_gone(next, "-+", "-");
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Parse a single operator or parenthesis
fn punctuation(input: &str) -> IResult<&str, &str> {
    recognize(one_of(PUNCTUATION))(input)
}

/// Parse a run of anything that is neither whitespace nor punctuation
fn word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && !PUNCTUATION.contains(c))(input)
}

/// Parse any single token
fn token(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, alt((punctuation, word)))(input)
}

/// Split an expression into raw tokens.
///
/// Every operator and parenthesis becomes its own token; the rest is split on
/// whitespace. A `-` is never merged into a following number.
pub fn tokenize(expr: &str) -> Vec<String> {
    match many0(token)(expr) {
        Ok((_, tokens)) => tokens.into_iter().map(String::from).collect(),
        // `token` always consumes input on success, so many0 cannot fail
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_letters_only() {
        assert!(is_identifier("a"));
        assert!(is_identifier("Foo"));
        assert!(is_identifier("xyz"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a1"));
        assert!(!is_identifier("a_b"));
        assert!(!is_identifier("é"));
        assert!(!is_identifier("x "));
    }

    #[test]
    fn numbers_follow_i64_parse() {
        assert!(is_number("0"));
        assert!(is_number("-17"));
        assert!(is_number("+17"));
        assert!(is_number("9223372036854775807"));
        assert!(!is_number("9223372036854775808"));
        assert!(!is_number("1 2"));
        assert!(!is_number("12a"));
        assert!(!is_number(""));
    }

    #[test]
    fn normalize_minus_runs() {
        assert_eq!(normalize("--5"), "+5");
        assert_eq!(normalize("---5"), "-5");
        assert_eq!(normalize("----5"), "+5");
        assert_eq!(normalize("3 --- 2"), "3 - 2");
    }

    #[test]
    fn normalize_mixed_runs() {
        assert_eq!(normalize("3 +- 2"), "3 - 2");
        assert_eq!(normalize("3 -+ 2"), "3 - 2");
        assert_eq!(normalize("3 +++ 2"), "3 + 2");
        assert_eq!(normalize("3 +--+ 2"), "3 + 2");
        assert_eq!(normalize("1 +-+-+- 1"), "1 - 1");
    }

    #[test]
    fn normalize_leaves_other_operators() {
        assert_eq!(normalize("3 ** 2"), "3 ** 2");
        assert_eq!(normalize("8 // 2"), "8 // 2");
        assert_eq!(normalize("- - 5"), "- - 5");
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in ["+++", "+--", "-+-+-", "a--b++c", "((--1))", "2 ^ -+-3", ""] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input {:?}", input);
        }
    }

    #[test]
    fn tokenize_splits_operators() {
        assert_eq!(tokenize("1+2*x"), vec!["1", "+", "2", "*", "x"]);
        assert_eq!(
            tokenize("(a - 3)^2"),
            vec!["(", "a", "-", "3", ")", "^", "2"]
        );
    }

    #[test]
    fn tokenize_never_merges_signs() {
        assert_eq!(tokenize("-5"), vec!["-", "5"]);
        assert_eq!(tokenize("2*-5"), vec!["2", "*", "-", "5"]);
    }

    #[test]
    fn tokenize_skips_whitespace() {
        assert_eq!(tokenize("   12   +\t7  "), vec!["12", "+", "7"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize("    ").is_empty());
    }

    #[test]
    fn tokenize_keeps_unknown_words() {
        assert_eq!(tokenize("3 $ 4a"), vec!["3", "$", "4a"]);
        assert_eq!(tokenize("**"), vec!["*", "*"]);
    }
}
