//! Token model for infixcalc
//!
//! Tokens are classified once, right after tokenization, and flow unchanged
//! through the converter and the evaluator. A postfix sequence is just a
//! `Vec<Token>` in Reverse Polish order.

use std::fmt;

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
    Pow, // ^
}

/// How operators of equal precedence group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

impl Operator {
    /// Map an operator character to its operator
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '^' => Some(Operator::Pow),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Pow => '^',
        }
    }

    /// Binding strength: `^` = 3, `*` `/` = 2, `+` `-` = 1
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Pow => 3,
            Operator::Mul | Operator::Div => 2,
            Operator::Add | Operator::Sub => 1,
        }
    }

    /// Only `^` groups right-to-left
    pub fn associativity(self) -> Associativity {
        match self {
            Operator::Pow => Associativity::Right,
            _ => Associativity::Left,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An integer literal
    Number(i64),
    /// A variable name (ASCII letters only)
    Identifier(String),
    /// A binary operator
    Operator(Operator),
    /// Unary minus; only produced by the converter, never by the tokenizer
    Negate,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
}

impl Token {
    /// Classify a raw token string.
    ///
    /// Operators and parentheses are checked first, then integer literals,
    /// then identifiers. Returns `None` for anything else.
    pub fn classify(raw: &str) -> Option<Token> {
        match raw {
            "(" => return Some(Token::LeftParen),
            ")" => return Some(Token::RightParen),
            _ => {}
        }

        let mut chars = raw.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(op) = Operator::from_symbol(c) {
                return Some(Token::Operator(op));
            }
        }

        if let Ok(n) = raw.parse::<i64>() {
            return Some(Token::Number(n));
        }
        if crate::lexer::is_identifier(raw) {
            return Some(Token::Identifier(raw.to_string()));
        }
        None
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Operator(op) => write!(f, "{}", op),
            Token::Negate => write!(f, "neg"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
        }
    }
}

/// Render a token sequence space-separated (used for postfix traces)
pub fn join_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_table() {
        assert_eq!(Operator::Pow.precedence(), 3);
        assert_eq!(Operator::Mul.precedence(), 2);
        assert_eq!(Operator::Div.precedence(), 2);
        assert_eq!(Operator::Add.precedence(), 1);
        assert_eq!(Operator::Sub.precedence(), 1);
    }

    #[test]
    fn only_pow_is_right_associative() {
        assert_eq!(Operator::Pow.associativity(), Associativity::Right);
        for op in [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div] {
            assert_eq!(op.associativity(), Associativity::Left);
        }
    }

    #[test]
    fn classify_operators_and_parens() {
        assert_eq!(Token::classify("("), Some(Token::LeftParen));
        assert_eq!(Token::classify(")"), Some(Token::RightParen));
        assert_eq!(Token::classify("^"), Some(Token::Operator(Operator::Pow)));
        assert_eq!(Token::classify("-"), Some(Token::Operator(Operator::Sub)));
    }

    #[test]
    fn classify_literals_and_names() {
        assert_eq!(Token::classify("42"), Some(Token::Number(42)));
        assert_eq!(Token::classify("-42"), Some(Token::Number(-42)));
        assert_eq!(
            Token::classify("Foo"),
            Some(Token::Identifier("Foo".to_string()))
        );
    }

    #[test]
    fn classify_rejects_garbage() {
        assert_eq!(Token::classify("a1"), None);
        assert_eq!(Token::classify("1a"), None);
        assert_eq!(Token::classify("**"), None);
        assert_eq!(Token::classify("x_y"), None);
        assert_eq!(Token::classify("99999999999999999999"), None);
    }

    #[test]
    fn display_postfix() {
        let tokens = vec![
            Token::Number(2),
            Token::Identifier("x".to_string()),
            Token::Negate,
            Token::Operator(Operator::Mul),
        ];
        assert_eq!(join_tokens(&tokens), "2 x neg *");
    }
}
