//! Syntax tree for regex patterns
//!
//! This module defines the tree produced by the parser. The supported
//! syntax is deliberately small:
//! - Literals (any character except `( ) | * + ?`)
//! - Concatenation and alternation (`|`)
//! - Postfix operators `*`, `+` and `?`
//! - Grouping with parentheses (groups leave no node of their own)

use std::fmt;

/// Characters reserved as regex operators
pub const OPERATORS: &[char] = &['(', ')', '|', '*', '+', '?'];

/// Returns true if `c` is one of the reserved operator characters
pub fn is_operator(c: char) -> bool {
    OPERATORS.contains(&c)
}

/// A node in the syntax tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A literal character
    Literal(char),

    /// Two or more expressions in sequence
    Concatenation(Vec<Expr>),

    /// Two or more alternatives (e.g., a|b|c)
    Alternation(Vec<Expr>),

    /// Zero or more repetitions (*)
    Star(Box<Expr>),

    /// One or more repetitions (+)
    Plus(Box<Expr>),

    /// Zero or one occurrence (?)
    Optional(Box<Expr>),
}

impl Expr {
    /// Create a literal expression
    pub fn literal(c: char) -> Self {
        Expr::Literal(c)
    }

    /// Create a concatenation, collapsing a single part into itself
    ///
    /// Returns `None` for an empty vector since the tree has no empty node.
    pub fn concatenation(mut exprs: Vec<Expr>) -> Option<Self> {
        match exprs.len() {
            0 => None,
            1 => exprs.pop(),
            _ => Some(Expr::Concatenation(exprs)),
        }
    }

    /// Create an alternation, collapsing a single part into itself
    pub fn alternation(mut exprs: Vec<Expr>) -> Option<Self> {
        match exprs.len() {
            0 => None,
            1 => exprs.pop(),
            _ => Some(Expr::Alternation(exprs)),
        }
    }

    /// Create a starred expression
    pub fn star(expr: Expr) -> Self {
        Expr::Star(Box::new(expr))
    }

    /// Create a plus expression
    pub fn plus(expr: Expr) -> Self {
        Expr::Plus(Box::new(expr))
    }

    /// Create an optional expression
    pub fn optional(expr: Expr) -> Self {
        Expr::Optional(Box::new(expr))
    }

    /// Precedence used when rendering: alternation < concatenation < postfix
    fn precedence(&self) -> u8 {
        match self {
            Expr::Alternation(_) => 0,
            Expr::Concatenation(_) => 1,
            Expr::Star(_) | Expr::Plus(_) | Expr::Optional(_) => 2,
            Expr::Literal(_) => 3,
        }
    }

    /// Render a child, parenthesized when it binds looser than `min`
    fn render_child(child: &Expr, min: u8) -> String {
        if child.precedence() < min {
            format!("({})", child.to_regex_string())
        } else {
            child.to_regex_string()
        }
    }

    /// Convert the tree back to a regex string with minimal parentheses
    pub fn to_regex_string(&self) -> String {
        match self {
            Expr::Literal(c) => c.to_string(),
            Expr::Concatenation(parts) => parts
                .iter()
                .map(|part| Self::render_child(part, 2))
                .collect(),
            Expr::Alternation(parts) => {
                let parts: Vec<_> = parts.iter().map(|part| part.to_regex_string()).collect();
                parts.join("|")
            }
            Expr::Star(sub) => format!("{}*", Self::render_child(sub, 3)),
            Expr::Plus(sub) => format!("{}+", Self::render_child(sub, 3)),
            Expr::Optional(sub) => format!("{}?", Self::render_child(sub, 3)),
        }
    }

    /// Collect the alphabet characters of the tree in order of appearance
    pub fn literals(&self) -> Vec<char> {
        let mut out = Vec::new();
        self.collect_literals(&mut out);
        out
    }

    fn collect_literals(&self, out: &mut Vec<char>) {
        match self {
            Expr::Literal(c) => out.push(*c),
            Expr::Concatenation(parts) | Expr::Alternation(parts) => {
                for part in parts {
                    part.collect_literals(out);
                }
            }
            Expr::Star(sub) | Expr::Plus(sub) | Expr::Optional(sub) => sub.collect_literals(out),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_regex_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal() {
        let expr = Expr::literal('a');
        assert_eq!(expr.to_regex_string(), "a");
    }

    #[test]
    fn test_concatenation() {
        let expr = Expr::concatenation(vec![
            Expr::literal('a'),
            Expr::literal('b'),
            Expr::literal('c'),
        ])
        .unwrap();
        assert_eq!(expr.to_regex_string(), "abc");
    }

    #[test]
    fn test_single_part_collapses() {
        let expr = Expr::concatenation(vec![Expr::literal('a')]).unwrap();
        assert_eq!(expr, Expr::Literal('a'));
        let expr = Expr::alternation(vec![Expr::literal('b')]).unwrap();
        assert_eq!(expr, Expr::Literal('b'));
    }

    #[test]
    fn test_empty_parts() {
        assert!(Expr::concatenation(vec![]).is_none());
        assert!(Expr::alternation(vec![]).is_none());
    }

    #[test]
    fn test_alternation() {
        let expr = Expr::alternation(vec![
            Expr::literal('a'),
            Expr::literal('b'),
            Expr::literal('c'),
        ])
        .unwrap();
        assert_eq!(expr.to_regex_string(), "a|b|c");
    }

    #[test]
    fn test_postfix_operators() {
        assert_eq!(Expr::star(Expr::literal('a')).to_regex_string(), "a*");
        assert_eq!(Expr::plus(Expr::literal('a')).to_regex_string(), "a+");
        assert_eq!(Expr::optional(Expr::literal('a')).to_regex_string(), "a?");
    }

    #[test]
    fn test_parenthesized_rendering() {
        // (a|b)*c
        let alt = Expr::alternation(vec![Expr::literal('a'), Expr::literal('b')]).unwrap();
        let expr = Expr::concatenation(vec![Expr::star(alt), Expr::literal('c')]).unwrap();
        assert_eq!(expr.to_string(), "(a|b)*c");
    }

    #[test]
    fn test_nested_postfix_rendering() {
        let expr = Expr::star(Expr::plus(Expr::literal('a')));
        assert_eq!(expr.to_string(), "(a+)*");
    }

    #[test]
    fn test_literals_in_order() {
        let alt = Expr::alternation(vec![Expr::literal('b'), Expr::literal('a')]).unwrap();
        let expr = Expr::concatenation(vec![alt, Expr::literal('b')]).unwrap();
        assert_eq!(expr.literals(), vec!['b', 'a', 'b']);
    }

    #[test]
    fn test_is_operator() {
        for c in ['(', ')', '|', '*', '+', '?'] {
            assert!(is_operator(c));
        }
        assert!(!is_operator('a'));
        assert!(!is_operator('&'));
    }
}
