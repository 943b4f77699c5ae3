//! Parser for regex patterns
//!
//! This module provides a recursive descent parser that converts a
//! pattern string into a syntax tree. It makes a single left-to-right
//! pass with one cursor and never backtracks.
//!
//! Grammar (in order of precedence, lowest to highest):
//!   expr   := term ( '|' term )*
//!   term   := factor+
//!   factor := atom ( '*' | '+' | '?' )?
//!   atom   := '(' expr ')' | literal
//!   literal := any char except `( ) | * + ?`

use crate::ast::{Expr, is_operator};
use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::SyntaxError;
use indexmap::IndexSet;

/// Parser for regex patterns
pub struct Parser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser {
    /// Create a new parser for the given input string
    pub fn new(input: &str) -> Self {
        Self::with_max_depth(input, DEFAULT_MAX_DEPTH)
    }

    /// Create a parser that allows at most `max_depth` nested groups
    pub fn with_max_depth(input: &str, max_depth: usize) -> Self {
        Parser {
            chars: input.chars().collect(),
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    /// The character under the cursor, if any
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Parse the entire input and return the syntax tree
    pub fn parse(&mut self) -> Result<Expr, SyntaxError> {
        let expr = self.parse_expr()?;

        // Only a stray ')' can stop the top-level expression early
        if let Some(ch) = self.peek() {
            return Err(SyntaxError::UnexpectedOperator {
                ch,
                position: self.pos,
            });
        }

        Ok(expr)
    }

    /// expr := term ( '|' term )*
    fn parse_expr(&mut self) -> Result<Expr, SyntaxError> {
        let mut parts = vec![self.parse_term()?];

        while self.peek() == Some('|') {
            self.pos += 1; // consume '|'
            if self.pos == self.chars.len() {
                return Err(SyntaxError::UnexpectedEndOfInput);
            }
            parts.push(self.parse_term()?);
        }

        Expr::alternation(parts).ok_or(SyntaxError::EmptyTerm { position: self.pos })
    }

    /// term := factor+
    fn parse_term(&mut self) -> Result<Expr, SyntaxError> {
        let start = self.pos;
        let mut factors = Vec::new();

        while let Some(c) = self.peek() {
            if c == ')' || c == '|' {
                break;
            }
            factors.push(self.parse_factor()?);
        }

        Expr::concatenation(factors).ok_or(SyntaxError::EmptyTerm { position: start })
    }

    /// factor := atom ( '*' | '+' | '?' )?
    fn parse_factor(&mut self) -> Result<Expr, SyntaxError> {
        let atom = self.parse_atom()?;

        let expr = match self.peek() {
            Some('*') => Expr::star(atom),
            Some('+') => Expr::plus(atom),
            Some('?') => Expr::optional(atom),
            _ => return Ok(atom),
        };
        self.pos += 1;
        Ok(expr)
    }

    /// atom := '(' expr ')' | literal
    fn parse_atom(&mut self) -> Result<Expr, SyntaxError> {
        match self.peek() {
            None => Err(SyntaxError::UnexpectedEndOfInput),
            Some('(') => {
                let open = self.pos;
                if self.depth >= self.max_depth {
                    return Err(SyntaxError::NestingTooDeep {
                        position: open,
                        limit: self.max_depth,
                    });
                }
                self.depth += 1;
                self.pos += 1; // consume '('
                let expr = self.parse_expr()?;
                if self.peek() != Some(')') {
                    return Err(SyntaxError::UnmatchedParenthesis { position: open });
                }
                self.pos += 1; // consume ')'
                self.depth -= 1;
                Ok(expr)
            }
            Some(c) if is_operator(c) => Err(SyntaxError::UnexpectedOperator {
                ch: c,
                position: self.pos,
            }),
            Some(c) => {
                self.pos += 1;
                Ok(Expr::literal(c))
            }
        }
    }
}

/// Parse a regex pattern string into a syntax tree
///
/// Groups may nest [`DEFAULT_MAX_DEPTH`] levels deep; use
/// [`Parser::with_max_depth`] for another cap.
pub fn parse(input: &str) -> Result<Expr, SyntaxError> {
    let mut parser = Parser::new(input);
    parser.parse()
}

/// The alphabet of a pattern: every non-operator character, in order of
/// first appearance
pub fn symbols(input: &str) -> IndexSet<char> {
    input.chars().filter(|c| !is_operator(*c)).collect()
}
