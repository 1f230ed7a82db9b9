// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Infix boolean expressions over single-letter variables.
//!
//! Supported operators, from loosest to tightest binding: `or`, `and`, `xor`, `not` (prefix)
//! and `nand`. Keywords are case-insensitive; parentheses group.

mod eval;
mod token;

pub use token::*;

use crate::errors::ExpressionError;
use eval::StackMachine;
use itertools::Itertools;
use std::collections::BTreeMap;

/// Values assigned to variables for a single evaluation.
pub type Assignment = BTreeMap<char, bool>;

/// A tokenized boolean expression, ready to be evaluated against any number of assignments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expression {
    source: String,
    tokens: Vec<Token>,
}

impl Expression {
    pub fn parse(source: impl Into<String>) -> Result<Self, ExpressionError> {
        let source = source.into();
        let tokens = tokenize(&source)?;
        Ok(Self { source, tokens })
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the distinct variables referenced by this expression, in sorted order.
    pub fn variables(&self) -> Vec<char> {
        self.tokens
            .iter()
            .filter_map(|token| match token.kind {
                TokenKind::Variable(var) => Some(var),
                _ => None,
            })
            .sorted()
            .dedup()
            .collect()
    }

    pub fn evaluate(&self, assignment: &Assignment) -> Result<bool, ExpressionError> {
        self.evaluate_with(|var| assignment.get(&var).copied())
    }

    /// Evaluates the expression, looking variable values up through `lookup`.
    pub fn evaluate_with(
        &self,
        lookup: impl Fn(char) -> Option<bool>,
    ) -> Result<bool, ExpressionError> {
        StackMachine::default().run(&self.tokens, lookup)
    }
}

/// Tokenizes and evaluates `expr` for one assignment.
///
/// # Examples
///
/// ```
/// use kmap_min::expr::{evaluate, Assignment};
///
/// let assignment: Assignment = [('A', true), ('B', false)].into_iter().collect();
/// assert_eq!(evaluate("A and B", &assignment), Ok(false));
/// assert_eq!(evaluate("A or B", &assignment), Ok(true));
/// ```
pub fn evaluate(expr: &str, assignment: &Assignment) -> Result<bool, ExpressionError> {
    Expression::parse(expr)?.evaluate(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variables() {
        let expr = Expression::parse("(C and A) or (B xor A) nand C").unwrap();
        assert_eq!(expr.variables(), vec!['A', 'B', 'C']);

        let expr = Expression::parse("NOT X OR y").unwrap();
        assert_eq!(expr.variables(), vec!['X', 'y']);
    }

    #[test]
    fn test_parse_error_is_reported_before_evaluation() {
        let err = Expression::parse("A | B").unwrap_err();
        assert!(matches!(err, ExpressionError::Token { position: 2, .. }));
    }
}
