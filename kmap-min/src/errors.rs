// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types returned by kmap-min.

use thiserror::Error;

/// An error encountered while tokenizing or evaluating a boolean expression.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ExpressionError {
    /// A character or word that is neither a variable, an operator keyword nor a parenthesis.
    #[error("unrecognized token {token:?} at position {position}")]
    Token { token: String, position: usize },

    /// The expression references a variable that has no assigned value.
    #[error("variable {0} has no assigned value")]
    UnboundVariable(char),

    /// A `)` without a matching `(`, or a `(` that is never closed.
    #[error("unmatched parenthesis at position {position}")]
    UnmatchedParen { position: usize },

    /// Evaluation finished without producing a value.
    #[error("expression produced no value")]
    EmptyExpression,

    /// An operator is missing an operand, e.g. `A and` or `(A or)`.
    #[error("operator `{operator}` is missing an operand")]
    MissingOperand { operator: &'static str },

    /// A variable or `(` where an operator was expected, e.g. `A (B)` or `A B and`.
    #[error("expression has an operand that is not joined by an operator")]
    UnexpectedOperand,

    /// An operator where an operand was expected, e.g. `and A B` or `A not`.
    #[error("unexpected operator `{operator}` at position {position}")]
    UnexpectedOperator {
        operator: &'static str,
        position: usize,
    },
}

/// An error constructing a K-map grid.
///
/// `InvalidShape` and `InvalidVariableCount` are the two ways a grid can fall outside the
/// supported 2×2, 2×4 and 4×4 shapes.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid shape {rows}x{cols} is not one of 2x2, 2x4 or 4x4")]
    InvalidShape { rows: usize, cols: usize },

    #[error("{0} variables cannot be mapped onto a K-map (expected 2, 3 or 4)")]
    InvalidVariableCount(usize),

    #[error("{actual} variable names given for a grid of {expected} variables")]
    VariableNames { expected: usize, actual: usize },

    #[error("grid has no rows")]
    Empty,

    #[error("grid row {row} has {actual} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("grid cell ({row}, {col}) has value {value}, expected 0 or 1")]
    InvalidNumeric { row: usize, col: usize, value: u8 },
}

/// An error constructing a truth table.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TruthTableError {
    #[error("{count} variables exceeds the maximum of {max}")]
    TooManyVariables { count: usize, max: usize },

    #[error("truth table has {actual} rows, expected a power of two with at least 2 rows")]
    RowCount { actual: usize },

    #[error("truth table row {row} has {actual} columns, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("truth table row {row}, column {col} has value {value}, expected 0 or 1")]
    InvalidNumeric { row: usize, col: usize, value: u8 },

    #[error("truth table row {row} is out of binary counting order")]
    RowOrder { row: usize },
}

/// Any error produced while minimizing a boolean function end to end.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Expression(#[from] ExpressionError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    TruthTable(#[from] TruthTableError),
}
