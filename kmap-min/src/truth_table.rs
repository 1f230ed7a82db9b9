// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::{Error, TruthTableError},
    expr::Expression,
};
use bitvec::prelude::*;
use itertools::Itertools;
use log::debug;
use std::fmt;

/// The maximum number of variables a truth table can have.
pub const MAX_VARIABLES: usize = 16;

/// A single-output truth table.
///
/// Rows are in binary counting order of the inputs, with the first variable as the most
/// significant bit. Only the output column is stored: the inputs of row `i` are the bits of `i`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TruthTable {
    variables: Vec<char>,
    outputs: BitVec,
}

impl TruthTable {
    /// Creates a table over `variable_count` positionally named variables (`A`, `B`, ...) with
    /// every output set to 0.
    pub fn new(variable_count: usize) -> Result<Self, TruthTableError> {
        check_variable_count(variable_count)?;
        Ok(Self {
            variables: positional_variables(variable_count),
            outputs: bitvec![0; 1 << variable_count],
        })
    }

    /// Creates a table from its output column. The number of outputs must be a power of two.
    pub fn from_outputs(outputs: impl IntoIterator<Item = bool>) -> Result<Self, TruthTableError> {
        let outputs: BitVec = outputs.into_iter().collect();
        let variable_count = variable_count_for_rows(outputs.len())?;
        Ok(Self {
            variables: positional_variables(variable_count),
            outputs,
        })
    }

    /// Creates a table from explicit `n + 1`-wide rows of 0s and 1s: `n` inputs followed by
    /// the output.
    ///
    /// The rows must be complete and in binary counting order.
    ///
    /// # Examples
    ///
    /// ```
    /// use kmap_min::truth_table::TruthTable;
    ///
    /// let table = TruthTable::from_numeric([[0u8, 0, 0], [0, 1, 1], [1, 0, 1], [1, 1, 0]]).unwrap();
    /// assert_eq!(table.variable_count(), 2);
    /// assert!(table.output(2));
    /// ```
    pub fn from_numeric<R: AsRef<[u8]>>(
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Self, TruthTableError> {
        let rows: Vec<R> = rows.into_iter().collect();
        let variable_count = variable_count_for_rows(rows.len())?;
        let width = variable_count + 1;

        let mut outputs: BitVec = BitVec::with_capacity(rows.len());
        for (row_ix, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(TruthTableError::RowWidth {
                    row: row_ix,
                    expected: width,
                    actual: row.len(),
                });
            }

            let mut bits = row.iter().enumerate().map(|(col, &value)| match value {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(TruthTableError::InvalidNumeric {
                    row: row_ix,
                    col,
                    value,
                }),
            });
            for var_ix in 0..variable_count {
                let bit = bits.next().expect("row width was checked")?;
                if bit != input_bit(row_ix, variable_count, var_ix) {
                    return Err(TruthTableError::RowOrder { row: row_ix });
                }
            }
            outputs.push(bits.next().expect("row width was checked")?);
        }

        Ok(Self {
            variables: positional_variables(variable_count),
            outputs,
        })
    }

    /// Enumerates every assignment of the expression's variables and evaluates it.
    ///
    /// The expression's variables, in sorted order, become the table's columns.
    pub fn from_expression(expr: &Expression) -> Result<Self, Error> {
        let variables = expr.variables();
        let variable_count = variables.len();
        if variable_count > MAX_VARIABLES {
            return Err(TruthTableError::TooManyVariables {
                count: variable_count,
                max: MAX_VARIABLES,
            }
            .into());
        }

        let row_count = 1 << variable_count;
        let mut outputs: BitVec = BitVec::with_capacity(row_count);
        for row_ix in 0..row_count {
            let output = expr.evaluate_with(|var| {
                variables
                    .iter()
                    .position(|&v| v == var)
                    .map(|var_ix| input_bit(row_ix, variable_count, var_ix))
            })?;
            outputs.push(output);
        }
        debug!(
            "truth table for {:?}: {} variables, {} ones",
            expr.source(),
            variable_count,
            outputs.count_ones()
        );
        Ok(Self { variables, outputs })
    }

    #[inline]
    pub fn variables(&self) -> &[char] {
        &self.variables
    }

    #[inline]
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.outputs.len()
    }

    #[inline]
    pub fn outputs(&self) -> &BitSlice {
        &self.outputs
    }

    /// Returns the output of row `row_ix`.
    ///
    /// # Panics
    ///
    /// Panics if `row_ix` is out of range.
    #[inline]
    pub fn output(&self, row_ix: usize) -> bool {
        self.outputs[row_ix]
    }

    /// Sets the output of row `row_ix`.
    ///
    /// # Panics
    ///
    /// Panics if `row_ix` is out of range.
    #[inline]
    pub fn set_output(&mut self, row_ix: usize, value: bool) {
        self.outputs.set(row_ix, value);
    }

    /// Returns the value of input `var_ix` in row `row_ix`.
    #[inline]
    pub fn input(&self, row_ix: usize, var_ix: usize) -> bool {
        input_bit(row_ix, self.variable_count(), var_ix)
    }

    pub fn rows(&self) -> impl Iterator<Item = TruthRow<'_>> + '_ {
        (0..self.row_count()).map(move |index| TruthRow { table: self, index })
    }

    /// Returns the table as `n + 1`-wide rows of 0s and 1s.
    pub fn to_numeric(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| {
                row.inputs()
                    .chain(std::iter::once(row.output()))
                    .map(u8::from)
                    .collect()
            })
            .collect()
    }
}

/// A row of a [`TruthTable`].
#[derive(Clone, Copy, Debug)]
pub struct TruthRow<'a> {
    table: &'a TruthTable,
    index: usize,
}

impl<'a> TruthRow<'a> {
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn inputs(&self) -> impl Iterator<Item = bool> + 'a {
        let (table, index) = (self.table, self.index);
        (0..table.variable_count()).map(move |var_ix| table.input(index, var_ix))
    }

    #[inline]
    pub fn output(&self) -> bool {
        self.table.output(self.index)
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} | F", self.variables.iter().join(" "))?;
        writeln!(f, "{}-+--", "-".repeat(2 * self.variable_count() - 1))?;
        for row in self.rows() {
            writeln!(
                f,
                "{} | {}",
                row.inputs().map(u8::from).join(" "),
                u8::from(row.output())
            )?;
        }
        Ok(())
    }
}

/// Returns `A`, `B`, ... for `count` variables.
pub(crate) fn positional_variables(count: usize) -> Vec<char> {
    (b'A'..).take(count).map(char::from).collect()
}

#[inline]
fn input_bit(row_ix: usize, variable_count: usize, var_ix: usize) -> bool {
    (row_ix >> (variable_count - 1 - var_ix)) & 1 == 1
}

fn check_variable_count(count: usize) -> Result<(), TruthTableError> {
    if count > MAX_VARIABLES {
        Err(TruthTableError::TooManyVariables {
            count,
            max: MAX_VARIABLES,
        })
    } else if count == 0 {
        Err(TruthTableError::RowCount { actual: 1 })
    } else {
        Ok(())
    }
}

fn variable_count_for_rows(row_count: usize) -> Result<usize, TruthTableError> {
    if row_count < 2 || !row_count.is_power_of_two() {
        return Err(TruthTableError::RowCount { actual: row_count });
    }
    let count = row_count.trailing_zeros() as usize;
    check_variable_count(count)?;
    Ok(count)
}
