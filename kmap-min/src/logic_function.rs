// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::{Error, GridError},
    expr::Expression,
    kmap::{KMap, Minimized},
    truth_table::TruthTable,
};

/// A single-output Boolean function, held as its truth table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicFunction {
    truth_table: TruthTable,
}

impl LogicFunction {
    /// Parses and tabulates an expression such as `A and (B or not C)`.
    pub fn from_expression(source: &str) -> Result<Self, Error> {
        let expr = Expression::parse(source)?;
        let truth_table = TruthTable::from_expression(&expr)?;
        Ok(Self { truth_table })
    }

    pub fn from_truth_table(truth_table: TruthTable) -> Self {
        Self { truth_table }
    }

    #[inline]
    pub fn truth_table(&self) -> &TruthTable {
        &self.truth_table
    }

    /// Lays the function out on a Karnaugh map. Fails unless it has 2 to 4 variables.
    pub fn kmap(&self) -> Result<KMap, GridError> {
        KMap::from_truth_table(&self.truth_table)
    }

    pub fn minimize(&self) -> Result<Minimized, Error> {
        Ok(self.kmap()?.minimize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ExpressionError, TruthTableError};
    use test_log::test;

    fn minimize(source: &str) -> Minimized {
        LogicFunction::from_expression(source)
            .unwrap()
            .minimize()
            .unwrap()
    }

    #[test]
    fn test_two_variables() {
        assert_eq!(minimize("A and B").sop, "AB");
        assert_eq!(minimize("A or B").sop, "B + A");
        assert_eq!(minimize("A or B").pos, "(A+B)");
        assert_eq!(minimize("A or not A and B").sop, "B + A");
    }

    #[test]
    fn test_tautology_and_contradiction() {
        let both = minimize("A or not A or B");
        assert_eq!(both.sop, "");
        assert_eq!(both.pos, "");

        let neither = minimize("A and not A and B");
        assert_eq!(neither.sop, "");
        assert_eq!(neither.pos, "");
    }

    #[test]
    fn test_four_variables() {
        // 1 exactly when B and D are both 0: the four corners.
        let minimized = minimize("not B and not D and (A or C or not A)");
        assert_eq!(minimized.sop, "B'D'");
    }

    #[test]
    fn test_truth_table_round_trip() {
        let function = LogicFunction::from_expression("A nand B").unwrap();
        let table = function.truth_table().clone();
        assert_eq!(
            table.to_numeric(),
            vec![vec![0, 0, 1], vec![0, 1, 1], vec![1, 0, 1], vec![1, 1, 0]]
        );
        assert_eq!(LogicFunction::from_truth_table(table), function);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            LogicFunction::from_expression("A and (B").unwrap_err(),
            Error::Expression(ExpressionError::UnmatchedParen { position: 6 })
        );

        let single = LogicFunction::from_expression("not A").unwrap();
        assert_eq!(
            single.minimize().unwrap_err(),
            Error::Grid(GridError::InvalidVariableCount(1))
        );

        let table = TruthTable::new(5).unwrap();
        assert_eq!(
            LogicFunction::from_truth_table(table).kmap().unwrap_err(),
            GridError::InvalidVariableCount(5)
        );
        assert_eq!(
            TruthTable::new(20).unwrap_err(),
            TruthTableError::TooManyVariables { count: 20, max: 16 }
        );
    }
}
