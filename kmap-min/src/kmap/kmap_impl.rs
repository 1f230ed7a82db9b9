// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    caches::GroupingCache,
    display::{ExpressionDisplay, GridDisplay},
    grid::{Cell, Grid},
    grouping::Grouping,
    term::Target,
};
use crate::{errors::GridError, truth_table::TruthTable};
use arrayvec::ArrayVec;
use std::fmt;

/// A Karnaugh map: a grid plus the names of the variables it encodes.
///
/// Groupings are computed lazily for each [`Target`] and cached until the grid changes.
#[derive(Clone, Debug)]
pub struct KMap {
    grid: Grid,
    variables: ArrayVec<char, 4>,
    cache: GroupingCache,
}

impl KMap {
    /// Creates a map over `grid`, naming its variables `A`, `B`, ... in order.
    pub fn new(grid: Grid) -> Self {
        let variables = (b'A'..)
            .take(grid.variable_count())
            .map(char::from)
            .collect();
        Self {
            grid,
            variables,
            cache: GroupingCache::default(),
        }
    }

    /// Lays a truth table of 2 to 4 variables out on a map, keeping its variable names.
    pub fn from_truth_table(table: &TruthTable) -> Result<Self, GridError> {
        let grid = Grid::from_truth_table(table)?;
        Self::new(grid).with_variables(table.variables().iter().copied())
    }

    /// Renames the variables. There must be exactly one name per variable of the grid.
    pub fn with_variables(
        mut self,
        variables: impl IntoIterator<Item = char>,
    ) -> Result<Self, GridError> {
        let variables: Vec<char> = variables.into_iter().collect();
        if variables.len() != self.grid.variable_count() {
            return Err(GridError::VariableNames {
                expected: self.grid.variable_count(),
                actual: variables.len(),
            });
        }
        self.variables = variables.into_iter().collect();
        Ok(self)
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn variables(&self) -> &[char] {
        &self.variables
    }

    #[inline]
    pub fn get(&self, cell: Cell) -> bool {
        self.grid.get(cell)
    }

    pub fn set(&mut self, cell: Cell, value: bool) {
        if self.grid.get(cell) != value {
            self.grid.set(cell, value);
            self.cache.invalidate();
        }
    }

    /// Returns the groupings for `target`, computing them on first use.
    pub fn groupings(&self, target: Target) -> &[Grouping] {
        self.cache.get_or_init(&self.grid, &self.variables, target)
    }

    pub fn expression(&self, target: Target) -> ExpressionDisplay<'_> {
        ExpressionDisplay::new(self.groupings(target), &self.variables, target)
    }

    #[inline]
    pub fn sop(&self) -> String {
        self.expression(Target::One).to_string()
    }

    #[inline]
    pub fn pos(&self) -> String {
        self.expression(Target::Zero).to_string()
    }

    /// Runs both passes.
    pub fn minimize(&self) -> Minimized {
        Minimized {
            sop: self.sop(),
            pos: self.pos(),
        }
    }

    pub fn display(&self) -> GridDisplay<'_> {
        GridDisplay::new(&self.grid, &self.variables)
    }
}

/// The minimized forms of a map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Minimized {
    /// Sum of products over the 1s.
    pub sop: String,
    /// Product of sums over the 0s.
    pub pos: String,
}

impl fmt::Display for Minimized {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}: {}", Target::One, self.sop)?;
        writeln!(f, "{}: {}", Target::Zero, self.pos)
    }
}
