// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    grid::{inverse_gray, Cell, Grid},
    grouping::Grouping,
    term::Target,
};
use itertools::{Itertools, Position};
use std::{borrow::Cow, fmt};

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows() {
            let line = (0..self.cols())
                .map(|col| u8::from(self.get(Cell::new(row, col))))
                .join(" ");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Displays a grid with its Gray-coded row and column headers.
///
/// ```text
/// AB\CD 00 01 11 10
///    00  1  0  0  1
///    01  0  1  1  0
/// ```
#[derive(Clone, Debug)]
pub struct GridDisplay<'a> {
    grid: &'a Grid,
    variables: &'a [char],
}

impl<'a> GridDisplay<'a> {
    pub fn new(grid: &'a Grid, variables: &'a [char]) -> Self {
        Self { grid, variables }
    }
}

impl<'a> fmt::Display for GridDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let shape = self.grid.shape();
        let (row_vars, col_vars) = self.variables.split_at(shape.row_bits());
        let row_header: String = row_vars.iter().collect();
        let col_header: String = col_vars.iter().collect();
        let corner = format!("{}\\{}", row_header, col_header);

        let label =
            |ix: usize, width: usize| format!("{:0width$b}", inverse_gray(ix), width = width);
        let cell_width = shape.col_bits();

        write!(f, "{}", corner)?;
        for col in 0..self.grid.cols() {
            write!(f, " {}", label(col, shape.col_bits()))?;
        }
        writeln!(f)?;

        for row in 0..self.grid.rows() {
            write!(f, "{:>width$}", label(row, shape.row_bits()), width = corner.len())?;
            for col in 0..self.grid.cols() {
                let value = u8::from(self.grid.get(Cell::new(row, col)));
                write!(f, " {:>width$}", value, width = cell_width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Displays groupings as a minimized expression.
///
/// Terms are written in discovery order; a term identical to one already written is skipped.
/// Sums of products are joined with ` + `; products of sums are parenthesized and joined with
/// a space.
#[derive(Clone, Debug)]
pub struct ExpressionDisplay<'a> {
    groupings: &'a [Grouping],
    variables: &'a [char],
    target: Target,
    separator: Cow<'a, str>,
}

impl<'a> ExpressionDisplay<'a> {
    pub fn new(groupings: &'a [Grouping], variables: &'a [char], target: Target) -> Self {
        let separator = match target {
            Target::One => " + ",
            Target::Zero => " ",
        };
        Self {
            groupings,
            variables,
            target,
            separator: Cow::Borrowed(separator),
        }
    }

    pub fn with_separator(mut self, separator: impl Into<Cow<'a, str>>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl<'a> fmt::Display for ExpressionDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let terms = self
            .groupings
            .iter()
            .map(|grouping| grouping.term().render(self.variables, self.target))
            .unique();

        for term in terms.with_position() {
            let (term, last) = match term {
                Position::First(term) | Position::Middle(term) => (term, false),
                Position::Last(term) | Position::Only(term) => (term, true),
            };
            match self.target {
                Target::Zero if !term.is_empty() => write!(f, "({})", term)?,
                _ => write!(f, "{}", term)?,
            }
            if !last {
                write!(f, "{}", self.separator)?;
            }
        }
        Ok(())
    }
}

/// Renders groupings into a minimized expression string. See [`ExpressionDisplay`].
pub fn render(groupings: &[Grouping], variables: &[char], target: Target) -> String {
    ExpressionDisplay::new(groupings, variables, target).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kmap::find_groupings;

    #[test]
    fn test_grid_display() {
        let grid = Grid::from_numeric([[1u8, 0, 0, 1], [0, 1, 1, 0]]).unwrap();
        assert_eq!(grid.to_string(), "1 0 0 1\n0 1 1 0\n");
        assert_eq!(
            GridDisplay::new(&grid, &['A', 'B', 'C']).to_string(),
            "A\\BC 00 01 11 10\n\
             \x20  0  1  0  0  1\n\
             \x20  1  0  1  1  0\n"
        );
    }

    #[test]
    fn test_render_forms() {
        let grid = Grid::from_numeric([[1u8, 0], [0, 1]]).unwrap();
        let variables = ['A', 'B'];
        let sop = find_groupings(&grid, Target::One);
        let pos = find_groupings(&grid, Target::Zero);
        assert_eq!(render(&sop, &variables, Target::One), "A'B' + AB");
        assert_eq!(render(&pos, &variables, Target::Zero), "(A+B') (A'+B)");
        assert_eq!(
            ExpressionDisplay::new(&pos, &variables, Target::Zero)
                .with_separator("")
                .to_string(),
            "(A+B')(A'+B)"
        );
    }

    #[test]
    fn test_render_skips_repeated_terms() {
        // A single pair wrapping from row 3 to row 0; render it twice over.
        let grid = Grid::from_numeric([
            [1u8, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [1, 0, 0, 0],
        ])
        .unwrap();
        let mut sop = find_groupings(&grid, Target::One);
        assert_eq!(sop.len(), 1);
        sop.extend(sop.clone());
        assert_eq!(
            render(&sop, &['A', 'B', 'C', 'D'], Target::One),
            "B'C'D'"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[], &['A', 'B'], Target::One), "");
        assert_eq!(render(&[], &['A', 'B'], Target::Zero), "");

        let ones = Grid::from_numeric([[1u8, 1], [1, 1]]).unwrap();
        let sop = find_groupings(&ones, Target::One);
        assert_eq!(render(&sop, &['A', 'B'], Target::One), "");

        let zeros = Grid::from_numeric([[0u8, 0], [0, 0]]).unwrap();
        let pos = find_groupings(&zeros, Target::Zero);
        assert_eq!(pos.len(), 1);
        assert_eq!(render(&pos, &['A', 'B'], Target::Zero), "");
    }
}
