// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::grid::{Cell, Grid};
use arrayvec::ArrayVec;
use std::fmt;

/// Which cells a pass groups, and so which expression form it produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// Group the 1s into a sum of products.
    One,
    /// Group the 0s into a product of sums.
    Zero,
}

impl Target {
    pub const ALL: [Target; 2] = [Target::One, Target::Zero];

    /// The cell value this pass groups.
    #[inline]
    pub fn bit(self) -> bool {
        matches!(self, Target::One)
    }

    /// Whether a variable held at `value` across a group appears uncomplemented in the term.
    ///
    /// A product term keeps the variable's polarity; a sum term inverts it.
    #[inline]
    pub fn uncomplemented(self, value: bool) -> bool {
        match self {
            Target::One => value,
            Target::Zero => !value,
        }
    }

    #[inline]
    pub fn form_name(self) -> &'static str {
        match self {
            Target::One => "SOP",
            Target::Zero => "POS",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.form_name())
    }
}

/// A variable or its complement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    /// Position of the variable; 0 is `A`.
    pub var_ix: usize,
    pub complemented: bool,
}

/// The literals of one grouping, in variable order.
///
/// An empty term is a grouping in which every variable varies.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Term {
    literals: ArrayVec<Literal, 4>,
}

impl Term {
    /// Derives the term for a set of equal-valued cells.
    ///
    /// A variable contributes a literal iff its value is the same in every cell. Its polarity
    /// follows [`Target::uncomplemented`].
    pub fn derive(grid: &Grid, cells: &[Cell], target: Target) -> Self {
        let var_count = grid.variable_count();
        let full_mask = (1 << var_count) - 1;
        // Bits that are 1 in every cell, and bits that are 0 in every cell.
        let (all_ones, all_zeros) =
            cells
                .iter()
                .fold((full_mask, full_mask), |(ones, zeros), &cell| {
                    let minterm = grid.minterm(cell);
                    (ones & minterm, zeros & !minterm)
                });

        let literals = (0..var_count)
            .filter_map(|var_ix| {
                let bit = 1 << (var_count - 1 - var_ix);
                let value = if all_ones & bit != 0 {
                    true
                } else if all_zeros & bit != 0 {
                    false
                } else {
                    return None;
                };
                Some(Literal {
                    var_ix,
                    complemented: !target.uncomplemented(value),
                })
            })
            .collect();

        Self { literals }
    }

    #[inline]
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Renders the term with `variables` as names.
    ///
    /// Products are written as adjacent literals (`AB'`), sums joined with `+` (`A+B'`).
    pub fn render(&self, variables: &[char], target: Target) -> String {
        let mut out = String::new();
        for (ix, literal) in self.literals.iter().enumerate() {
            if ix > 0 && target == Target::Zero {
                out.push('+');
            }
            out.push(variables[literal.var_ix]);
            if literal.complemented {
                out.push('\'');
            }
        }
        out
    }
}
