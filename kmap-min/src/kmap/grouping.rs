// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    grid::{Cell, Grid, MAX_CELLS},
    term::{Target, Term},
};
use arrayvec::ArrayVec;
use bitvec::prelude::*;
use log::trace;
use std::fmt;

/// How a grouping was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// The four corners of the grid.
    Corners,
    /// A 2×2 square, possibly wrapping around an edge.
    Block,
    /// A cell and the cell below it.
    VerticalPair,
    /// A cell and the cell to its right.
    HorizontalPair,
    /// A lone cell.
    Single,
    /// A lone cell paired with its one neighbor inside a block.
    ExtendedSingle,
    /// The top and bottom cells of a column.
    VerticalWrap,
    /// The leftmost and rightmost cells of a row.
    HorizontalWrap,
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            GroupKind::Corners => "corner wraparound",
            GroupKind::Block => "2x2",
            GroupKind::VerticalPair => "2x1",
            GroupKind::HorizontalPair => "1x2",
            GroupKind::Single => "single cell",
            GroupKind::ExtendedSingle => "extended single cell",
            GroupKind::VerticalWrap => "vertical wraparound",
            GroupKind::HorizontalWrap => "horizontal wraparound",
        };
        f.write_str(name)
    }
}

/// A rectangular group of 1, 2 or 4 equal-valued cells and the term it reduces to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grouping {
    kind: GroupKind,
    cells: ArrayVec<Cell, 4>,
    term: Term,
}

impl Grouping {
    fn new(grid: &Grid, target: Target, kind: GroupKind, cells: &[Cell]) -> Self {
        let cells: ArrayVec<Cell, 4> = cells.iter().copied().collect();
        let term = Term::derive(grid, &cells, target);
        trace!("{}: {} grouping at {:?}", target, kind, cells);
        Self { kind, cells, term }
    }

    /// Describes the grouping with its term written over `variables`, for logs.
    pub fn describe(&self, variables: &[char], target: Target) -> String {
        format!(
            "{} grouping at {:?}, term {:?}",
            self.kind,
            self.cells.as_slice(),
            self.term.render(variables, target)
        )
    }

    #[inline]
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn term(&self) -> &Term {
        &self.term
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }
}

/// Finds groupings of the cells equal to `target.bit()`.
///
/// Groupings are claimed largest first, each step only starting from cells that no earlier
/// grouping covers:
///
/// 1. the four corners, if they all match;
/// 2. 2×2 blocks, scanning row-major, wrapping around both edges;
/// 3. vertical then horizontal pairs with the wrapped neighbor below or to the right,
///    never borrowing a cell from a 2×2 block;
/// 4. single cells. A single with exactly one neighbor inside a 2×2 block is then
///    widened into a pair with that neighbor;
/// 5. top-bottom and left-right edge pairs outside any 2×2 block whose two cells don't
///    already share a grouping.
///
/// Every matching cell ends up in at least one grouping. The result only depends on the grid
/// and the target.
pub fn find_groupings(grid: &Grid, target: Target) -> Vec<Grouping> {
    GroupingPass::new(grid, target).run()
}

type CellSet = BitArr!(for MAX_CELLS, in u16);

struct GroupingPass<'g> {
    grid: &'g Grid,
    target: Target,
    visited: CellSet,
    // Cells inside a corner quad or 2x2 block.
    claimed: CellSet,
    groupings: Vec<Grouping>,
}

impl<'g> GroupingPass<'g> {
    fn new(grid: &'g Grid, target: Target) -> Self {
        Self {
            grid,
            target,
            visited: BitArray::ZERO,
            claimed: BitArray::ZERO,
            groupings: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Grouping> {
        self.find_corners();
        self.find_blocks();
        self.find_pairs();
        self.find_singles();
        self.extend_singles();
        self.find_edge_wraps();
        self.groupings
    }

    #[inline]
    fn matches(&self, cell: Cell) -> bool {
        self.grid.get(cell) == self.target.bit()
    }

    #[inline]
    fn is_open(&self, cell: Cell) -> bool {
        !self.visited[self.grid.index_of(cell)] && self.matches(cell)
    }

    #[inline]
    fn is_claimed(&self, cell: Cell) -> bool {
        self.claimed[self.grid.index_of(cell)]
    }

    fn emit(&mut self, kind: GroupKind, cells: &[Cell]) {
        for &cell in cells {
            let ix = self.grid.index_of(cell);
            self.visited.set(ix, true);
            if matches!(kind, GroupKind::Corners | GroupKind::Block) {
                self.claimed.set(ix, true);
            }
        }
        let grouping = Grouping::new(self.grid, self.target, kind, cells);
        self.groupings.push(grouping);
    }

    fn find_corners(&mut self) {
        let corners = self.grid.corners();
        if corners.iter().all(|&cell| self.matches(cell)) {
            self.emit(GroupKind::Corners, &corners);
        }
    }

    fn find_blocks(&mut self) {
        for cell in self.grid.cells() {
            if !self.is_open(cell) {
                continue;
            }
            let down = self.grid.down(cell);
            let right = self.grid.right(cell);
            let diagonal = self.grid.right(down);
            if [down, right, diagonal]
                .iter()
                .all(|&other| self.matches(other))
            {
                self.emit(GroupKind::Block, &[cell, down, right, diagonal]);
            }
        }
    }

    fn find_pairs(&mut self) {
        for cell in self.grid.cells() {
            if !self.is_open(cell) {
                continue;
            }
            let down = self.grid.down(cell);
            let right = self.grid.right(cell);
            if self.matches(down) && !self.is_claimed(down) {
                self.emit(GroupKind::VerticalPair, &[cell, down]);
            } else if self.matches(right) && !self.is_claimed(right) {
                self.emit(GroupKind::HorizontalPair, &[cell, right]);
            }
        }
    }

    fn find_singles(&mut self) {
        for cell in self.grid.cells() {
            if self.is_open(cell) {
                self.emit(GroupKind::Single, &[cell]);
            }
        }
    }

    /// Replaces each single that touches exactly one claimed cell with a pair including it.
    fn extend_singles(&mut self) {
        let grid = self.grid;
        let target = self.target;
        let claimed = self.claimed;
        for grouping in &mut self.groupings {
            if grouping.kind != GroupKind::Single {
                continue;
            }
            let cell = grouping.cells[0];
            let mut claimed_neighbors = grid
                .neighbors(cell)
                .into_iter()
                .filter(|&neighbor| claimed[grid.index_of(neighbor)]);
            if let (Some(neighbor), None) = (claimed_neighbors.next(), claimed_neighbors.next()) {
                *grouping =
                    Grouping::new(grid, target, GroupKind::ExtendedSingle, &[cell, neighbor]);
            }
        }
    }

    fn find_edge_wraps(&mut self) {
        let (last_row, last_col) = (self.grid.rows() - 1, self.grid.cols() - 1);
        for col in 0..self.grid.cols() {
            self.try_edge_wrap(
                GroupKind::VerticalWrap,
                Cell::new(0, col),
                Cell::new(last_row, col),
            );
        }
        for row in 0..self.grid.rows() {
            self.try_edge_wrap(
                GroupKind::HorizontalWrap,
                Cell::new(row, 0),
                Cell::new(row, last_col),
            );
        }
    }

    fn try_edge_wrap(&mut self, kind: GroupKind, first: Cell, last: Cell) {
        if !self.matches(first) || !self.matches(last) {
            return;
        }
        if self.is_claimed(first) || self.is_claimed(last) {
            return;
        }
        let covered = self
            .groupings
            .iter()
            .any(|grouping| grouping.contains(first) && grouping.contains(last));
        if !covered {
            self.emit(kind, &[first, last]);
        }
    }
}
