// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{errors::GridError, truth_table::TruthTable};
use arrayvec::ArrayVec;
use bitvec::prelude::*;

/// The largest number of cells a grid can hold (4×4).
pub const MAX_CELLS: usize = 16;

/// Converts a binary number into its reflected Gray code.
#[inline]
pub fn gray(x: usize) -> usize {
    x ^ (x >> 1)
}

/// Converts a reflected Gray code back into the binary number it encodes.
#[inline]
pub fn inverse_gray(mut g: usize) -> usize {
    let mut shift = g >> 1;
    while shift != 0 {
        g ^= shift;
        shift >>= 1;
    }
    g
}

/// A (row, column) position in a grid, 0-indexed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// The supported K-map shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridShape {
    /// Two variables: `A` on rows, `B` on columns.
    TwoByTwo,
    /// Three variables: `A` on rows, `BC` on columns.
    TwoByFour,
    /// Four variables: `AB` on rows, `CD` on columns.
    FourByFour,
}

impl GridShape {
    pub fn from_dimensions(rows: usize, cols: usize) -> Result<Self, GridError> {
        match (rows, cols) {
            (2, 2) => Ok(GridShape::TwoByTwo),
            (2, 4) => Ok(GridShape::TwoByFour),
            (4, 4) => Ok(GridShape::FourByFour),
            _ => Err(GridError::InvalidShape { rows, cols }),
        }
    }

    pub fn from_variable_count(count: usize) -> Result<Self, GridError> {
        match count {
            2 => Ok(GridShape::TwoByTwo),
            3 => Ok(GridShape::TwoByFour),
            4 => Ok(GridShape::FourByFour),
            _ => Err(GridError::InvalidVariableCount(count)),
        }
    }

    #[inline]
    pub fn rows(self) -> usize {
        1 << self.row_bits()
    }

    #[inline]
    pub fn cols(self) -> usize {
        1 << self.col_bits()
    }

    /// The number of variables encoded by the row index.
    #[inline]
    pub fn row_bits(self) -> usize {
        match self {
            GridShape::TwoByTwo | GridShape::TwoByFour => 1,
            GridShape::FourByFour => 2,
        }
    }

    /// The number of variables encoded by the column index.
    #[inline]
    pub fn col_bits(self) -> usize {
        match self {
            GridShape::TwoByTwo => 1,
            GridShape::TwoByFour | GridShape::FourByFour => 2,
        }
    }

    #[inline]
    pub fn variable_count(self) -> usize {
        self.row_bits() + self.col_bits()
    }

    #[inline]
    pub fn cell_count(self) -> usize {
        self.rows() * self.cols()
    }
}

/// A Karnaugh map: a toroidal grid of bits with Gray-coded rows and columns.
///
/// Grid-adjacent cells, including the pairs that wrap around an edge, differ in exactly one
/// input variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    shape: GridShape,
    bits: BitArr!(for MAX_CELLS, in u16),
}

impl Grid {
    /// Creates a grid with every cell set to 0.
    pub fn new(shape: GridShape) -> Self {
        Self {
            shape,
            bits: BitArray::ZERO,
        }
    }

    /// Creates a grid from a matrix of 0s and 1s.
    ///
    /// # Examples
    ///
    /// ```
    /// use kmap_min::kmap::{Cell, Grid, GridShape};
    ///
    /// let grid = Grid::from_numeric([[1u8, 0], [0, 1]]).unwrap();
    /// assert_eq!(grid.shape(), GridShape::TwoByTwo);
    /// assert!(grid.get(Cell::new(1, 1)));
    /// ```
    pub fn from_numeric<R: AsRef<[u8]>>(
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Self, GridError> {
        let rows: Vec<R> = rows.into_iter().collect();
        let cols = match rows.first() {
            Some(first) => first.as_ref().len(),
            None => return Err(GridError::Empty),
        };
        for (row_ix, row) in rows.iter().enumerate() {
            let actual = row.as_ref().len();
            if actual != cols {
                return Err(GridError::Ragged {
                    row: row_ix,
                    expected: cols,
                    actual,
                });
            }
        }

        let mut grid = Self::new(GridShape::from_dimensions(rows.len(), cols)?);
        for (row_ix, row) in rows.iter().enumerate() {
            for (col_ix, &value) in row.as_ref().iter().enumerate() {
                let bit = match value {
                    0 => false,
                    1 => true,
                    _ => {
                        return Err(GridError::InvalidNumeric {
                            row: row_ix,
                            col: col_ix,
                            value,
                        })
                    }
                };
                grid.set(Cell::new(row_ix, col_ix), bit);
            }
        }
        Ok(grid)
    }

    /// Lays a truth table out on a grid.
    ///
    /// Truth table row `i` lands on cell `(gray(i / cols), gray(i % cols))`.
    pub fn from_truth_table(table: &TruthTable) -> Result<Self, GridError> {
        let shape = GridShape::from_variable_count(table.variable_count())?;
        let mut grid = Self::new(shape);
        for row in table.rows() {
            grid.set(grid.cell_for_row(row.index()), row.output());
        }
        Ok(grid)
    }

    #[inline]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.shape.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.shape.cols()
    }

    #[inline]
    pub fn variable_count(&self) -> usize {
        self.shape.variable_count()
    }

    /// Returns the value of `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is outside the grid.
    #[inline]
    pub fn get(&self, cell: Cell) -> bool {
        self.bits[self.index_of(cell)]
    }

    #[inline]
    pub fn set(&mut self, cell: Cell, value: bool) {
        let ix = self.index_of(cell);
        self.bits.set(ix, value);
    }

    /// Iterates over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let cols = self.cols();
        (0..self.shape.cell_count()).map(move |ix| Cell::new(ix / cols, ix % cols))
    }

    /// Returns the number of cells set to `value`.
    pub fn count(&self, value: bool) -> usize {
        self.cells().filter(|&cell| self.get(cell) == value).count()
    }

    /// The four corner cells, which are mutually adjacent on the torus.
    pub fn corners(&self) -> [Cell; 4] {
        let (last_row, last_col) = (self.rows() - 1, self.cols() - 1);
        [
            Cell::new(0, 0),
            Cell::new(0, last_col),
            Cell::new(last_row, 0),
            Cell::new(last_row, last_col),
        ]
    }

    #[inline]
    pub fn down(&self, cell: Cell) -> Cell {
        Cell::new((cell.row + 1) % self.rows(), cell.col)
    }

    #[inline]
    pub fn up(&self, cell: Cell) -> Cell {
        Cell::new((cell.row + self.rows() - 1) % self.rows(), cell.col)
    }

    #[inline]
    pub fn right(&self, cell: Cell) -> Cell {
        Cell::new(cell.row, (cell.col + 1) % self.cols())
    }

    #[inline]
    pub fn left(&self, cell: Cell) -> Cell {
        Cell::new(cell.row, (cell.col + self.cols() - 1) % self.cols())
    }

    /// Returns the distinct wraparound neighbors of `cell`, in the order down, up, right, left.
    ///
    /// On a 2-row (or 2-column) grid the up and down (or left and right) neighbors coincide
    /// and are only returned once.
    pub fn neighbors(&self, cell: Cell) -> ArrayVec<Cell, 4> {
        let mut neighbors = ArrayVec::new();
        for neighbor in [
            self.down(cell),
            self.up(cell),
            self.right(cell),
            self.left(cell),
        ] {
            if !neighbors.contains(&neighbor) {
                neighbors.push(neighbor);
            }
        }
        neighbors
    }

    /// Returns the truth table row index whose output lives in `cell`.
    ///
    /// Bit `n - 1 - k` of the result is the value of variable `k` in this cell.
    #[inline]
    pub fn minterm(&self, cell: Cell) -> usize {
        (inverse_gray(cell.row) << self.shape.col_bits()) | inverse_gray(cell.col)
    }

    /// Returns the cell holding the output of truth table row `row_ix`.
    #[inline]
    pub fn cell_for_row(&self, row_ix: usize) -> Cell {
        let cols = self.cols();
        Cell::new(gray(row_ix / cols), gray(row_ix % cols))
    }

    /// Reads the grid back into truth table order.
    pub fn to_outputs(&self) -> BitVec {
        (0..self.shape.cell_count())
            .map(|row_ix| self.get(self.cell_for_row(row_ix)))
            .collect()
    }

    pub fn to_numeric(&self) -> Vec<Vec<u8>> {
        (0..self.rows())
            .map(|row| {
                (0..self.cols())
                    .map(|col| u8::from(self.get(Cell::new(row, col))))
                    .collect()
            })
            .collect()
    }

    #[inline]
    pub(crate) fn index_of(&self, cell: Cell) -> usize {
        assert!(
            cell.row < self.rows() && cell.col < self.cols(),
            "cell {:?} outside {}x{} grid",
            cell,
            self.rows(),
            self.cols()
        );
        cell.row * self.cols() + cell.col
    }
}
