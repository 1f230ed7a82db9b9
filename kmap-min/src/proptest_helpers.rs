// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    kmap::{Grid, GridShape},
    truth_table::TruthTable,
};
use proptest::prelude::*;

impl Arbitrary for GridShape {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            Just(GridShape::TwoByTwo),
            Just(GridShape::TwoByFour),
            Just(GridShape::FourByFour),
        ]
        .boxed()
    }
}

impl Arbitrary for Grid {
    /// Pass in a shape to only generate grids of that shape.
    type Parameters = Option<GridShape>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(shape: Self::Parameters) -> Self::Strategy {
        let shape_strategy = match shape {
            Some(shape) => Just(shape).boxed(),
            None => any::<GridShape>(),
        };
        shape_strategy
            .prop_flat_map(|shape| {
                // One value per cell, in row-major order.
                prop::collection::vec(any::<bool>(), shape.cell_count()).prop_map(
                    move |values| {
                        let mut grid = Grid::new(shape);
                        let cells: Vec<_> = grid.cells().collect();
                        for (cell, value) in cells.into_iter().zip(values) {
                            grid.set(cell, value);
                        }
                        grid
                    },
                )
            })
            .boxed()
    }
}

impl Arbitrary for TruthTable {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        // Tables small enough to lay out on a grid.
        (2usize..=4)
            .prop_flat_map(|variable_count| {
                prop::collection::vec(any::<bool>(), 1 << variable_count).prop_map(|outputs| {
                    TruthTable::from_outputs(outputs)
                        .expect("output count is a power of two between 4 and 16")
                })
            })
            .boxed()
    }
}
