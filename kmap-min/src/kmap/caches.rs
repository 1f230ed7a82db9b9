// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    grid::Grid,
    grouping::{find_groupings, Grouping},
    term::Target,
};
use log::debug;
use once_cell::sync::OnceCell;

/// Groupings computed for a grid, one pass per target.
#[derive(Clone, Debug, Default)]
pub(super) struct GroupingCache {
    ones: OnceCell<Vec<Grouping>>,
    zeros: OnceCell<Vec<Grouping>>,
}

impl GroupingCache {
    pub(super) fn invalidate(&mut self) {
        self.ones = OnceCell::new();
        self.zeros = OnceCell::new();
    }

    pub(super) fn get_or_init(
        &self,
        grid: &Grid,
        variables: &[char],
        target: Target,
    ) -> &[Grouping] {
        let cell = match target {
            Target::One => &self.ones,
            Target::Zero => &self.zeros,
        };
        cell.get_or_init(|| {
            let groupings = find_groupings(grid, target);
            for grouping in &groupings {
                debug!("{}: {}", target, grouping.describe(variables, target));
            }
            groupings
        })
    }

    #[cfg(test)]
    pub(super) fn is_initialized(&self, target: Target) -> bool {
        match target {
            Target::One => self.ones.get().is_some(),
            Target::Zero => self.zeros.get().is_some(),
        }
    }
}
