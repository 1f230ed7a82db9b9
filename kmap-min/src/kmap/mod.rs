// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Karnaugh maps and the grouping engine that minimizes them.

mod caches;
mod display;
mod grid;
mod grouping;
mod kmap_impl;
mod term;

pub use display::*;
pub use grid::*;
pub use grouping::*;
pub use kmap_impl::*;
pub use term::*;
