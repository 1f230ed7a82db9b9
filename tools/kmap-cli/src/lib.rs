// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line front end for `kmap-min`.

mod command;

pub use command::*;
