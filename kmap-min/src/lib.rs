// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Boolean expression evaluation and Karnaugh-map minimization for two to four variables.
//!
//! ```
//! use kmap_min::LogicFunction;
//!
//! let function = LogicFunction::from_expression("A xor B").unwrap();
//! let minimized = function.minimize().unwrap();
//! assert_eq!(minimized.sop, "A'B + AB'");
//! assert_eq!(minimized.pos, "(A+B) (A'+B')");
//! ```

pub mod errors;
pub mod expr;
pub mod kmap;
pub mod logic_function;
#[cfg(any(test, feature = "proptest1"))]
mod proptest_helpers;
pub mod truth_table;

pub use errors::Error;
pub use logic_function::LogicFunction;
