//
// Copyright (c) 2024 envkit contributors
//
// This file is part of the envkit project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! POSIX-style short option scanning.
//!
//! ```text
//! let args: Vec<String> = std::env::args().collect();
//! let mut scanner = Scanner::new();
//! loop {
//!     match scanner.scan(&args, "ab:") {
//!         Scan::Flag('a') => ...,
//!         Scan::FlagWithValue('b', value) => ...,
//!         Scan::EndOfInput => break,
//!         _ => ...,
//!     }
//! }
//! let files = scanner.operands(&args);
//! ```

mod iter;
mod optspec;
mod scanner;

pub use iter::Getopt;
pub use optspec::{Arity, OptSpec};
pub use scanner::{Scan, Scanner, EOF, UNRECOGNIZED};
