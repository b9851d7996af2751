//
// Copyright (c) 2024 envkit contributors
//
// This file is part of the envkit project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use std::iter::FusedIterator;

use crate::optspec::OptSpec;
use crate::scanner::{Scan, Scanner};

/// Iterator over the options of one argument vector.
///
/// Yields every [`Scan`] up to, but not including, [`Scan::EndOfInput`],
/// then stays exhausted. The leftover operands are available afterwards.
#[derive(Debug, Clone)]
pub struct Getopt<'a, S> {
    args: &'a [S],
    spec: OptSpec<'a>,
    scanner: Scanner,
    done: bool,
}

impl<'a, S: AsRef<str>> Getopt<'a, S> {
    pub fn new(args: &'a [S], optstring: &'a str) -> Self {
        Self {
            args,
            spec: OptSpec::new(optstring),
            scanner: Scanner::new(),
            done: false,
        }
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// Value attached to the last result, see [`Scanner::value`].
    pub fn value(&self) -> Option<&'a str> {
        self.scanner.value(self.args)
    }

    pub fn operands(&self) -> &'a [S] {
        self.scanner.operands(self.args)
    }

    /// Starts over from the first argument.
    pub fn reset(&mut self) {
        self.scanner.reset();
        self.done = false;
    }
}

impl<'a, S: AsRef<str>> Iterator for Getopt<'a, S> {
    type Item = Scan<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.scanner.scan(self.args, self.spec) {
            Scan::EndOfInput => {
                self.done = true;
                None
            }
            result => Some(result),
        }
    }
}

impl<S: AsRef<str>> FusedIterator for Getopt<'_, S> {}
