//
// Copyright (c) 2024 envkit contributors
//
// This file is part of the envkit project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use crate::optspec::{Arity, OptSpec};

/// Classic getopt code for "no more options".
pub const EOF: i32 = -1;

/// Classic getopt code for an unknown option or a missing value.
pub const UNRECOGNIZED: char = '?';

/// Outcome of a single [`Scanner::scan`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan<'a> {
    Flag(char),
    FlagWithValue(char, &'a str),
    Unrecognized(char),
    /// The option takes a value but the argument vector ran out.
    MissingValue(char),
    EndOfInput,
}

impl Scan<'_> {
    /// The value a C getopt would have returned for this outcome.
    pub fn code(&self) -> i32 {
        match self {
            Scan::Flag(c) | Scan::FlagWithValue(c, _) => *c as i32,
            Scan::Unrecognized(_) | Scan::MissingValue(_) => UNRECOGNIZED as i32,
            Scan::EndOfInput => EOF,
        }
    }

    /// The option character the outcome refers to, if any.
    pub fn option(&self) -> Option<char> {
        match self {
            Scan::Flag(c)
            | Scan::FlagWithValue(c, _)
            | Scan::Unrecognized(c)
            | Scan::MissingValue(c) => Some(*c),
            Scan::EndOfInput => None,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Scan::EndOfInput)
    }
}

// a position inside the argument vector: argument index plus byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    arg: usize,
    offset: usize,
}

/// Cursor state for scanning one argument vector.
///
/// A `Scanner` is a plain value owned by the caller, so any number of scans
/// may run side by side. Index 0 of the argument vector is taken to be the
/// program name and is never scanned.
///
/// The cluster slot is `None` exactly when the next call has to fetch a
/// fresh argument, and `index` never moves backwards between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scanner {
    index: usize,
    cluster: Option<Slot>,
    value: Option<Slot>,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns to the "not yet started" state.
    pub fn reset(&mut self) {
        self.index = 0;
        self.cluster = None;
        self.value = None;
    }

    /// Next argument index to examine. After [`Scan::EndOfInput`] this is
    /// the first positional argument.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the scanner is part way through an option cluster.
    pub fn in_cluster(&self) -> bool {
        self.cluster.is_some()
    }

    /// The value attached to the most recent result.
    ///
    /// Set for [`Scan::FlagWithValue`], and for [`Scan::EndOfInput`] when an
    /// argument remains at the stop position.
    pub fn value<'a, S: AsRef<str>>(&self, args: &'a [S]) -> Option<&'a str> {
        let slot = self.value?;
        args.get(slot.arg)?.as_ref().get(slot.offset..)
    }

    /// Arguments left over once scanning has stopped.
    pub fn operands<'a, S>(&self, args: &'a [S]) -> &'a [S] {
        let start = self.index.max(1).min(args.len());
        &args[start..]
    }

    /// Scans the next option out of `args`.
    pub fn scan<'a, 's, S: AsRef<str>>(
        &mut self,
        args: &'a [S],
        spec: impl Into<OptSpec<'s>>,
    ) -> Scan<'a> {
        let spec = spec.into();
        self.value = None;

        let (slot, text, option_char) = loop {
            if let Some(slot) = self.cluster {
                if let Some(text) = args.get(slot.arg).map(AsRef::as_ref) {
                    if let Some(c) = text.get(slot.offset..).and_then(|s| s.chars().next()) {
                        break (slot, text, c);
                    }
                }
                self.cluster = None;
            }
            match self.fetch(args) {
                Some(slot) => self.cluster = Some(slot),
                None => return Scan::EndOfInput,
            }
        };

        let next = slot.offset + option_char.len_utf8();
        let exhausted = next >= text.len();
        self.cluster = if exhausted {
            None
        } else {
            Some(Slot {
                arg: slot.arg,
                offset: next,
            })
        };

        match spec.lookup(option_char) {
            None => {
                log::trace!("getopt: unrecognized option '{option_char}'");
                Scan::Unrecognized(option_char)
            }
            Some(Arity::Flag) => Scan::Flag(option_char),
            Some(Arity::Value) if !exhausted => {
                self.cluster = None;
                self.value = Some(Slot {
                    arg: slot.arg,
                    offset: next,
                });
                Scan::FlagWithValue(option_char, &text[next..])
            }
            Some(Arity::Value) => match args.get(self.index) {
                Some(arg) => {
                    self.value = Some(Slot {
                        arg: self.index,
                        offset: 0,
                    });
                    self.index += 1;
                    Scan::FlagWithValue(option_char, arg.as_ref())
                }
                None => {
                    log::trace!("getopt: option '{option_char}' requires a value");
                    Scan::MissingValue(option_char)
                }
            },
        }
    }

    // Moves to the next argument. Returns the start of a new option cluster,
    // or None when option scanning is over.
    fn fetch<S: AsRef<str>>(&mut self, args: &[S]) -> Option<Slot> {
        if self.index == 0 {
            self.index = 1;
        }

        let arg = args.get(self.index)?.as_ref();
        if !arg.starts_with('-') || arg == "-" {
            self.value = Some(Slot {
                arg: self.index,
                offset: 0,
            });
            return None;
        }

        if arg == "--" {
            self.index += 1;
            if self.index < args.len() {
                self.value = Some(Slot {
                    arg: self.index,
                    offset: 0,
                });
            }
            return None;
        }

        let slot = Slot {
            arg: self.index,
            offset: 1,
        };
        self.index += 1;
        Some(slot)
    }
}
