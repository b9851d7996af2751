//
// Copyright (c) 2024 envkit contributors
//
// This file is part of the envkit project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

/// Whether a recognized option stands alone or needs a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Flag,
    Value,
}

/// A getopt option string such as `"abcCd:e:f"`.
///
/// Each character names a single-character option; a character followed by
/// `:` takes a value. The string is not validated: a trailing `:` or a
/// repeated character simply resolves to whatever the first match says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptSpec<'s> {
    optstring: &'s str,
}

impl<'s> OptSpec<'s> {
    pub fn new(optstring: &'s str) -> Self {
        Self { optstring }
    }

    pub fn as_str(&self) -> &'s str {
        self.optstring
    }

    /// Looks up `option_char`, returning `None` when it is not an option.
    /// `:` is never an option, even if the string starts with one.
    pub fn lookup(&self, option_char: char) -> Option<Arity> {
        if option_char == ':' {
            return None;
        }
        let pos = self.optstring.find(option_char)?;
        if self.optstring[pos + option_char.len_utf8()..].starts_with(':') {
            Some(Arity::Value)
        } else {
            Some(Arity::Flag)
        }
    }
}

impl<'s> From<&'s str> for OptSpec<'s> {
    fn from(optstring: &'s str) -> Self {
        Self::new(optstring)
    }
}
