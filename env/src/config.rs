//
// Copyright (c) 2024 envkit contributors
//
// This file is part of the envkit project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use std::{
    collections::BTreeMap,
    fmt,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use crate::error::{Error, Result};

/// A configuration value as text, converted on demand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfStr {
    text: String,
}

impl ConfStr {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Parses the trimmed text as `T`.
    pub fn to<T: FromStr>(&self) -> Result<T> {
        self.text.trim().parse::<T>().map_err(|_| Error::Parse {
            text: self.text.clone(),
            target: std::any::type_name::<T>(),
        })
    }

    /// Like [`ConfStr::to`], falling back to `default` when parsing fails.
    pub fn to_or<T: FromStr>(&self, default: T) -> T {
        self.to().unwrap_or(default)
    }
}

impl fmt::Display for ConfStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for ConfStr {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// # Config
///
/// Key/value settings read from a text file:
///
/// ```text
/// # comment
/// ; comment
/// name = value
///
/// [log]
/// level = info     # stored as "log.level"
/// ```
///
/// Later entries replace earlier ones with the same key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    entries: BTreeMap<String, String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// # load
    ///
    /// Reads and parses a configuration file.
    ///
    /// # Errors:
    /// * io
    /// * malformed line
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("config: loading {}", path.display());
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut conf = Config::default();
        let mut section = String::new();

        for (line_no, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let line = line.trim();
            let line_no = line_no + 1;

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let name = header.strip_suffix(']').map(str::trim).ok_or_else(|| Error::Config {
                    line: line_no,
                    message: format!("unterminated section header '{line}'"),
                })?;
                if name.is_empty() || name.contains(char::is_whitespace) {
                    return Err(Error::Config {
                        line: line_no,
                        message: format!("invalid section name '{name}'"),
                    });
                }
                section = name.to_string();
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(Error::Config {
                    line: line_no,
                    message: format!("expected 'key = value', found '{line}'"),
                });
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(Error::Config {
                    line: line_no,
                    message: String::from("missing key before '='"),
                });
            }

            let key = if section.is_empty() {
                key.to_string()
            } else {
                format!("{section}.{key}")
            };
            log::trace!("config: {key} = {}", value.trim());
            conf.entries.insert(key, value.trim().to_string());
        }

        Ok(conf)
    }

    /// Value of `name`, or `default` when it is not set.
    pub fn get(&self, name: &str, default: &str) -> ConfStr {
        ConfStr::new(self.entries.get(name).map(String::as_str).unwrap_or(default))
    }

    /// Value of `name`, or an empty value when it is not set.
    pub fn get_str(&self, name: &str) -> ConfStr {
        self.get(name, "")
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.as_bytes())
    }
}
