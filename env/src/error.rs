//
// Copyright (c) 2024 envkit contributors
//
// This file is part of the envkit project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("formatted string is larger than the maximum size of {limit} bytes")]
    FormatOverflow { limit: usize },
    #[error("invalid format string: {0}")]
    Format(String),
    #[error("config line {line}: {message}")]
    Config { line: usize, message: String },
    #[error("key '{0}' is not set")]
    Unset(String),
    #[error("cannot convert {text:?} to {target}")]
    Parse { text: String, target: &'static str },
    #[error("Error processing io: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot install logger: {0}")]
    Logger(String),
}

pub type Result<T> = std::result::Result<T, Error>;
