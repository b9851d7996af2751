//
// Copyright (c) 2024 envkit contributors
//
// This file is part of the envkit project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

pub mod config;
pub mod env;
pub mod error;
pub mod level;
pub mod logger;
pub mod printf;

pub use config::{ConfStr, Config};
pub use env::{Env, CONFIG_ENV_VAR};
pub use error::{Error, Result};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder, Sink};
pub use printf::{format, Arg, Formatter, MAX_FORMATTED};

