//
// Copyright (c) 2024 envkit contributors
//
// This file is part of the envkit project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::logger::{Logger, LoggerBuilder};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "ENVKIT_CONFIG";

/// Configuration plus the logger built from it.
///
/// Constructed once by the program and handed around by reference.
#[derive(Debug)]
pub struct Env {
    config: Config,
    logger: Logger,
}

impl Env {
    /// Loads `config_path` (or starts from an empty configuration) and sets
    /// up logging from its `log.*` keys.
    pub fn init(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load(path)?,
            None => Config::new(),
        };
        Self::with_config(config)
    }

    /// Like [`Env::init`], taking the path from `ENVKIT_CONFIG` if set.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::init(Some(Path::new(&path))),
            _ => Self::init(None),
        }
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let logger = LoggerBuilder::from_config(&config)?.build();
        Ok(Self { config, logger })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn into_parts(self) -> (Config, Logger) {
        (self.config, self.logger)
    }
}
