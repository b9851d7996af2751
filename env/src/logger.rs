//
// Copyright (c) 2024 envkit contributors
//
// This file is part of the envkit project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::Path,
    sync::{Mutex, MutexGuard, PoisonError},
};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::level::Level;
use crate::printf::{Arg, Formatter};

/// Destination for log output.
pub type Sink = Box<dyn Write + Send>;

/// Leveled logger writing to an optional file sink and a console sink.
///
/// A message reaches a sink when its level is at or below that sink's
/// threshold. Console output is written verbatim after the prefix; file
/// output additionally carries a timestamp and the level name.
pub struct Logger {
    prefix: String,
    file_level: Level,
    console_level: Level,
    file: Option<Mutex<Sink>>,
    console: Mutex<Sink>,
    formatter: Formatter,
}

fn lock(sink: &Mutex<Sink>) -> MutexGuard<'_, Sink> {
    sink.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn file_level(&self) -> Level {
        self.file_level
    }

    pub fn console_level(&self) -> Level {
        self.console_level
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    /// Most verbose level any sink accepts.
    pub fn max_level(&self) -> Level {
        if self.file.is_some() {
            self.file_level.max(self.console_level)
        } else {
            self.console_level
        }
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.max_level()
    }

    /// Writes `msg` to every sink whose threshold admits `level`.
    ///
    /// Sink errors are dropped; logging never fails the caller.
    pub fn log(&self, level: Level, msg: &str) -> &Self {
        if let Some(file) = &self.file {
            if level <= self.file_level {
                let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
                let _ = write!(lock(file), "{stamp} [{level}] {}{msg}", self.prefix);
            }
        }
        if level <= self.console_level {
            let _ = write!(lock(&self.console), "{}{msg}", self.prefix);
        }
        self
    }

    pub fn info(&self, msg: &str) -> &Self {
        self.log(Level::Info, msg)
    }

    /// Formats with the logger's [`Formatter`] first, then logs.
    pub fn logf(&self, level: Level, template: &str, args: &[Arg]) -> Result<&Self> {
        let msg = self.formatter.format(template, args)?;
        Ok(self.log(level, &msg))
    }

    pub fn infof(&self, template: &str, args: &[Arg]) -> Result<&Self> {
        self.logf(Level::Info, template, args)
    }

    pub fn flush(&self) {
        if let Some(file) = &self.file {
            let _ = lock(file).flush();
        }
        let _ = lock(&self.console).flush();
    }

    /// Makes this logger the backend of the `log` crate macros.
    pub fn install(self) -> Result<&'static Logger> {
        let max_level = self.max_level();
        let logger: &'static Logger = Box::leak(Box::new(self));
        log::set_logger(logger).map_err(|e| Error::Logger(e.to_string()))?;
        log::set_max_level(max_level.to_level_filter());
        Ok(logger)
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Logger::enabled(self, Level::from(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        let level = Level::from(record.level());
        if Logger::enabled(self, level) {
            Logger::log(self, level, &format!("{}\n", record.args()));
        }
    }

    fn flush(&self) {
        Logger::flush(self)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("prefix", &self.prefix)
            .field("file_level", &self.file_level)
            .field("console_level", &self.console_level)
            .field("has_file", &self.file.is_some())
            .finish()
    }
}

pub struct LoggerBuilder {
    prefix: String,
    file_level: Level,
    console_level: Level,
    file: Option<Sink>,
    console: Option<Sink>,
    formatter: Formatter,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            file_level: Level::Debug,
            console_level: Level::Debug,
            file: None,
            console: None,
            formatter: Formatter::default(),
        }
    }
}

impl LoggerBuilder {
    /// Starts from the `log.*` keys of `config`:
    /// `log.prefix`, `log.level`, `log.console_level` and `log.file`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = Self::default().prefix(config.get_str("log.prefix").as_str());

        if config.contains("log.level") {
            builder = builder.file_level(config.get_str("log.level").to()?);
        }
        if config.contains("log.console_level") {
            builder = builder.console_level(config.get_str("log.console_level").to()?);
        }

        let file = config.get_str("log.file");
        if !file.is_empty() {
            builder = builder.file_path(file.as_str())?;
        }

        Ok(builder)
    }

    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn file_level(mut self, level: Level) -> Self {
        self.file_level = level;
        self
    }

    pub fn console_level(mut self, level: Level) -> Self {
        self.console_level = level;
        self
    }

    /// Appends to the file at `path`, creating it if needed.
    pub fn file_path(self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        log::debug!("logger: writing to {}", path.display());
        Ok(self.file_sink(io::LineWriter::new(file)))
    }

    pub fn file_sink(mut self, sink: impl Write + Send + 'static) -> Self {
        self.file = Some(Box::new(sink));
        self
    }

    /// Replaces the default stdout console.
    pub fn console_sink(mut self, sink: impl Write + Send + 'static) -> Self {
        self.console = Some(Box::new(sink));
        self
    }

    pub fn formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn build(self) -> Logger {
        Logger {
            prefix: self.prefix,
            file_level: self.file_level,
            console_level: self.console_level,
            file: self.file.map(Mutex::new),
            console: Mutex::new(self.console.unwrap_or_else(|| Box::new(io::stdout()) as Sink)),
            formatter: self.formatter,
        }
    }
}
