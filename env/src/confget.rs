//
// Copyright (c) 2024 envkit contributors
//
// This file is part of the envkit project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use envkit::{ConfStr, Env, Error, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ValueType {
    Str,
    Int,
    Float,
    Bool,
    Level,
}

/// confget - print a configuration value
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Configuration file to read; defaults to $ENVKIT_CONFIG
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// Require the value to parse as this type
    #[arg(short = 't', long = "type", value_enum, default_value_t = ValueType::Str)]
    value_type: ValueType,

    /// Key to look up, `section.name` for keys inside a section
    key: String,

    /// Printed when the key is not set
    default: Option<String>,
}

fn check_type(value: &ConfStr, value_type: ValueType) -> envkit::Result<()> {
    match value_type {
        ValueType::Str => Ok(()),
        ValueType::Int => value.to::<i64>().map(|_| ()),
        ValueType::Float => value.to::<f64>().map(|_| ()),
        ValueType::Bool => value.to::<bool>().map(|_| ()),
        ValueType::Level => value.to::<Level>().map(|_| ()),
    }
}

fn lookup(args: &Args) -> envkit::Result<ConfStr> {
    let env = match &args.file {
        Some(path) => Env::init(Some(path.as_path()))?,
        None => Env::from_env()?,
    };
    let config = env.config();

    let value = match (&args.default, config.contains(&args.key)) {
        (_, true) => config.get_str(&args.key),
        (Some(default), false) => ConfStr::new(default.as_str()),
        (None, false) => return Err(Error::Unset(args.key.clone())),
    };

    check_type(&value, args.value_type)?;
    Ok(value)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match lookup(&args) {
        Ok(value) => {
            println!("{value}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("confget: {e}");
            ExitCode::FAILURE
        }
    }
}
