//
// Copyright (c) 2024 envkit contributors
//
// This file is part of the envkit project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//
// optdemo - scan the command line with the option string "abcCd:e:f"
// and report what was found.
//

use std::process::ExitCode;

use envkit::{Arg, Env, Level, Logger};
use getopt::{Scan, Scanner};

const OPTSTRING: &str = "abcCd:e:f";
const USAGE: &str = "Usage: optdemo -a -b -c -C -d AAA -e NNN -f\n";

// Returns false when any option was rejected.
fn scan_options(log: &Logger, args: &[String]) -> envkit::Result<bool> {
    let command_line = args.get(1..).unwrap_or_default().join(" ");
    log.infof("command line : %s\n", &[Arg::from(&command_line)])?;

    let mut scanner = Scanner::new();
    let mut clean = true;

    loop {
        match scanner.scan(args, OPTSTRING) {
            Scan::Flag(c @ ('a' | 'b' | 'c' | 'C')) => {
                log.infof("\toption %c\n", &[Arg::from(c)])?;
            }
            Scan::Flag(c) => {
                log.infof("\tWARNING:  no handler for option %c\n", &[Arg::from(c)])?;
            }
            Scan::FlagWithValue(c, value) => {
                log.infof(
                    "\toption %c with value %s\n",
                    &[Arg::from(c), Arg::from(value)],
                )?;
            }
            Scan::Unrecognized(c) => {
                clean = false;
                log.logf(Level::Error, "\tERROR:  illegal option -%c\n", &[Arg::from(c)])?;
                log.log(Level::Error, USAGE);
            }
            Scan::MissingValue(c) => {
                clean = false;
                log.logf(
                    Level::Error,
                    "\tERROR:  option -%c requires a value\n",
                    &[Arg::from(c)],
                )?;
                log.log(Level::Error, USAGE);
            }
            Scan::EndOfInput => break,
        }
    }

    let operands = scanner.operands(args);
    if !operands.is_empty() {
        let mut line = String::from("\tAdditional non-option arguments: ");
        for operand in operands {
            line.push_str(&format!("<{operand}> "));
        }
        line.push('\n');
        log.info(&line);
    }

    Ok(clean)
}

fn run(args: &[String]) -> envkit::Result<bool> {
    let (_config, logger) = Env::from_env()?.into_parts();
    let logger = logger.install()?;

    let result = scan_options(logger, args);
    logger.flush();
    result
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("optdemo: {e}");
            ExitCode::FAILURE
        }
    }
}
