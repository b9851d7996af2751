//
// Copyright (c) 2024 envkit contributors
//
// This file is part of the envkit project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//
// envfmt FORMAT [ARG...]
//
// Every ARG is passed as text; numeric conversions parse it. The escapes
// \n, \t and \\ are expanded in FORMAT.
//

use std::io::{self, Write};
use std::process::ExitCode;

use envkit::Arg;

fn unescape(format: &str) -> String {
    let mut output = String::with_capacity(format.len());
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            output.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => output.push('\n'),
            Some('t') => output.push('\t'),
            Some('\\') => output.push('\\'),
            Some(other) => {
                output.push('\\');
                output.push(other);
            }
            None => output.push('\\'),
        }
    }
    output
}

fn run(args: &[String]) -> envkit::Result<()> {
    let Some((format, rest)) = args.split_first() else {
        return Err(envkit::Error::Format(String::from("not enough arguments")));
    };

    let arguments: Vec<Arg> = rest.iter().map(Arg::from).collect();
    let output = envkit::format(&unescape(format), &arguments)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("envfmt: {e}");
            ExitCode::FAILURE
        }
    }
}
