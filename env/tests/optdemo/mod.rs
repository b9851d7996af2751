//
// Copyright (c) 2024 envkit contributors
//
// This file is part of the envkit project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use testkit::{run_test, TestPlan};

const USAGE: &str = "Usage: optdemo -a -b -c -C -d AAA -e NNN -f\n";

fn optdemo_test(args: &[&str], expected_output: &str, expected_exit_code: i32) {
    run_test(TestPlan {
        expected_out: String::from(expected_output),
        expected_exit_code,
        ..TestPlan::new("optdemo", args)
    });
}

#[test]
fn test_optdemo_reference_command_line() {
    optdemo_test(
        &["-ab", "-c", "-C", "-d", "foo", "-e123", "xyz"],
        "command line : -ab -c -C -d foo -e123 xyz\n\
         \toption a\n\
         \toption b\n\
         \toption c\n\
         \toption C\n\
         \toption d with value foo\n\
         \toption e with value 123\n\
         \tAdditional non-option arguments: <xyz> \n",
        0,
    );
}

#[test]
fn test_optdemo_no_arguments() {
    optdemo_test(&[], "command line : \n", 0);
}

#[test]
fn test_optdemo_unhandled_option() {
    optdemo_test(
        &["-fa"],
        "command line : -fa\n\tWARNING:  no handler for option f\n\toption a\n",
        0,
    );
}

#[test]
fn test_optdemo_illegal_option() {
    optdemo_test(
        &["-z", "file"],
        &format!(
            "command line : -z file\n\tERROR:  illegal option -z\n{USAGE}\
             \tAdditional non-option arguments: <file> \n"
        ),
        1,
    );
}

#[test]
fn test_optdemo_missing_value() {
    optdemo_test(
        &["-a", "-d"],
        &format!("command line : -a -d\n\toption a\n\tERROR:  option -d requires a value\n{USAGE}"),
        1,
    );
}

#[test]
fn test_optdemo_terminator() {
    optdemo_test(
        &["-a", "--", "-b", "c"],
        "command line : -a -- -b c\n\toption a\n\tAdditional non-option arguments: <-b> <c> \n",
        0,
    );
}

#[test]
fn test_optdemo_lone_dash() {
    optdemo_test(
        &["-", "-a"],
        "command line : - -a\n\tAdditional non-option arguments: <-> <-a> \n",
        0,
    );
}

#[test]
fn test_optdemo_quiet_config() {
    run_test(TestPlan {
        env: vec![(
            String::from("ENVKIT_CONFIG"),
            String::from("tests/optdemo/quiet.conf"),
        )],
        expected_out: format!("\tERROR:  illegal option -z\n{USAGE}"),
        expected_exit_code: 1,
        ..TestPlan::new("optdemo", &["-a", "-z", "x"])
    });
}

#[test]
fn test_optdemo_bad_config() {
    run_test(TestPlan {
        env: vec![(
            String::from("ENVKIT_CONFIG"),
            String::from("tests/optdemo/missing.conf"),
        )],
        expected_err: String::from(
            "optdemo: Error processing io: No such file or directory (os error 2)\n",
        ),
        expected_exit_code: 1,
        ..TestPlan::new("optdemo", &["-a"])
    });
}
