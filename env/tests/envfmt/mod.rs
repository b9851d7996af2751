//
// Copyright (c) 2024 envkit contributors
//
// This file is part of the envkit project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use testkit::{run_test, TestPlan};

fn envfmt_test(args: &[&str], expected_out: &str, expected_err: &str, expected_exit_code: i32) {
    run_test(TestPlan {
        expected_out: String::from(expected_out),
        expected_err: String::from(expected_err),
        expected_exit_code,
        ..TestPlan::new("envfmt", args)
    });
}

#[test]
fn test_basic_string_output() {
    envfmt_test(&["Hello, %s!\\n", "World"], "Hello, World!\n", "", 0);
}

#[test]
fn test_numeric_conversions() {
    envfmt_test(&["%s has %d items", "bag", "3"], "bag has 3 items", "", 0);
    envfmt_test(
        &["%5.1f|%-4x|%c", "3.14159", "255", "zebra"],
        "  3.1|ff  |z",
        "",
        0,
    );
    envfmt_test(&["%e", "1234.5"], "1.234500e+03", "", 0);
}

#[test]
fn test_invalid_number_is_zero() {
    envfmt_test(&["%d", "abc"], "0", "", 0);
}

#[test]
fn test_unknown_conversion() {
    envfmt_test(
        &["%q"],
        "",
        "envfmt: invalid format string: unknown conversion specifier 'q'\n",
        1,
    );
}

#[test]
fn test_overflow() {
    envfmt_test(
        &["%10240s", "x"],
        "",
        "envfmt: formatted string is larger than the maximum size of 10240 bytes\n",
        1,
    );
}

#[test]
fn test_not_enough_arguments() {
    envfmt_test(
        &[],
        "",
        "envfmt: invalid format string: not enough arguments\n",
        1,
    );
}
