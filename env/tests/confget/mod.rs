//
// Copyright (c) 2024 envkit contributors
//
// This file is part of the envkit project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use testkit::{run_test, run_test_with_checker, TestPlan};

const SAMPLE: &str = "tests/confget/sample.conf";

fn confget_test(args: &[&str], expected_out: &str, expected_err: &str, expected_exit_code: i32) {
    run_test(TestPlan {
        expected_out: String::from(expected_out),
        expected_err: String::from(expected_err),
        expected_exit_code,
        ..TestPlan::new("confget", args)
    });
}

#[test]
fn test_confget_plain_value() {
    confget_test(&["-f", SAMPLE, "name"], "demo\n", "", 0);
}

#[test]
fn test_confget_section_value() {
    confget_test(&["-f", SAMPLE, "log.level"], "info\n", "", 0);
    confget_test(&["-f", SAMPLE, "--type", "level", "log.level"], "info\n", "", 0);
}

#[test]
fn test_confget_typed_value() {
    confget_test(&["-f", SAMPLE, "-t", "int", "threads"], "4\n", "", 0);
    confget_test(
        &["-f", SAMPLE, "-t", "int", "name"],
        "",
        "confget: cannot convert \"demo\" to i64\n",
        1,
    );
}

#[test]
fn test_confget_default() {
    confget_test(&["-f", SAMPLE, "port", "8080"], "8080\n", "", 0);
    confget_test(&["-f", SAMPLE, "name", "ignored"], "demo\n", "", 0);
    confget_test(&["-f", SAMPLE, "port"], "", "confget: key 'port' is not set\n", 1);
}

#[test]
fn test_confget_from_environment() {
    run_test(TestPlan {
        env: vec![(String::from("ENVKIT_CONFIG"), String::from(SAMPLE))],
        expected_out: String::from("4\n"),
        ..TestPlan::new("confget", &["threads"])
    });
}

#[test]
fn test_confget_missing_file() {
    run_test_with_checker(
        TestPlan::new("confget", &["-f", "tests/confget/nope.conf", "name"]),
        |_, output| {
            assert_eq!(output.status.code(), Some(1));
            assert!(output.stdout.is_empty());
            assert!(String::from_utf8_lossy(&output.stderr).starts_with("confget: "));
        },
    );
}
