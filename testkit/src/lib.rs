//
// Copyright (c) 2024 envkit contributors
//
// This file is part of the envkit project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// One invocation of a workspace binary and what it must produce.
#[derive(Debug, Clone, Default)]
pub struct TestPlan {
    pub cmd: String,
    pub args: Vec<String>,
    /// Extra environment for the child process.
    pub env: Vec<(String, String)>,
    pub expected_out: String,
    pub expected_err: String,
    pub expected_exit_code: i32,
}

impl TestPlan {
    pub fn new(cmd: &str, args: &[&str]) -> Self {
        Self {
            cmd: cmd.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }
}

/// Location of a built binary, relative to the package directory the
/// tests run in.
pub fn bin_path(cmd: &str) -> PathBuf {
    let profile = if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    };

    let target_dir = match std::env::var_os("CARGO_TARGET_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()
            .expect("no current directory")
            .parent()
            .expect("package directory has no parent") // workspace root
            .join("target"),
    };

    target_dir.join(profile).join(cmd)
}

/// Runs `cmd` with `args` and `env`, returning whatever it produced.
pub fn run_test_base(cmd: &str, args: &[String], env: &[(String, String)]) -> Output {
    let mut command = Command::new(bin_path(cmd));
    command
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    for (key, value) in env {
        command.env(key, value);
    }

    command
        .output()
        .unwrap_or_else(|e| panic!("failed to run {cmd}: {e}"))
}

pub fn run_test(plan: TestPlan) {
    run_test_with_checker(plan, |plan, output| {
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert_eq!(stdout, plan.expected_out);

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert_eq!(stderr, plan.expected_err);

        assert_eq!(output.status.code(), Some(plan.expected_exit_code));
    });
}

pub fn run_test_with_checker<F: FnMut(&TestPlan, &Output)>(plan: TestPlan, mut checker: F) {
    let output = run_test_base(&plan.cmd, &plan.args, &plan.env);
    checker(&plan, &output);
}
