//
// Copyright (c) 2024 envkit contributors
//
// This file is part of the envkit project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use getopt::{Scan, Scanner, EOF, UNRECOGNIZED};
use proptest::{
    prelude::TestCaseError, prop_assert, prop_assert_eq, strategy::Strategy,
    test_runner::TestRunner,
};

fn get_test_runner(cases: u32) -> TestRunner {
    TestRunner::new(proptest::test_runner::Config {
        cases,
        failure_persistence: None,

        ..proptest::test_runner::Config::default()
    })
}

// option strings built from ASCII letters, each optionally followed by ':'
fn optstring_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec((proptest::char::range('a', 'z'), proptest::bool::ANY), 1..8).prop_map(
        |entries| {
            let mut optstring = String::new();
            for (c, takes_value) in entries {
                if optstring.contains(c) {
                    continue;
                }
                optstring.push(c);
                if takes_value {
                    optstring.push(':');
                }
            }
            optstring
        },
    )
}

fn takes_value(optstring: &str, c: char) -> bool {
    let pos = optstring.find(c).unwrap();
    optstring[pos + 1..].starts_with(':')
}

fn collect_codes(scanner: &mut Scanner, args: &[String], optstring: &str) -> Vec<i32> {
    let mut codes = Vec::new();
    loop {
        let result = scanner.scan(args, optstring);
        codes.push(result.code());
        if result.is_end() || codes.len() > args.len() * 8 + 4 {
            break;
        }
    }
    codes
}

fn check_single_option(optstring: &str, value: &str) -> Result<(), TestCaseError> {
    for c in optstring.chars().filter(|c| *c != ':') {
        let mut scanner = Scanner::new();
        if takes_value(optstring, c) {
            let glued = vec!["prog".to_string(), format!("-{c}{value}")];
            prop_assert_eq!(scanner.scan(&glued, optstring), Scan::FlagWithValue(c, value));
            prop_assert_eq!(scanner.scan(&glued, optstring), Scan::EndOfInput);

            scanner.reset();
            let separate = vec!["prog".to_string(), format!("-{c}"), value.to_string()];
            prop_assert_eq!(
                scanner.scan(&separate, optstring),
                Scan::FlagWithValue(c, value)
            );
            prop_assert_eq!(scanner.scan(&separate, optstring), Scan::EndOfInput);
            prop_assert_eq!(scanner.index(), 3);
        } else {
            let args = vec!["prog".to_string(), format!("-{c}")];
            prop_assert_eq!(scanner.scan(&args, optstring), Scan::Flag(c));
            prop_assert_eq!(scanner.scan(&args, optstring), Scan::EndOfInput);
        }
    }
    Ok(())
}

#[test]
fn test_single_option_property() {
    get_test_runner(256_u32)
        .run(
            &(optstring_strategy(), "[a-zA-Z0-9]{1,12}"),
            |(optstring, value)| check_single_option(&optstring, &value),
        )
        .unwrap();
}

#[test]
fn test_reset_replays_property() {
    get_test_runner(256_u32)
        .run(
            &(
                optstring_strategy(),
                proptest::collection::vec("-{0,2}[a-z:]{0,4}", 0..6),
            ),
            |(optstring, tail)| {
                let mut args = vec!["prog".to_string()];
                args.extend(tail);

                let mut scanner = Scanner::new();
                let first = collect_codes(&mut scanner, &args, &optstring);
                scanner.reset();
                let second = collect_codes(&mut scanner, &args, &optstring);

                prop_assert_eq!(&first, &second);
                prop_assert_eq!(first.last(), Some(&EOF));
                Ok(())
            },
        )
        .unwrap();
}

#[test]
fn test_index_never_decreases_property() {
    get_test_runner(256_u32)
        .run(
            &(
                optstring_strategy(),
                proptest::collection::vec("-{0,2}[a-z:]{0,4}", 0..6),
            ),
            |(optstring, tail)| {
                let mut args = vec!["prog".to_string()];
                args.extend(tail);

                let mut scanner = Scanner::new();
                let mut last_index = scanner.index();
                for _ in 0..(args.len() * 8 + 4) {
                    let result = scanner.scan(&args, optstring.as_str());
                    prop_assert!(scanner.index() >= last_index);
                    prop_assert!(scanner.index() <= args.len());
                    last_index = scanner.index();
                    if result.is_end() {
                        prop_assert!(!scanner.in_cluster());
                        break;
                    }
                }
                Ok(())
            },
        )
        .unwrap();
}

#[test]
fn test_clustered_flags() {
    let args = ["prog", "-abc"];
    let mut scanner = Scanner::new();
    assert_eq!(scanner.scan(&args, "abc"), Scan::Flag('a'));
    assert_eq!(scanner.scan(&args, "abc"), Scan::Flag('b'));
    assert_eq!(scanner.scan(&args, "abc"), Scan::Flag('c'));
    assert_eq!(scanner.scan(&args, "abc"), Scan::EndOfInput);
}

#[test]
fn test_terminator_leaves_operand() {
    let args = ["prog", "--", "-x"];
    let mut scanner = Scanner::new();
    assert_eq!(scanner.scan(&args, "x"), Scan::EndOfInput);
    assert_eq!(scanner.value(&args), Some("-x"));
    assert_eq!(scanner.operands(&args), &["-x"]);
}

#[test]
fn test_unknown_and_missing_share_code() {
    let unknown_args = ["prog", "-z"];
    let missing_args = ["prog", "-d"];
    let mut scanner = Scanner::new();
    let unknown = scanner.scan(&unknown_args, "a");
    assert_eq!(unknown, Scan::Unrecognized('z'));

    scanner.reset();
    let missing = scanner.scan(&missing_args, "d:");
    assert_eq!(missing, Scan::MissingValue('d'));

    assert_eq!(unknown.code(), UNRECOGNIZED as i32);
    assert_eq!(missing.code(), UNRECOGNIZED as i32);
}

#[test]
fn test_reference_sequence() {
    let args = [
        "test_case",
        "-ab",
        "-c",
        "-C",
        "-d",
        "foo",
        "-e123",
        "xyz",
    ];
    let mut opts = getopt::Getopt::new(&args, "abcCd:e:f");
    let seen: Vec<Scan> = opts.by_ref().collect();
    assert_eq!(
        seen,
        vec![
            Scan::Flag('a'),
            Scan::Flag('b'),
            Scan::Flag('c'),
            Scan::Flag('C'),
            Scan::FlagWithValue('d', "foo"),
            Scan::FlagWithValue('e', "123"),
        ]
    );
    assert_eq!(opts.operands(), &["xyz"]);
}
