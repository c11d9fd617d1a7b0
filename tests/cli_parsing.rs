//! Tests for CLI argument parsing.

use std::path::PathBuf;

use clap::Parser;

use mail_posture::Config;

#[test]
fn test_parses_input_file_positional() {
    let config = Config::parse_from(["mail_posture", "domains.txt"]);
    assert_eq!(config.file, PathBuf::from("domains.txt"));
    assert!(config.output.is_none());
}

#[test]
fn test_dash_selects_stdin() {
    let config = Config::parse_from(["mail_posture", "-"]);
    assert_eq!(config.file.as_os_str(), "-");
}

#[test]
fn test_defaults_match_library_defaults() {
    let parsed = Config::parse_from(["mail_posture", "domains.txt"]);
    let defaults = Config::default();
    assert_eq!(parsed.max_concurrency, defaults.max_concurrency);
    assert_eq!(parsed.query_timeout, defaults.query_timeout);
}

#[test]
fn test_tunables_are_overridable() {
    let config = Config::parse_from([
        "mail_posture",
        "domains.txt",
        "--max-concurrency",
        "8",
        "--query-timeout",
        "2",
        "--output",
        "results.csv",
    ]);
    assert_eq!(config.max_concurrency, 8);
    assert_eq!(config.query_timeout, 2);
    assert_eq!(config.output, Some(PathBuf::from("results.csv")));
}

#[test]
fn test_missing_input_file_is_an_error() {
    let result = Config::try_parse_from(["mail_posture"]);
    assert!(result.is_err());
}

#[test]
fn test_rejects_unknown_log_level() {
    let result = Config::try_parse_from(["mail_posture", "domains.txt", "--log-level", "loud"]);
    assert!(result.is_err());
}
