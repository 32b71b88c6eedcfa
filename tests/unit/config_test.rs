//! Tests for config file loading

use std::fs;

use arborist::config::{ArboristConfig, DEFAULT_API_URL};
use arborist::error::ConfigError;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn loads_yaml_by_default() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        ".arborist.yaml",
        "noop: false\nexclude_patterns: ['^release-']\nrepos:\n  - repo: lsst/afw\n    noop: false\n",
    );

    let config = ArboristConfig::load(&path).unwrap();

    assert!(!config.noop);
    assert_eq!(config.exclude_patterns, ["^release-"]);
    assert_eq!(config.repos[0].full_name, "lsst/afw");
    assert_eq!(config.api_url(), DEFAULT_API_URL);
}

#[test]
fn loads_toml_by_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "arborist.toml",
        "api_url = \"https://ghe.example.com/api/v3\"\n\n[[repos]]\nrepo = \"lsst/afw\"\n",
    );

    let config = ArboristConfig::load(&path).unwrap();

    assert!(config.noop);
    assert_eq!(config.api_url(), "https://ghe.example.com/api/v3");
    assert_eq!(config.identities().unwrap()[0].to_string(), "lsst/afw");
}

#[test]
fn missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();

    let err = ArboristConfig::load(&dir.path().join("absent.yaml")).unwrap_err();

    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("absent.yaml"));
}

#[test]
fn malformed_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.yaml", "repos: {not: [a list\n");

    let err = ArboristConfig::load(&path).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn invalid_repository_rejected() {
    for bad in ["afw", "lsst/", "/afw", "lsst/afw/extra", "lsst/a fw"] {
        let config =
            ArboristConfig::from_yaml_str(&format!("repos:\n  - repo: \"{bad}\"\n")).unwrap();
        assert!(
            matches!(config.identities(), Err(ConfigError::InvalidRepository(_))),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn identities_keep_configuration_order() {
    let config = ArboristConfig::from_yaml_str(
        "repos:\n  - repo: z/last\n  - repo: a/first\n  - repo: m/middle\n",
    )
    .unwrap();

    let names: Vec<_> = config.identities().unwrap().iter().map(ToString::to_string).collect();

    assert_eq!(names, ["z/last", "a/first", "m/middle"]);
}

#[test]
fn same_repository_in_different_case_is_duplicate() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        ".arborist.yaml",
        "repos:\n  - repo: org/a\n    noop: false\n  - repo: Org/a\n    noop: false\n",
    );

    let config = ArboristConfig::load(&path).unwrap();
    let err = config.identities().unwrap_err();

    assert!(matches!(err, ConfigError::DuplicateRepository(ref name) if name == "Org/a"));
    assert!(err.to_string().contains("more than once"));
}
