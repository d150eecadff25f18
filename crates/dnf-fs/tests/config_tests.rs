use dnf_fs::{ConfigStore, Error};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde::Deserialize;
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Deserialize, PartialEq)]
struct TestConfig {
    name: String,
    mirrors: Vec<String>,
}

#[rstest]
#[case("manifest.toml", "name = \"bash\"\nmirrors = [\"http://m/\"]\n")]
#[case("manifest.json", r#"{"name": "bash", "mirrors": ["http://m/"]}"#)]
#[case("manifest.yaml", "name: bash\nmirrors:\n  - http://m/\n")]
#[case("manifest.YML", "name: bash\nmirrors: [\"http://m/\"]\n")]
fn test_load_by_extension(#[case] file_name: &str, #[case] content: &str) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(file_name);
    fs::write(&path, content).unwrap();

    let config: TestConfig = ConfigStore::new().load(&path).unwrap();

    assert_eq!(
        config,
        TestConfig {
            name: "bash".into(),
            mirrors: vec!["http://m/".into()],
        }
    );
}

#[test]
fn test_load_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("manifest.ini");
    fs::write(&path, "name=bash").unwrap();

    let result: Result<TestConfig, _> = ConfigStore::new().load(&path);
    assert!(matches!(
        result,
        Err(Error::UnsupportedFormat { extension }) if extension == "ini"
    ));
}

#[test]
fn test_load_malformed_toml() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("manifest.toml");
    fs::write(&path, "name = \n").unwrap();

    let result: Result<TestConfig, _> = ConfigStore::new().load(&path);
    match result {
        Err(Error::ConfigParse { format, path: p, .. }) => {
            assert_eq!(format, "TOML");
            assert_eq!(p, path);
        }
        other => panic!("expected ConfigParse, got {other:?}"),
    }
}

#[test]
fn test_load_missing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.json");

    let result: Result<TestConfig, _> = ConfigStore::new().load(&path);
    assert!(matches!(result, Err(Error::Io { .. })));
}
