use tempfile::TempDir;
use yptr::config::Config;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.indent_size, 4);
    assert!(!config.create_backup);
    assert_eq!(config.log_level, "warn");
}

#[test]
fn test_serialize_default_config() {
    let toml_str = toml::to_string(&Config::default()).expect("Failed to serialize config");

    assert!(toml_str.contains("indent_size = 4"));
    assert!(toml_str.contains("create_backup = false"));
    assert!(toml_str.contains("log_level = \"warn\""));
}

#[test]
fn test_deserialize_full_config() {
    let toml_str = r#"
        indent_size = 2
        create_backup = true
        log_level = "yptr=debug"
    "#;

    let config: Config = toml::from_str(toml_str).expect("Failed to deserialize config");

    assert_eq!(config.indent_size, 2);
    assert!(config.create_backup);
    assert_eq!(config.log_level, "yptr=debug");
}

#[test]
fn test_deserialize_partial_config() {
    // Only specify some fields; others should use defaults
    let config: Config = toml::from_str("create_backup = true").expect("Failed to deserialize config");

    assert!(config.create_backup);
    assert_eq!(config.indent_size, 4);
    assert_eq!(config.log_level, "warn");
}

#[test]
fn test_deserialize_empty_config() {
    let config: Config = toml::from_str("").expect("Failed to deserialize config");
    assert_eq!(config, Config::default());
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let original = Config {
        indent_size: 8,
        create_backup: true,
        log_level: "info".to_string(),
    };

    original.save_to(&path).unwrap();
    assert_eq!(Config::load_from(&path), original);
}

#[test]
fn test_invalid_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "indent_size = \"wide\"\n").unwrap();

    assert_eq!(Config::load_from(&path), Config::default());
}
