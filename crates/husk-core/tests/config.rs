use std::path::PathBuf;

use husk_core::config::{dirs_path, GlobalConfig, ImportPrefixes, DEFAULT_HOST, DEFAULT_PREFIX};

#[test]
fn test_dirs_path_contains_husk() {
    assert!(dirs_path().ends_with(".husk"));
}

#[test]
fn test_global_config_parse_from_toml() {
    let toml = r#"
token = "secret"
verbose = true
workspace = "/home/me/ws"
server = "localhost:8080"
build-command = ["go", "install"]

[prefixes]
"mirror.example.org" = "pkgs.example.org"
"#;
    let config: GlobalConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.token.as_deref(), Some("secret"));
    assert!(config.verbose);
    assert!(!config.debug);
    assert_eq!(config.workspace, Some(PathBuf::from("/home/me/ws")));
    assert_eq!(config.build_command, vec!["go", "install"]);

    let prefixes = config.import_prefixes_with(None);
    assert_eq!(prefixes.host("mirror.example.org"), Some("pkgs.example.org"));
    assert_eq!(prefixes.host(DEFAULT_PREFIX), Some(DEFAULT_HOST));
    assert_eq!(config.publish_server(&prefixes), "localhost:8080");
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = GlobalConfig::load_from(&dir.path().join("config.toml")).unwrap();
    assert!(config.token.is_none());
    assert!(config.build_command.is_empty());
}

#[test]
fn test_invalid_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "verbose = \"maybe\"").unwrap();
    assert!(GlobalConfig::load_from(&path).is_err());
}

#[test]
fn test_server_override_replaces_default_host() {
    let config = GlobalConfig::default();
    let prefixes = config.import_prefixes_with(Some("localhost:8080"));
    assert_eq!(prefixes.default_host(), "localhost:8080");
    assert_eq!(config.publish_server(&prefixes), "localhost:8080");
    assert_eq!(config.import_prefixes_with(Some("")).default_host(), DEFAULT_HOST);
}

#[test]
fn test_workspace_env_wins() {
    let config = GlobalConfig {
        workspace: Some(PathBuf::from("/from/config")),
        ..GlobalConfig::default()
    };
    assert_eq!(
        config.workspace_dir_with(Some(PathBuf::from("/from/env"))).unwrap(),
        PathBuf::from("/from/env")
    );
    assert_eq!(
        config.workspace_dir_with(None).unwrap(),
        PathBuf::from("/from/config")
    );
    assert!(GlobalConfig::default().workspace_dir_with(None).is_err());
}

#[test]
fn test_managed_imports() {
    let mut prefixes = ImportPrefixes::default();
    prefixes.insert("husk.dev/mirror", "mirror.husk.dev");
    assert!(prefixes.is_managed("husk.dev/acme/hello"));
    assert!(!prefixes.is_managed("husk.devious/acme/hello"));
    assert!(!prefixes.is_managed("husk.dev"));
    assert!(!prefixes.is_managed("fmt"));
    assert_eq!(prefixes.prefix_of("husk.dev/mirror/a/b"), Some("husk.dev/mirror"));
    assert_eq!(prefixes.prefix_of("husk.dev/acme/b"), Some("husk.dev"));

    let imports = vec![
        "fmt".to_string(),
        "husk.dev/acme/hello".to_string(),
        "github.com/x/y".to_string(),
    ];
    assert_eq!(prefixes.managed(&imports), vec!["husk.dev/acme/hello"]);
}
