//! Layered configuration loading through `EXPLORER_CONFIG` and `EXPLORER__*` overrides.

use explorer_core::config::AppConfig;
use serial_test::serial;
use std::io::Write;

fn write_config(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("explorer.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
#[serial]
fn test_load_reads_file_named_by_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[daemon]
url = "http://10.0.0.5:6311"

[block_history]
max_blocks = 120
delegates_path = "/var/lib/explorer/delegates.json"

[market]
enabled = false
"#,
    );

    std::env::set_var("EXPLORER_CONFIG", &path);
    let config = AppConfig::load();
    std::env::remove_var("EXPLORER_CONFIG");
    let config = config.unwrap();

    assert_eq!(config.daemon.url, "http://10.0.0.5:6311");
    assert_eq!(config.block_history.max_blocks, 120);
    assert_eq!(
        config.block_history.delegates_path,
        std::path::PathBuf::from("/var/lib/explorer/delegates.json")
    );
    assert!(!config.market.enabled);
    // untouched sections keep their defaults
    assert_eq!(config.block_history.idle_poll_ms, 2_000);
    assert_eq!(config.chain_stats.refresh_interval_seconds, 60);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_env_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[daemon]\nurl = \"http://10.0.0.5:6311\"\n");

    std::env::set_var("EXPLORER__DAEMON__URL", "http://192.168.1.9:6311");
    let config = AppConfig::from_file(&path);
    std::env::remove_var("EXPLORER__DAEMON__URL");

    assert_eq!(config.unwrap().daemon.url, "http://192.168.1.9:6311");
}

#[test]
#[serial]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::from_file(dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.daemon.url, "http://127.0.0.1:6311");
    assert_eq!(config.block_history.max_blocks, 50);
    assert!(config.validate().is_ok());
}
