use common_log::config::{LogConfig, LogFileConfig, LoggerConfig, DEFAULT_PATTERN};
use common_log::logger::Logger;
use config_store::{Config, ReadMode};
use log::LevelFilter;
use serial_test::serial;
use tempfile::TempDir;

fn create_store_with_logging(dir: &TempDir) -> Config {
    let contents = serde_yaml::from_str(
        r#"
server:
  port: 19132
logging:
  level: debug
  loggers:
    - path_prefix: config_store
      level: warn
"#,
    )
    .expect("Failed to parse test yaml");
    Config::with_contents(dir.path().join("plugin_config.yml"), contents).expect("Failed to create config")
}

#[test]
fn test_log_config_from_store() {
    let dir = TempDir::new().unwrap();
    let mut store = create_store_with_logging(&dir);

    let config = LogConfig::from_store(&mut store, "logging").expect("Failed to read logging config");
    assert_eq!(config.level, "debug");
    assert_eq!(config.pattern, DEFAULT_PATTERN);
    assert!(config.file.is_none());
    assert_eq!(config.get_logger_config("config_store::store").map(|l| l.level.as_str()), Some("warn"));
    assert!(config.get_logger_config("yaml_value").is_none());
}

#[test]
fn test_log_config_defaults_when_missing() {
    let dir = TempDir::new().unwrap();
    let mut store = create_store_with_logging(&dir);

    let config = LogConfig::from_store(&mut store, "server.logging").expect("Failed to read logging config");
    assert_eq!(config, LogConfig::default());

    store.set_nested("broken.level", vec![1, 2], None, config_store::WriteMode::Defer);
    assert!(store.exists("broken", ReadMode::Cached));
    assert!(LogConfig::from_store(&mut store, "broken").is_err());
}

#[test]
fn test_build_console_config() {
    let config = LogConfig {
        loggers: vec![LoggerConfig { path_prefix: "config_store".to_string(), level: "error".to_string() }],
        ..LogConfig::default()
    };

    let built = Logger::build_config(&config).expect("Failed to build log config");
    assert_eq!(built.root().level(), LevelFilter::Info);
    assert_eq!(built.appenders().len(), 1);
    assert_eq!(built.loggers().len(), 1);
    assert_eq!(built.loggers()[0].level(), LevelFilter::Error);
}

#[test]
fn test_build_rolling_file_config() {
    let dir = TempDir::new().unwrap();
    let log_directory = dir.path().join("logs");
    let config = LogConfig {
        level: "TRACE".to_string(),
        file: Some(LogFileConfig {
            log_directory: log_directory.to_string_lossy().to_string(),
            log_file_name: "plugin.log".to_string(),
            max_file_size: 1024,
            max_zip_count: 2,
        }),
        ..LogConfig::default()
    };

    let built = Logger::build_config(&config).expect("Failed to build log config");
    assert_eq!(built.root().level(), LevelFilter::Trace);
    assert!(log_directory.join("plugin.log").exists());
}

#[test]
fn test_parse_level() {
    assert_eq!(Logger::parse_level("Warn"), LevelFilter::Warn);
    assert_eq!(Logger::parse_level("off"), LevelFilter::Off);
    assert_eq!(Logger::parse_level("verbose"), LevelFilter::Info);
}

#[test]
#[serial]
fn test_init_from_store_only_once() {
    let dir = TempDir::new().unwrap();
    let mut store = create_store_with_logging(&dir);

    assert!(common_log::reconfigure(&LogConfig::default()).is_err());
    common_log::init_from_store(&mut store, "logging").expect("Failed to initialize logger");
    log::debug!("Logger initialized from {}", store.path().display());

    assert!(common_log::init_with_config(&LogConfig::default()).is_err());
    assert!(common_log::reconfigure(&LogConfig::default()).is_ok());
}
