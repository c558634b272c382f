//! Configuration loading tests
//!
//! Tests touching `JASMINE_CONFIG` run serially since the process
//! environment is shared.

use std::path::PathBuf;
use std::time::Duration;

use jasmine::config::{CONFIG_ENV_VAR, DEFAULT_PHRASE};
use jasmine::{ConfigError, EngineConfig, SequenceWordSource, TetrisEngine};
use serial_test::serial;

fn temp_config(name: &str, json: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("jasmine-{}-{}.json", name, std::process::id()));
    std::fs::write(&path, json).unwrap();
    path
}

// ============================================================================
// Defaults and Validation
// ============================================================================

mod defaults {
    use super::*;

    #[test]
    fn default_board_is_twelve_by_eight() {
        let config = EngineConfig::default();
        assert_eq!((config.rows, config.columns), (12, 8));
        assert_eq!(config.upcoming_count, 3);
        assert_eq!(config.total_time(), Duration::from_secs(120));
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.phrases, vec![DEFAULT_PHRASE.to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn engine_uses_configured_dimensions() {
        let config = EngineConfig {
            rows: 5,
            columns: 3,
            upcoming_count: 4,
            ..EngineConfig::default()
        };
        let engine = TetrisEngine::new(config).unwrap();

        assert_eq!(engine.grid().rows(), 5);
        assert_eq!(engine.grid().columns(), 3);
        assert_eq!(engine.upcoming_tiles().len(), 4);
    }

    #[test]
    fn engine_rejects_invalid_config() {
        let config = EngineConfig { upcoming_count: 0, ..EngineConfig::default() };
        assert!(matches!(TetrisEngine::new(config), Err(ConfigError::Invalid(_))));

        let config = EngineConfig { rows: 0, ..EngineConfig::default() };
        assert!(matches!(TetrisEngine::new(config), Err(ConfigError::Invalid(_))));

        let config = EngineConfig { phrases: vec![], ..EngineConfig::default() };
        let source = Box::new(SequenceWordSource::new(["A"]));
        assert!(matches!(
            TetrisEngine::with_word_source(config, source),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_empty_board() {
        let config = EngineConfig { rows: 0, ..EngineConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_zero_lookahead() {
        let config = EngineConfig { upcoming_count: 0, ..EngineConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_zero_tick_interval() {
        let config = EngineConfig { tick_interval_ms: 0, ..EngineConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_empty_dictionary() {
        let config = EngineConfig { phrases: vec![], ..EngineConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = EngineConfig { phrases: vec![String::new()], ..EngineConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}

// ============================================================================
// JSON Loading
// ============================================================================

mod json {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{"rows": 6, "phrases": ["AB", "CD"]}"#).unwrap();

        assert_eq!(config.rows, 6);
        assert_eq!(config.columns, 8);
        assert_eq!(config.phrases, vec!["AB", "CD"]);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let result = EngineConfig::from_json("{rows: 6");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn invalid_values_are_rejected_on_load() {
        let result = EngineConfig::from_json(r#"{"columns": 0}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = EngineConfig { rows: 7, ..EngineConfig::default() };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = EngineConfig::load("/definitely/not/here/jasmine.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}

// ============================================================================
// Environment Override
// ============================================================================

mod environment {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn unset_variable_gives_defaults() {
        std::env::remove_var(CONFIG_ENV_VAR);
        assert_eq!(EngineConfig::from_env().unwrap(), EngineConfig::default());
    }

    #[test]
    #[serial]
    fn variable_points_at_config_file() {
        let path = temp_config("env", r#"{"rows": 4, "columns": 4, "total_time_ms": 30000}"#);
        std::env::set_var(CONFIG_ENV_VAR, &path);

        let config = EngineConfig::from_env();
        std::env::remove_var(CONFIG_ENV_VAR);
        let _ = std::fs::remove_file(&path);

        let config = config.unwrap();
        assert_eq!((config.rows, config.columns), (4, 4));
        assert_eq!(config.total_time(), Duration::from_secs(30));
    }

    #[test]
    #[serial]
    fn bad_file_surfaces_error() {
        let path = temp_config("bad", "not json");
        std::env::set_var(CONFIG_ENV_VAR, &path);

        let result = EngineConfig::from_env();
        std::env::remove_var(CONFIG_ENV_VAR);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}

#[test]
#[serial]
fn error_messages_name_the_problem() {
    std::env::remove_var(CONFIG_ENV_VAR);
    let err = EngineConfig::from_json(r#"{"rows": 0}"#).unwrap_err();
    assert!(err.to_string().contains("invalid config"));
}
