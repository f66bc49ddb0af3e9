use std::io::Write;

use beanlens_config::{BeanlensConfig, ConfigError, LoggingConfig, ReflectionConfig};
use pretty_assertions::assert_eq;
use tempfile::{tempdir, NamedTempFile};

#[test]
fn empty_config_uses_defaults() {
    let config = BeanlensConfig::load_from_str("").expect("empty config should parse");
    assert_eq!(config, BeanlensConfig::default());
    assert!(config.reflection.class_cache_enabled);
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.json);
}

#[test]
fn loads_reflection_and_logging_sections_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[reflection]
class_cache_enabled = false
map_underscore_to_camel_case = true

[logging]
level = "beanlens.reflect=debug"
json = true
"#
    )
    .unwrap();

    let config = BeanlensConfig::load_from_path(file.path()).expect("config should load");
    assert_eq!(
        config,
        BeanlensConfig {
            reflection: ReflectionConfig {
                class_cache_enabled: false,
                map_underscore_to_camel_case: true,
            },
            logging: LoggingConfig {
                level: "beanlens.reflect=debug".to_owned(),
                json: true,
            },
        }
    );
}

#[test]
fn partial_sections_fill_in_defaults() {
    let config = BeanlensConfig::load_from_str(
        r#"
[reflection]
map_underscore_to_camel_case = true
"#,
    )
    .unwrap();
    assert!(config.reflection.class_cache_enabled);
    assert!(config.reflection.map_underscore_to_camel_case);
}

#[test]
fn rejects_unknown_keys() {
    let err = BeanlensConfig::load_from_str(
        r#"
[reflection]
class_cache_enabeld = false
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)), "{err:?}");
}

#[test]
fn missing_file_reports_io_error_with_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("beanlens.toml");
    let err = BeanlensConfig::load_from_path(&path).unwrap_err();
    match err {
        ConfigError::Io { path: reported, .. } => {
            assert_eq!(reported, path.display().to_string())
        }
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn env_filter_accepts_directive_strings() {
    let config = LoggingConfig {
        level: "beanlens.reflect=trace,warn".to_owned(),
        json: false,
    };
    // Builds without falling back; the directive string is kept as-is.
    let filter = config.env_filter().to_string();
    assert!(filter.contains("beanlens.reflect=trace"), "{filter}");
}
