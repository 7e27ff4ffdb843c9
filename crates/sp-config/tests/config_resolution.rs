//! Configuration validation and resolution tests against real files.
//!
//! Covers:
//! - Knowledge and settings validation for files parsed from disk
//! - Resolution order (CLI > env > config dir > XDG)

use sp_config::resolve::{resolve_config, ConfigSource};
use sp_config::validate::{validate_knowledge, validate_settings, ValidationError};
use sp_config::{ClassifierSettings, KnowledgeFile};
use std::env;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use tempfile::TempDir;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const ENV_KEYS: [&str; 4] = [
    "SPAMPLAN_KNOWLEDGE",
    "SPAMPLAN_CLASSIFIER",
    "SPAMPLAN_CONFIG_DIR",
    "XDG_CONFIG_HOME",
];

const VALID_KNOWLEDGE: &str = r#"{
    "schema_version": "1.0.0",
    "description": "two-topic news corpus",
    "categories": ["news", "sport", "weather"],
    "message_counts": [40, 30, 10],
    "words": {
        "goal": [2, 25, 0],
        "election": [30, 0, 0],
        "rain": [1, 3, 9]
    }
}"#;

const VALID_SETTINGS: &str = r#"{
    "schema_version": "1.0.0",
    "strategy": "fisher",
    "top_n": 5,
    "smoothing": { "policy": "laplace" },
    "selection": "most_informative"
}"#;

struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    fn new(keys: &[&'static str]) -> Self {
        let saved = keys.iter().map(|k| (*k, env::var(k).ok())).collect();
        for key in keys {
            env::remove_var(key);
        }
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }
}

fn with_env_lock<T>(f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f()
}

fn write_config_dir(dir: &Path) {
    fs::create_dir_all(dir).expect("create config dir");
    fs::write(dir.join("knowledge.json"), VALID_KNOWLEDGE).expect("write knowledge");
    fs::write(dir.join("classifier.json"), VALID_SETTINGS).expect("write settings");
}

#[test]
fn test_valid_files_pass_validation() {
    let knowledge: KnowledgeFile = serde_json::from_str(VALID_KNOWLEDGE).unwrap();
    validate_knowledge(&knowledge).expect("valid knowledge should pass");
    assert_eq!(knowledge.category_index("weather"), Some(2));
    assert_eq!(knowledge.total_messages(), 80);

    let settings: ClassifierSettings = serde_json::from_str(VALID_SETTINGS).unwrap();
    validate_settings(&settings).expect("valid settings should pass");
    assert_eq!(settings.top_n, 5);
}

#[test]
fn test_empty_label_rejected() {
    let mut knowledge: KnowledgeFile = serde_json::from_str(VALID_KNOWLEDGE).unwrap();
    knowledge.categories[2] = "  ".to_string();
    let err = validate_knowledge(&knowledge).expect_err("blank label should fail");
    assert!(matches!(err, ValidationError::InvalidValue { .. }));
}

#[test]
fn test_unknown_strategy_is_a_parse_error() {
    let json = r#"{ "schema_version": "1.0.0", "strategy": "median" }"#;
    assert!(serde_json::from_str::<ClassifierSettings>(json).is_err());
}

#[test]
fn test_resolve_config_cli_over_env() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&ENV_KEYS);

        let temp = TempDir::new().expect("temp dir");
        let cli_dir = temp.path().join("cli");
        let env_dir = temp.path().join("env");
        write_config_dir(&cli_dir);
        write_config_dir(&env_dir);

        env::set_var("SPAMPLAN_KNOWLEDGE", env_dir.join("knowledge.json"));
        env::set_var("SPAMPLAN_CLASSIFIER", env_dir.join("classifier.json"));

        let cli_knowledge = cli_dir.join("knowledge.json");
        let cli_classifier = cli_dir.join("classifier.json");
        let paths = resolve_config(None, Some(&cli_knowledge), Some(&cli_classifier));

        assert_eq!(paths.knowledge_source, ConfigSource::CliArgument);
        assert_eq!(paths.classifier_source, ConfigSource::CliArgument);
        assert_eq!(paths.knowledge, Some(cli_knowledge));
        assert_eq!(paths.classifier, Some(cli_classifier));
    });
}

#[test]
fn test_resolve_config_env_over_config_dir() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&ENV_KEYS);

        let temp = TempDir::new().expect("temp dir");
        let env_dir = temp.path().join("env");
        let config_dir = temp.path().join("config_dir");
        write_config_dir(&env_dir);
        write_config_dir(&config_dir);

        env::set_var("SPAMPLAN_KNOWLEDGE", env_dir.join("knowledge.json"));
        env::set_var("SPAMPLAN_CONFIG_DIR", &config_dir);

        let paths = resolve_config(None, None, None);
        assert_eq!(paths.knowledge_source, ConfigSource::Environment);
        assert_eq!(paths.knowledge, Some(env_dir.join("knowledge.json")));

        // No direct classifier variable: the env config dir supplies it.
        assert_eq!(paths.classifier_source, ConfigSource::Environment);
        assert_eq!(paths.classifier, Some(config_dir.join("classifier.json")));
    });
}

#[test]
fn test_missing_env_file_falls_through() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&ENV_KEYS);

        let temp = TempDir::new().expect("temp dir");
        let config_dir = temp.path().join("explicit");
        write_config_dir(&config_dir);

        env::set_var("SPAMPLAN_KNOWLEDGE", temp.path().join("gone.json"));

        let paths = resolve_config(Some(&config_dir), None, None);
        assert_eq!(paths.knowledge, Some(config_dir.join("knowledge.json")));
        assert_eq!(paths.knowledge_source, ConfigSource::CliArgument);
    });
}

#[test]
fn test_xdg_config_home_is_searched() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&ENV_KEYS);

        let temp = TempDir::new().expect("temp dir");
        write_config_dir(&temp.path().join("spamplan"));
        env::set_var("XDG_CONFIG_HOME", temp.path());

        let paths = resolve_config(None, None, None);
        if cfg!(target_os = "linux") {
            assert_eq!(paths.knowledge_source, ConfigSource::XdgConfig);
            assert_eq!(
                paths.knowledge,
                Some(temp.path().join("spamplan").join("knowledge.json"))
            );
        }
    });
}
