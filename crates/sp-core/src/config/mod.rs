//! Configuration loading and validation for spamplan.
//!
//! This module handles:
//! - Loading knowledge and classifier files (JSON or TOML, by extension)
//! - Config resolution order (CLI > env > config dir > XDG > system > defaults)
//! - Semantic validation via `sp-config`
//! - Provenance (path, source and content hash) for reports

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub use sp_config::validate::ValidationError;
pub use sp_config::{
    ClassifierSettings, ConfigSource, KnowledgeFile, SelectionOrder, Smoothing, StrategyName,
    CONFIG_SCHEMA_VERSION,
};
use sp_config::resolve_config;
use sp_config::validate::{validate_knowledge, validate_settings};

use crate::classify::ClassifierOptions;
use crate::knowledge::WordTable;

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Invalid JSON in config file {path}: {source}")]
    JsonError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid TOML in config file {path}: {source}")]
    TomlError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Semantic validation failed: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema version mismatch in {path}: expected {expected}, got {actual}")]
    VersionMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },
}

/// Resolved configuration with provenance information.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The loaded word/category counts.
    pub knowledge: KnowledgeFile,
    /// Path to the knowledge file (None if using the reference corpus).
    pub knowledge_path: Option<PathBuf>,
    /// Hash of the knowledge file content (None if using defaults).
    pub knowledge_hash: Option<String>,
    pub knowledge_source: ConfigSource,

    /// The loaded classifier settings.
    pub settings: ClassifierSettings,
    /// Path to the classifier file (None if using defaults).
    pub settings_path: Option<PathBuf>,
    /// Hash of the classifier file content (None if using defaults).
    pub settings_hash: Option<String>,
    pub settings_source: ConfigSource,
}

impl ResolvedConfig {
    /// Built-in reference corpus and default settings.
    pub fn builtin() -> Self {
        ResolvedConfig {
            knowledge: KnowledgeFile::default(),
            knowledge_path: None,
            knowledge_hash: None,
            knowledge_source: ConfigSource::BuiltinDefault,
            settings: ClassifierSettings::default(),
            settings_path: None,
            settings_hash: None,
            settings_source: ConfigSource::BuiltinDefault,
        }
    }

    /// In-memory knowledge base for the loaded counts.
    pub fn word_table(&self) -> Result<WordTable, ConfigError> {
        Ok(WordTable::from_file(self.knowledge.clone())?)
    }

    /// Classifier construction options from the loaded settings.
    pub fn classifier_options(&self) -> ClassifierOptions {
        ClassifierOptions {
            smoothing: self.settings.smoothing,
            selection: self.settings.selection,
        }
    }

    /// Provenance summary for reports.
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            knowledge_path: self.knowledge_path.clone(),
            knowledge_hash: self.knowledge_hash.clone(),
            knowledge_source: self.knowledge_source.to_string(),
            knowledge_schema_version: self.knowledge.schema_version.clone(),
            categories: self.knowledge.categories.clone(),
            known_words: self.knowledge.words.len(),
            settings_path: self.settings_path.clone(),
            settings_hash: self.settings_hash.clone(),
            settings_source: self.settings_source.to_string(),
            settings: self.settings.clone(),
        }
    }
}

/// Config snapshot for reports.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSnapshot {
    pub knowledge_path: Option<PathBuf>,
    pub knowledge_hash: Option<String>,
    pub knowledge_source: String,
    pub knowledge_schema_version: String,
    pub categories: Vec<String>,
    pub known_words: usize,
    pub settings_path: Option<PathBuf>,
    pub settings_hash: Option<String>,
    pub settings_source: String,
    pub settings: ClassifierSettings,
}

/// Configuration resolution options.
#[derive(Debug, Default)]
pub struct ConfigOptions {
    /// Explicit config directory.
    pub config_dir: Option<PathBuf>,
    /// Explicit knowledge file path (highest priority).
    pub knowledge_path: Option<PathBuf>,
    /// Explicit classifier settings path (highest priority).
    pub classifier_path: Option<PathBuf>,
}

/// Load configuration with the standard resolution order.
///
/// Missing files fall back to the built-in reference corpus and default
/// settings; an explicitly named file that does not exist is an error.
pub fn load_config(options: &ConfigOptions) -> Result<ResolvedConfig, ConfigError> {
    let paths = resolve_config(
        options.config_dir.as_deref(),
        options.knowledge_path.as_deref(),
        options.classifier_path.as_deref(),
    );

    let (knowledge, knowledge_hash) = match &paths.knowledge {
        Some(path) => {
            let (file, hash) = load_file::<KnowledgeFile>(path)?;
            check_version(path, &file.schema_version)?;
            (file, Some(hash))
        }
        None => (KnowledgeFile::default(), None),
    };

    let (settings, settings_hash) = match &paths.classifier {
        Some(path) => {
            let (file, hash) = load_file::<ClassifierSettings>(path)?;
            check_version(path, &file.schema_version)?;
            (file, Some(hash))
        }
        None => (ClassifierSettings::default(), None),
    };

    validate_knowledge(&knowledge)?;
    validate_settings(&settings)?;

    tracing::debug!(
        knowledge = ?paths.knowledge,
        knowledge_source = %paths.knowledge_source,
        classifier = ?paths.classifier,
        classifier_source = %paths.classifier_source,
        "configuration resolved"
    );

    Ok(ResolvedConfig {
        knowledge,
        knowledge_path: paths.knowledge,
        knowledge_hash,
        knowledge_source: paths.knowledge_source,
        settings,
        settings_path: paths.classifier,
        settings_hash,
        settings_source: paths.classifier_source,
    })
}

/// Read and parse one config file; `.toml` files use TOML, anything else JSON.
fn load_file<T: DeserializeOwned>(path: &Path) -> Result<(T, String), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let hash = compute_hash(&content);

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let parsed = if is_toml {
        toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.to_path_buf(),
            source: e,
        })?
    } else {
        serde_json::from_str(&content).map_err(|e| ConfigError::JsonError {
            path: path.to_path_buf(),
            source: e,
        })?
    };

    Ok((parsed, hash))
}

fn check_version(path: &Path, actual: &str) -> Result<(), ConfigError> {
    if actual != CONFIG_SCHEMA_VERSION {
        return Err(ConfigError::VersionMismatch {
            path: path.to_path_buf(),
            expected: CONFIG_SCHEMA_VERSION.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

/// Content fingerprint for provenance (not cryptographic).
fn compute_hash(content: &str) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}
