//! spamplan configuration types and validation.
//!
//! This crate provides:
//! - Typed Rust structs for knowledge.json and classifier.json
//! - Config resolution (CLI → env → XDG → system → defaults)
//! - Semantic validation

pub mod knowledge;
pub mod resolve;
pub mod settings;
pub mod validate;

pub use knowledge::KnowledgeFile;
pub use resolve::{resolve_config, ConfigPaths, ConfigSource};
pub use settings::{ClassifierSettings, SelectionOrder, Smoothing, StrategyName, DEFAULT_TOP_N};
pub use validate::{ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
