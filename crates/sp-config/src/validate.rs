//! Configuration validation errors and semantic validation.

use std::collections::HashSet;

use thiserror::Error;

use crate::knowledge::KnowledgeFile;
use crate::settings::{ClassifierSettings, Smoothing};

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::SemanticError(_) => 63,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

fn check_version(actual: &str) -> ValidationResult<()> {
    if actual != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

/// Validate a knowledge table semantically.
pub fn validate_knowledge(knowledge: &KnowledgeFile) -> ValidationResult<()> {
    check_version(&knowledge.schema_version)?;

    if knowledge.categories.len() < 2 {
        return Err(ValidationError::InvalidValue {
            field: "categories".to_string(),
            message: format!(
                "At least two categories are required, got {}",
                knowledge.categories.len()
            ),
        });
    }

    let mut seen = HashSet::new();
    for (i, category) in knowledge.categories.iter().enumerate() {
        if category.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: format!("categories[{}]", i),
                message: "Category labels must not be empty".to_string(),
            });
        }
        if !seen.insert(category.as_str()) {
            return Err(ValidationError::InvalidValue {
                field: format!("categories[{}]", i),
                message: format!("Duplicate category '{}'", category),
            });
        }
    }

    if knowledge.message_counts.len() != knowledge.categories.len() {
        return Err(ValidationError::InvalidValue {
            field: "message_counts".to_string(),
            message: format!(
                "Expected {} counts (one per category), got {}",
                knowledge.categories.len(),
                knowledge.message_counts.len()
            ),
        });
    }

    if knowledge.total_messages() == 0 {
        return Err(ValidationError::SemanticError(
            "At least one category must have a non-zero message count".to_string(),
        ));
    }

    for (word, counts) in &knowledge.words {
        validate_word_row(knowledge, word, counts)?;
    }

    Ok(())
}

/// Validate one word row against the category message counts.
fn validate_word_row(knowledge: &KnowledgeFile, word: &str, counts: &[u64]) -> ValidationResult<()> {
    if word.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "words".to_string(),
            message: "Words must not be empty strings".to_string(),
        });
    }

    if counts.len() != knowledge.categories.len() {
        return Err(ValidationError::InvalidValue {
            field: format!("words.{}", word),
            message: format!(
                "Expected {} counts (one per category), got {}",
                knowledge.categories.len(),
                counts.len()
            ),
        });
    }

    // A word cannot occur in more messages than the category has seen.
    for ((count, total), category) in counts
        .iter()
        .zip(&knowledge.message_counts)
        .zip(&knowledge.categories)
    {
        if count > total {
            return Err(ValidationError::InvalidValue {
                field: format!("words.{}", word),
                message: format!(
                    "Count {} exceeds the {} messages seen for '{}'",
                    count, total, category
                ),
            });
        }
    }

    Ok(())
}

/// Validate classifier settings semantically.
pub fn validate_settings(settings: &ClassifierSettings) -> ValidationResult<()> {
    check_version(&settings.schema_version)?;

    if settings.top_n == 0 {
        return Err(ValidationError::InvalidValue {
            field: "top_n".to_string(),
            message: "Must be at least 1".to_string(),
        });
    }

    if let Smoothing::Fixed { epsilon } = settings.smoothing {
        if !(epsilon > 0.0 && epsilon < 1.0) {
            return Err(ValidationError::InvalidValue {
                field: "smoothing.epsilon".to_string(),
                message: format!("Must be in (0, 1), got {}", epsilon),
            });
        }
    }

    Ok(())
}
