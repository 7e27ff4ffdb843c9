//! Word/category count tables.
//!
//! A knowledge file lists the categories in a fixed order, the number of
//! messages seen per category, and for every known word one occurrence count
//! per category (aligned with `categories`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Complete knowledge configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeFile {
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Category labels, in the order every count row follows.
    pub categories: Vec<String>,

    /// Messages observed per category.
    pub message_counts: Vec<u64>,

    /// Word → per-category occurrence counts.
    #[serde(default)]
    pub words: BTreeMap<String, Vec<u64>>,
}

impl KnowledgeFile {
    /// Position of a category label, if known.
    pub fn category_index(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }

    /// Total number of messages across all categories.
    pub fn total_messages(&self) -> u64 {
        self.message_counts.iter().sum()
    }
}

impl Default for KnowledgeFile {
    /// The reference Spam/Ham corpus.
    fn default() -> Self {
        let rows: [(&str, [u64; 2]); 18] = [
            ("the", [1, 2]),
            ("quick", [1, 1]),
            ("brown", [0, 1]),
            ("fox", [0, 1]),
            ("jumps", [0, 1]),
            ("over", [0, 1]),
            ("lazy", [0, 1]),
            ("dog", [0, 1]),
            ("make", [1, 0]),
            ("money", [1, 0]),
            ("in", [1, 0]),
            ("online", [1, 0]),
            ("casino", [1, 0]),
            ("free", [57, 6]),
            ("bayes", [1, 10]),
            ("monad", [0, 22]),
            ("hello", [30, 32]),
            ("asdf", [40, 2]),
        ];

        KnowledgeFile {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            description: Some("Reference Spam/Ham corpus".to_string()),
            categories: vec!["Spam".to_string(), "Ham".to_string()],
            message_counts: vec![103, 57],
            words: rows
                .iter()
                .map(|(word, counts)| (word.to_string(), counts.to_vec()))
                .collect(),
        }
    }
}
