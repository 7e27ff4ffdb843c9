//! In-memory knowledge base over a [`KnowledgeFile`].

use sp_config::validate::{validate_knowledge, ValidationResult};
use sp_config::KnowledgeFile;

use super::KnowledgeBase;

/// Word/category count table with `String` category labels.
#[derive(Debug, Clone)]
pub struct WordTable {
    file: KnowledgeFile,
}

impl WordTable {
    /// Build a table from a knowledge file after validating it.
    pub fn from_file(file: KnowledgeFile) -> ValidationResult<Self> {
        validate_knowledge(&file)?;
        Ok(WordTable { file })
    }

    /// The reference Spam/Ham corpus.
    pub fn reference() -> Self {
        WordTable {
            file: KnowledgeFile::default(),
        }
    }
}

impl KnowledgeBase for WordTable {
    type Category = String;

    fn categories(&self) -> Vec<String> {
        self.file.categories.clone()
    }

    fn known_words(&self) -> Vec<&str> {
        self.file.words.keys().map(String::as_str).collect()
    }

    fn message_count(&self, category: &String) -> u64 {
        self.file
            .category_index(category)
            .and_then(|i| self.file.message_counts.get(i).copied())
            .unwrap_or(0)
    }

    fn word_count(&self, word: &str, category: &String) -> u64 {
        let Some(i) = self.file.category_index(category) else {
            return 0;
        };
        self.file
            .words
            .get(word)
            .and_then(|counts| counts.get(i).copied())
            .unwrap_or(0)
    }

    fn total_messages(&self) -> u64 {
        self.file.total_messages()
    }
}
