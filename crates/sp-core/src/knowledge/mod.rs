//! Read-only access to word/category statistics.
//!
//! The engine never looks at how counts are stored; it only needs the
//! [`KnowledgeBase`] accessors. [`WordTable`] is the in-memory implementation
//! backed by a validated knowledge file.

mod table;

pub use table::WordTable;

use std::fmt;
use std::hash::Hash;

/// Count source for categories and words.
///
/// Lookups for unknown words or categories return zero; they never fail.
pub trait KnowledgeBase {
    /// Category label type.
    type Category: Clone + Eq + Hash + fmt::Debug + fmt::Display;

    /// Categories in their canonical order.
    fn categories(&self) -> Vec<Self::Category>;

    /// Every word with recorded counts, in a stable order.
    fn known_words(&self) -> Vec<&str>;

    /// Messages observed for `category` (0 if unknown).
    fn message_count(&self, category: &Self::Category) -> u64;

    /// Messages in `category` containing `word` (0 if unknown).
    fn word_count(&self, word: &str, category: &Self::Category) -> u64;

    /// Messages across all categories.
    fn total_messages(&self) -> u64 {
        self.categories()
            .iter()
            .map(|category| self.message_count(category))
            .sum()
    }
}
