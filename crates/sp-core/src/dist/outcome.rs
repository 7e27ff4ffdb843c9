//! Outcome keys of a distribution.

use serde::Serialize;

/// A distribution key: either a real outcome or the invalid bucket.
///
/// Mass routed to [`Outcome::Invalid`] is carried through composition and
/// only discarded by `normalize`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome<T> {
    Valid(T),
    Invalid,
}

impl<T> Outcome<T> {
    /// The wrapped outcome, if valid.
    pub fn valid(&self) -> Option<&T> {
        match self {
            Outcome::Valid(value) => Some(value),
            Outcome::Invalid => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Outcome::Invalid)
    }
}

impl<T> From<Option<T>> for Outcome<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Outcome::Valid(value),
            None => Outcome::Invalid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_conversion() {
        assert_eq!(Outcome::from(Some(3)), Outcome::Valid(3));
        assert_eq!(Outcome::<i32>::from(None), Outcome::Invalid);
        assert_eq!(Outcome::Valid("a").valid(), Some(&"a"));
        assert!(Outcome::<u8>::Invalid.is_invalid());
    }
}
