//! Game settings and per-player registration info.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::GameError;
use crate::core::Term;

/// Key/term pairs handed to a game factory.
///
/// ```
/// use rust_gsm::rules::GameSettings;
///
/// let settings = GameSettings::new().with("life", 20i64);
/// assert_eq!(settings.int_or("life", 10).unwrap(), 20);
/// assert_eq!(settings.int_or("hand", 5).unwrap(), 5);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameSettings(BTreeMap<String, Term>);

impl GameSettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Term>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Term>) -> Option<Term> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Term> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Term> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Term)> {
        self.0.iter()
    }

    /// Integer setting, or `default` when unset.
    ///
    /// # Errors
    ///
    /// `GameError::InvalidSetting` if the setting holds a non-integer.
    pub fn int_or(&self, key: &str, default: i64) -> Result<i64, GameError> {
        match self.0.get(key) {
            None => Ok(default),
            Some(term) => term.as_int().ok_or_else(|| GameError::InvalidSetting {
                key: key.to_string(),
                reason: format!("expected an integer, got {term}"),
            }),
        }
    }
}

/// Free-form info a user supplies when registering as a player.
pub type PlayerInfo = BTreeMap<String, Term>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_or_rejects_wrong_type() {
        let settings = GameSettings::new().with("life", "lots");
        assert!(matches!(
            settings.int_or("life", 1),
            Err(GameError::InvalidSetting { ref key, .. }) if key == "life"
        ));
    }

    #[test]
    fn test_insert_remove() {
        let mut settings = GameSettings::new();
        assert!(settings.insert("seed", 4i64).is_none());
        assert!(settings.contains("seed"));
        assert_eq!(settings.remove("seed"), Some(Term::Int(4)));
        assert!(!settings.contains("seed"));
    }
}
