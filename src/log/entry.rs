//! Log entries.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PlayerId, Term};
use crate::impl_inert_transactional;

/// Severity tag of a log entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    #[default]
    Info,
    Debug,
    Warning,
    Error,
}

/// One line of the game log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub terms: Vec<Term>,
    /// Players allowed to read this entry. Empty means everyone.
    pub targets: SmallVec<[PlayerId; 2]>,
    /// Placed between terms when rendering.
    pub delimiter: String,
}

impl LogEntry {
    pub fn new<I, T>(terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        Self {
            level: LogLevel::Info,
            terms: terms.into_iter().map(Into::into).collect(),
            targets: SmallVec::new(),
            delimiter: " ".to_string(),
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = PlayerId>) -> Self {
        self.targets = targets.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Whether `viewer` may read this entry. Spectators (`None`) only read
    /// untargeted entries.
    #[must_use]
    pub fn visible_to(&self, viewer: Option<PlayerId>) -> bool {
        self.targets.is_empty() || viewer.is_some_and(|p| self.targets.contains(&p))
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(&self.delimiter)?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

impl_inert_transactional!(LogEntry, LogLevel);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_delimiter() {
        let entry = LogEntry::new([Term::from(PlayerId(0)), Term::from("draws"), Term::Int(2)]);
        assert_eq!(entry.to_string(), "Player 0 draws 2");
        assert_eq!(entry.with_delimiter("|").to_string(), "Player 0|draws|2");
    }

    #[test]
    fn test_visibility() {
        let public = LogEntry::new(["hello"]);
        let private = LogEntry::new(["secret"]).with_targets([PlayerId(1)]);

        assert!(public.visible_to(None));
        assert!(public.visible_to(Some(PlayerId(0))));
        assert!(private.visible_to(Some(PlayerId(1))));
        assert!(!private.visible_to(Some(PlayerId(0))));
        assert!(!private.visible_to(None));
    }
}
