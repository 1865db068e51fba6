//! Append-only game log with per-participant read cursors.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::{format_entry, LogEntry, LogError, LogLevel};
use crate::core::{PlayerId, Term, UserId};
use crate::state::{TList, Transactional};

/// The game log.
///
/// Entries are only ever appended. Each participant has a cursor counting
/// how many entries have been delivered to them; [`GameLog::get_update`]
/// is a consuming read that advances it.
///
/// ## Example
///
/// ```
/// use rust_gsm::core::{PlayerId, UserId};
/// use rust_gsm::log::GameLog;
///
/// let mut log = GameLog::new();
/// let alice = UserId::new("alice");
///
/// log.write(["the game begins"]);
/// log.write_to([PlayerId(1)], ["you drew a secret card"]);
///
/// assert_eq!(log.get_update(&alice, Some(PlayerId(0))).len(), 1);
/// assert!(log.get_update(&alice, Some(PlayerId(0))).is_empty());
/// assert_eq!(log.get_full(Some(PlayerId(1))).len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameLog {
    entries: TList<LogEntry>,
    cursors: FxHashMap<UserId, usize>,
    mirror: bool,
    /// Length at `begin`; entries past it are mirrored on commit.
    #[serde(skip)]
    mark: Option<usize>,
}

impl GameLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also emit every appended entry through `tracing` under the
    /// `game_log` target. Inside a transaction entries are emitted when it
    /// commits, so rolled-back lines never reach the mirror.
    #[must_use]
    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn set_mirror(&mut self, mirror: bool) {
        self.mirror = mirror;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry, regardless of targets.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Append a prepared entry.
    pub fn push(&mut self, entry: LogEntry) {
        if self.mirror && self.mark.is_none() {
            mirror(&entry);
        }
        self.entries.push(entry);
    }

    /// Append an info line visible to everyone.
    pub fn write<I, T>(&mut self, terms: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.push(LogEntry::new(terms));
    }

    /// Append an info line visible only to `targets`.
    pub fn write_to<P, I, T>(&mut self, targets: P, terms: I)
    where
        P: IntoIterator<Item = PlayerId>,
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.push(LogEntry::new(terms).with_targets(targets));
    }

    pub fn debug<I, T>(&mut self, terms: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.push(LogEntry::new(terms).with_level(LogLevel::Debug));
    }

    pub fn warning<I, T>(&mut self, terms: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.push(LogEntry::new(terms).with_level(LogLevel::Warning));
    }

    pub fn error<I, T>(&mut self, terms: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.push(LogEntry::new(terms).with_level(LogLevel::Error));
    }

    /// Append a formatted info line, see [`format_entry`].
    ///
    /// # Errors
    ///
    /// `LogError::Format` if the template does not fit `args`; nothing is
    /// appended in that case.
    pub fn writef(&mut self, template: &str, args: &[Term]) -> Result<(), LogError> {
        self.push(format_entry(template, args)?);
        Ok(())
    }

    /// Entries `user` has not read yet and may see, advancing their cursor
    /// to the end of the log.
    pub fn get_update(&mut self, user: &UserId, viewer: Option<PlayerId>) -> Vec<LogEntry> {
        let len = self.entries.len();
        let cursor = self.cursors.insert(user.clone(), len).unwrap_or(0);
        self.entries
            .iter_from(cursor)
            .filter(|e| e.visible_to(viewer))
            .cloned()
            .collect()
    }

    /// Every entry `viewer` may see. Does not move any cursor.
    #[must_use]
    pub fn get_full(&self, viewer: Option<PlayerId>) -> Vec<LogEntry> {
        self.entries
            .iter()
            .filter(|e| e.visible_to(viewer))
            .cloned()
            .collect()
    }

    /// How many entries `user` has consumed.
    #[must_use]
    pub fn cursor(&self, user: &UserId) -> usize {
        self.cursors.get(user).copied().unwrap_or(0)
    }

    /// Forget a participant's cursor.
    pub fn forget(&mut self, user: &UserId) {
        self.cursors.remove(user);
    }
}

fn mirror(entry: &LogEntry) {
    match entry.level {
        LogLevel::Info => info!(target: "game_log", "{entry}"),
        LogLevel::Debug => debug!(target: "game_log", "{entry}"),
        LogLevel::Warning => warn!(target: "game_log", "{entry}"),
        LogLevel::Error => error!(target: "game_log", "{entry}"),
    }
}

impl Transactional for GameLog {
    fn begin(&mut self) {
        if self.in_transaction() {
            self.abort();
        }
        self.entries.begin();
        self.mark = Some(self.entries.len());
    }

    fn commit(&mut self) {
        if let Some(mark) = self.mark.take() {
            if self.mirror {
                self.entries.iter_from(mark).for_each(mirror);
            }
        }
        self.entries.commit();
    }

    fn abort(&mut self) {
        self.mark = None;
        self.entries.abort();
        let len = self.entries.len();
        for cursor in self.cursors.values_mut() {
            *cursor = (*cursor).min(len);
        }
    }

    fn in_transaction(&self) -> bool {
        self.entries.in_transaction()
    }
}
