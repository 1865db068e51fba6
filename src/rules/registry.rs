//! Registry of available games.
//!
//! The `GameRegistry` maps game names to their player-count limits and a
//! factory. Build one at process start, wrap it in an `Arc` and hand it to
//! every table; it is read-only from then on.

use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::{Game, GameError, GameSettings};
use crate::core::PlayerId;
use crate::error::RegistrationError;

/// Builds a fresh game instance from the table's settings.
pub type GameFactory = Arc<dyn Fn(&GameSettings) -> Result<Box<dyn Game>, GameError> + Send + Sync>;

/// Declaration of one game.
#[derive(Clone)]
pub struct GameInfo {
    pub name: String,
    pub min_players: usize,
    pub max_players: usize,
    factory: GameFactory,
}

impl GameInfo {
    /// Declare a game. The upper player bound is capped at
    /// `PlayerId::MAX_SEATS`.
    pub fn new<F>(name: impl Into<String>, players: RangeInclusive<usize>, factory: F) -> Self
    where
        F: Fn(&GameSettings) -> Result<Box<dyn Game>, GameError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            min_players: *players.start(),
            max_players: (*players.end()).min(PlayerId::MAX_SEATS),
            factory: Arc::new(factory),
        }
    }

    /// Whether `count` players may start this game.
    #[must_use]
    pub fn accepts(&self, count: usize) -> bool {
        (self.min_players..=self.max_players).contains(&count)
    }

    /// Instantiate the game.
    ///
    /// # Errors
    ///
    /// Whatever the factory reports, usually a bad setting.
    pub fn build(&self, settings: &GameSettings) -> Result<Box<dyn Game>, GameError> {
        (self.factory)(settings)
    }
}

impl fmt::Debug for GameInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameInfo")
            .field("name", &self.name)
            .field("min_players", &self.min_players)
            .field("max_players", &self.max_players)
            .finish_non_exhaustive()
    }
}

/// Registry of games by name.
///
/// ## Example
///
/// ```
/// use rust_gsm::games::war::War;
/// use rust_gsm::rules::GameRegistry;
///
/// let mut registry = GameRegistry::new();
/// registry.register(War::info()).unwrap();
///
/// assert!(registry.contains("war"));
/// assert!(registry.register(War::info()).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct GameRegistry {
    games: FxHashMap<String, GameInfo>,
}

impl GameRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a game.
    ///
    /// # Errors
    ///
    /// `DuplicateGame` if the name is taken.
    pub fn register(&mut self, info: GameInfo) -> Result<(), RegistrationError> {
        if self.games.contains_key(&info.name) {
            return Err(RegistrationError::DuplicateGame(info.name));
        }
        self.games.insert(info.name.clone(), info);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&GameInfo> {
        self.games.get(name)
    }

    /// Look up a game, failing with `UnknownGame`.
    ///
    /// # Errors
    ///
    /// `UnknownGame` if nothing is registered under `name`.
    pub fn lookup(&self, name: &str) -> Result<&GameInfo, RegistrationError> {
        self.games
            .get(name)
            .ok_or_else(|| RegistrationError::UnknownGame(name.to_string()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.games.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.games.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
