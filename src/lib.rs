//! # rust-gsm
//!
//! A turn-based, multi-participant game session engine with hidden
//! information.
//!
//! ## Design Principles
//!
//! 1. **Rules Are Collaborators**: The engine knows nothing about any
//!    particular game. A game implements [`Game`] and is selected by name from
//!    a [`GameRegistry`].
//!
//! 2. **Speculative Turns**: Every game step runs inside a transaction over
//!    the game state and the log. A rejected action leaves no trace.
//!
//! 3. **Scoped Views**: Players, advisors and spectators each receive a
//!    [`Status`] filtered to what they may see, with an incremental log feed.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: transactional containers snapshot in
//!   O(1) via `im-rs`.
//!
//! - **Declarative Actions**: rules describe legal moves as nested
//!   choice/tuple specifications that expand into flat term tuples.
//!
//! ## Modules
//!
//! - `core`: Entity, player and user ids, terms, RNG
//! - `state`: Transactional containers, entity table, `GameState`
//! - `actions`: Actions, action groups and controllers, descriptor resolution
//! - `rules`: The `Game` contract and the game registry
//! - `log`: The in-game log with per-participant cursors
//! - `table`: The session table: roles, statuses, turn routing, persistence
//! - `games`: Built-in rules collaborators

pub mod actions;
pub mod core;
pub mod error;
pub mod games;
pub mod log;
pub mod rules;
pub mod state;
pub mod table;

// Re-export commonly used types
pub use crate::core::{EntityId, GameRng, GameRngState, PlayerId, Term, UserId};

pub use crate::state::{GameState, TList, TMap, TSet, Transactional, Value, Visibility};

pub use crate::actions::{Action, ActionController, ActionDescriptor, ActionGroup, ActionSpec};

pub use crate::rules::{
    Game, GameError, GameInfo, GameOutcome, GameRegistry, GameResult, GameSettings, PlayerActions,
    TurnContext,
};

pub use crate::log::{GameLog, LogEntry, LogLevel};

pub use crate::table::{
    GameTable, Prompt, Role, Status, StatusReport, TableConfig, TableError, TablePhase,
};

pub use crate::error::RegistrationError;
