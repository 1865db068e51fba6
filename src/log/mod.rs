//! In-game log.
//!
//! The log is the narrative players read: "Player 0 plays #12 on Player 1".
//! Entries are term sequences, so references to entities and players stay
//! structured until a transport renders them. Entries can be restricted to
//! some players; every read filters accordingly.
//!
//! Operational logging of the engine itself goes through `tracing`; the game
//! log can optionally mirror its entries there under the `game_log` target.

mod entry;
mod format;
mod game_log;

pub use entry::{LogEntry, LogLevel};
pub use format::{format_entry, join_terms};
pub use game_log::GameLog;

/// Log formatting failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LogError {
    #[error("format error: {0}")]
    Format(String),
}
