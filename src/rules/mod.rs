//! The game contract: how rules collaborators plug into the table.
//!
//! A rules collaborator implements [`Game`]. The table owns the
//! [`GameState`](crate::state::GameState) and the [`GameLog`](crate::log::GameLog)
//! and lends them to the game through a [`TurnContext`] for every call, inside
//! a transaction. Each call returns the next turn's [`PlayerActions`]: which
//! players must act and what they may do. An empty map ends the game.
//!
//! Games are selected by name from a [`GameRegistry`], which the table
//! shares through an `Arc`.

mod error;
mod game;
mod registry;
mod settings;

pub use error::GameError;
pub use game::{Game, GameOutcome, GameResult, PlayerActions, TurnContext};
pub use registry::{GameFactory, GameInfo, GameRegistry};
pub use settings::{GameSettings, PlayerInfo};
