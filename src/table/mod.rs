//! The session table.
//!
//! A [`GameTable`] hosts one game for a set of registered users. It keeps
//! the [`Roster`] of players, advisors and spectators, binds players to
//! seats, drives the [`Game`](crate::rules::Game) turn by turn, and hands
//! every participant a [`Status`] scoped to what they may see.
//!
//! Each game step runs inside a transaction over the game state and the
//! log. A step that fails leaves both exactly as they were.

mod config;
mod error;
mod persist;
mod roles;
mod session;
mod status;

pub use config::TableConfig;
pub use error::{RoleError, SessionError, TableError};
pub use persist::TableSnapshot;
pub use roles::{Role, Roster};
pub use session::{GameTable, TablePhase};
pub use status::{Prompt, Status, StatusReport};
