//! Table errors.
//!
//! `TableError` is what every fallible table call returns. It wraps one
//! enum per failure family so callers can match on the family first.

use crate::actions::ResolutionError;
use crate::core::UserId;
use crate::error::RegistrationError;
use crate::rules::GameError;

/// The call does not fit the table's current lifecycle state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no game has been selected")]
    NoGameSelected,

    #[error("no game is in progress")]
    NoActiveGame,

    #[error("the game has already started")]
    AlreadyStarted,

    #[error("{count} players registered, game needs {min}..={max}")]
    PlayerCount { count: usize, min: usize, max: usize },

    /// The user is registered but nobody is waiting for them to act.
    #[error("{0} is not expected to act")]
    NotExpected(UserId),

    /// A saved binding disagrees with the current roster.
    #[error("saved seat of {user} conflicts with the current roster")]
    LoadConflict { user: UserId },

    #[error("saved game is '{found}', table has '{expected}' selected")]
    GameMismatch { expected: String, found: String },

    #[error("persistence failed: {0}")]
    Persistence(String),
}

/// The caller's role does not allow the call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RoleError {
    #[error("unknown user {0}")]
    UnknownUser(UserId),

    /// Advisor registration named someone who is not a player.
    #[error("{0} is not a registered player")]
    UnknownPlayer(UserId),

    #[error("{0} cannot advise themselves")]
    SelfAdvisor(UserId),

    #[error("spectator {0} cannot act")]
    SpectatorAction(UserId),

    #[error("advisor {0} cannot act, only advise")]
    AdvisorAction(UserId),

    #[error("{0} is not an advisor")]
    NotAdvisor(UserId),

    /// The player has no seat in the running game.
    #[error("{0} has no seat in the current game")]
    Unbound(UserId),
}

/// Any table failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Role(#[from] RoleError),

    #[error(transparent)]
    Game(#[from] GameError),
}
