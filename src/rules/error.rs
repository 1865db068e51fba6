//! Errors raised by rules collaborators.

use crate::core::PlayerId;
use crate::error::RegistrationError;
use crate::log::LogError;

/// A rules collaborator rejected a call.
///
/// When this comes out of `begin_game` or `take_action`, the table rolls
/// back everything the call wrote before reporting it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The action is not legal right now.
    #[error("invalid action from {player}: {reason}")]
    InvalidAction { player: PlayerId, reason: String },

    /// A game setting has the wrong type or range.
    #[error("invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// Any other rules failure.
    #[error("rules error: {0}")]
    Rules(String),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Log(#[from] LogError),
}

impl GameError {
    pub fn invalid_action(player: PlayerId, reason: impl Into<String>) -> Self {
        GameError::InvalidAction {
            player,
            reason: reason.into(),
        }
    }
}
