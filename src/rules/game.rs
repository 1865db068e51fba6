//! The `Game` trait and its turn results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{GameError, GameSettings, PlayerInfo};
use crate::actions::{Action, ActionController};
use crate::core::{PlayerId, UserId};
use crate::log::GameLog;
use crate::state::{GameState, Value};

/// Who must act next and what each of them may do.
///
/// Empty means the game is over.
pub type PlayerActions = BTreeMap<PlayerId, ActionController>;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Draw (no winner).
    Draw,
    /// Multiple winners (team games, shared victory).
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }
}

/// Terminal outcome reported by `end_game`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub result: GameResult,
    /// Final per-player scores, if the game keeps any.
    pub scores: BTreeMap<PlayerId, i64>,
}

impl GameOutcome {
    #[must_use]
    pub fn new(result: GameResult) -> Self {
        Self {
            result,
            scores: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_scores(mut self, scores: impl IntoIterator<Item = (PlayerId, i64)>) -> Self {
        self.scores = scores.into_iter().collect();
        self
    }
}

/// Everything a game may touch during one call.
///
/// `state` and `log` are inside a transaction for the duration of the call;
/// if the call fails the table aborts both.
pub struct TurnContext<'a> {
    pub state: &'a mut GameState,
    pub log: &'a mut GameLog,
    pub settings: &'a GameSettings,
    /// Seats in play, in seat order.
    pub players: &'a [PlayerId],
}

/// A turn-based game, as seen by the table.
///
/// Implementations keep all mutable game data in `ctx.state`; fields on the
/// implementing type are not rolled back and are not saved.
///
/// ## Implementation Notes
///
/// - `begin_game` / `take_action` return the next turn's actions. An empty
///   map means the game is over and `end_game` follows in the same call.
/// - Returning an error from any call rolls back its state and log writes.
/// - `get_observation` must not leak anything the viewer may not see.
pub trait Game: Send {
    /// Bind registered users to seats.
    ///
    /// Users arrive in registration order. The default seats them in that
    /// order starting at `PlayerId(0)` and refuses more than
    /// `PlayerId::MAX_SEATS` users.
    fn process_players(
        &mut self,
        users: &[(UserId, PlayerInfo)],
    ) -> Result<Vec<(UserId, PlayerId)>, GameError> {
        if users.len() > PlayerId::MAX_SEATS {
            return Err(GameError::Rules(format!(
                "{} players exceed the {} available seats",
                users.len(),
                PlayerId::MAX_SEATS
            )));
        }
        Ok(users
            .iter()
            .zip(PlayerId::all(users.len()))
            .map(|((user, _), seat)| (user.clone(), seat))
            .collect())
    }

    /// Set up the initial state and return the first turn.
    fn begin_game(&mut self, ctx: &mut TurnContext<'_>) -> Result<PlayerActions, GameError>;

    /// Apply one player's action and return the next turn.
    fn take_action(
        &mut self,
        ctx: &mut TurnContext<'_>,
        player: PlayerId,
        action: &Action,
    ) -> Result<PlayerActions, GameError>;

    /// Produce the terminal outcome. Called exactly once.
    fn end_game(&mut self, ctx: &mut TurnContext<'_>) -> Result<GameOutcome, GameError>;

    /// The state as `viewer` may see it (`None` for spectators).
    fn get_observation(&self, state: &GameState, viewer: Option<PlayerId>) -> Value {
        state.observe(viewer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Idle;

    impl Game for Idle {
        fn begin_game(&mut self, _ctx: &mut TurnContext<'_>) -> Result<PlayerActions, GameError> {
            Ok(PlayerActions::new())
        }

        fn take_action(
            &mut self,
            _ctx: &mut TurnContext<'_>,
            player: PlayerId,
            _action: &Action,
        ) -> Result<PlayerActions, GameError> {
            Err(GameError::invalid_action(player, "nothing to do"))
        }

        fn end_game(&mut self, _ctx: &mut TurnContext<'_>) -> Result<GameOutcome, GameError> {
            Ok(GameOutcome::new(GameResult::Draw))
        }
    }

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(PlayerId::new(1));
        assert!(!result.is_winner(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(1)));

        let draw = GameResult::Draw;
        assert!(!draw.is_winner(PlayerId::new(0)));

        let team = GameResult::Winners(vec![PlayerId::new(0), PlayerId::new(2)]);
        assert!(team.is_winner(PlayerId::new(0)));
        assert!(!team.is_winner(PlayerId::new(1)));
        assert!(team.is_winner(PlayerId::new(2)));
    }

    #[test]
    fn test_default_process_players_seats_in_order() {
        let users = vec![
            (UserId::new("ann"), PlayerInfo::new()),
            (UserId::new("bo"), PlayerInfo::new()),
        ];
        let seats = Idle.process_players(&users).unwrap();
        assert_eq!(
            seats,
            vec![
                (UserId::new("ann"), PlayerId(0)),
                (UserId::new("bo"), PlayerId(1)),
            ]
        );
    }

    #[test]
    fn test_default_process_players_rejects_overflow() {
        let users: Vec<_> = (0..=PlayerId::MAX_SEATS)
            .map(|i| (UserId::new(format!("u{i}")), PlayerInfo::new()))
            .collect();
        assert!(matches!(Idle.process_players(&users), Err(GameError::Rules(_))));

        let seats = Idle.process_players(&users[..PlayerId::MAX_SEATS]).unwrap();
        assert_eq!(seats.last().map(|(_, seat)| *seat), Some(PlayerId(254)));
    }

    #[test]
    fn test_default_observation_is_state_view() {
        let mut state = GameState::new();
        state.set("round", 2i64);
        let view = Idle.get_observation(&state, None);
        assert_eq!(view, state.observe(None));
    }
}
