//! Saving and restoring a running table.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{GameTable, Role, SessionError, TableError, TablePhase};
use crate::core::{PlayerId, UserId};
use crate::log::GameLog;
use crate::rules::{GameOutcome, GameSettings, PlayerActions};
use crate::state::GameState;

/// Everything needed to resume a game instance.
///
/// The roster is not part of the snapshot: users register again on the
/// loading table and the saved bindings are checked against them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub game: String,
    pub phase: TablePhase,
    pub settings: GameSettings,
    pub state: GameState,
    pub log: GameLog,
    pub pending: PlayerActions,
    pub outcome: Option<GameOutcome>,
    /// Seat bindings, in seat order.
    pub bindings: Vec<(UserId, PlayerId)>,
}

impl GameTable {
    /// Capture the running instance.
    ///
    /// # Errors
    ///
    /// `SessionError::NoActiveGame` unless a game is running or ended.
    pub fn snapshot(&self) -> Result<TableSnapshot, TableError> {
        let game = match (self.phase(), self.game_name()) {
            (TablePhase::InProgress | TablePhase::Ended, Some(name)) => name.to_string(),
            _ => return Err(SessionError::NoActiveGame.into()),
        };
        Ok(TableSnapshot {
            game,
            phase: self.phase(),
            settings: self.settings.clone(),
            state: self.state.clone(),
            log: self.log.clone(),
            pending: self.pending.clone(),
            outcome: self.outcome.clone(),
            bindings: self
                .seats
                .iter()
                .map(|(seat, user)| (user.clone(), *seat))
                .collect(),
        })
    }

    /// Encode the running instance with `bincode`.
    ///
    /// # Errors
    ///
    /// `SessionError::NoActiveGame` if nothing is running,
    /// `SessionError::Persistence` if encoding fails.
    pub fn save(&self) -> Result<Vec<u8>, TableError> {
        let snapshot = self.snapshot()?;
        let bytes = bincode::serialize(&snapshot)
            .map_err(|err| SessionError::Persistence(err.to_string()))?;
        info!(game = %snapshot.game, bytes = bytes.len(), "saved table");
        Ok(bytes)
    }

    /// Decode and install a snapshot produced by [`GameTable::save`].
    ///
    /// # Errors
    ///
    /// `SessionError::Persistence` for undecodable input, otherwise as
    /// [`GameTable::restore`].
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), TableError> {
        let snapshot: TableSnapshot = bincode::deserialize(bytes)
            .map_err(|err| SessionError::Persistence(err.to_string()))?;
        self.restore(snapshot)
    }

    /// Install a snapshot, replacing the current instance.
    ///
    /// The snapshot's game must be the selected one. Every saved binding
    /// must agree with the roster: a bound user who is registered must be a
    /// player, and neither the user nor the seat may be bound differently in
    /// the current instance. Nothing changes when a check fails.
    ///
    /// # Errors
    ///
    /// - `SessionError::NoGameSelected` / `GameMismatch` for the wrong game
    /// - `SessionError::LoadConflict` for a conflicting binding
    /// - `GameError` if the game cannot be rebuilt from the saved settings
    pub fn restore(&mut self, snapshot: TableSnapshot) -> Result<(), TableError> {
        self.require_game(&snapshot.game)?;

        for (user, seat) in &snapshot.bindings {
            let role_conflict = matches!(
                self.roster().role(user),
                Some(Role::Advisor { .. } | Role::Spectator)
            );
            let user_conflict = self.seat_of(user).is_some_and(|bound| bound != *seat);
            let seat_conflict = self.user_of(*seat).is_some_and(|bound| bound != user);
            if role_conflict || user_conflict || seat_conflict {
                return Err(SessionError::LoadConflict { user: user.clone() }.into());
            }
        }

        let game = self.rebuild_game(&snapshot.settings)?;
        self.install_game(game);
        self.settings = snapshot.settings;
        self.state = snapshot.state;
        self.log = snapshot.log;
        self.pending = snapshot.pending;
        self.outcome = snapshot.outcome;
        self.bindings.clear();
        self.seats.clear();
        for (user, seat) in snapshot.bindings {
            self.bindings.insert(user.clone(), seat);
            self.seats.insert(seat, user);
        }
        self.restore_turn(snapshot.phase);
        info!(game = %snapshot.game, "loaded table");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::games::war::War;
    use crate::rules::{GameRegistry, PlayerInfo};
    use crate::table::TableConfig;

    fn table() -> GameTable {
        let mut registry = GameRegistry::new();
        registry.register(War::info()).unwrap();
        let mut table = GameTable::with_config(Arc::new(registry), TableConfig::default().with_seed(9));
        table.set_game("war").unwrap();
        table.add_player(UserId::new("ann"), PlayerInfo::new());
        table.add_player(UserId::new("bo"), PlayerInfo::new());
        table
    }

    #[test]
    fn test_save_requires_running_game() {
        let table = table();
        assert_eq!(
            table.save(),
            Err(TableError::Session(SessionError::NoActiveGame))
        );
    }

    #[test]
    fn test_snapshot_lists_bindings_in_seat_order() {
        let mut table = table();
        table.start_game().unwrap();
        let snapshot = table.snapshot().unwrap();
        assert_eq!(snapshot.game, "war");
        assert_eq!(
            snapshot.bindings,
            vec![
                (UserId::new("ann"), PlayerId(0)),
                (UserId::new("bo"), PlayerId(1)),
            ]
        );
    }

    #[test]
    fn test_garbage_is_a_persistence_error() {
        let mut table = table();
        assert!(matches!(
            table.load(&[1, 2, 3]),
            Err(TableError::Session(SessionError::Persistence(_)))
        ));
    }
}
