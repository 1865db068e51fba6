//! The session orchestrator.

use std::collections::BTreeMap;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info, warn};

use super::{
    Prompt, Role, RoleError, Roster, SessionError, Status, StatusReport, TableConfig, TableError,
};
use crate::actions::{Action, ActionController, ActionDescriptor};
use crate::core::{PlayerId, Term, UserId};
use crate::log::{GameLog, LogEntry};
use crate::rules::{
    Game, GameError, GameOutcome, GameRegistry, GameSettings, PlayerActions, PlayerInfo,
    TurnContext,
};
use crate::state::{GameState, Transactional};

/// Lifecycle state of a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TablePhase {
    /// No game selected.
    Idle,
    /// A game is chosen but not started.
    GameSelected,
    /// A game instance is running.
    InProgress,
    /// The running instance finished; its outcome is available.
    Ended,
}

/// Drives one game instance for a set of participants.
///
/// The table owns the game state, the log and the roster. All calls run
/// to completion in order; transports serialize concurrent requests before
/// calling in.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use rust_gsm::core::UserId;
/// use rust_gsm::games::war::War;
/// use rust_gsm::rules::{GameRegistry, PlayerInfo};
/// use rust_gsm::table::{GameTable, TablePhase};
///
/// let mut registry = GameRegistry::new();
/// registry.register(War::info()).unwrap();
///
/// let mut table = GameTable::new(Arc::new(registry));
/// table.set_game("war").unwrap();
/// table.add_player(UserId::new("ann"), PlayerInfo::new());
/// table.add_player(UserId::new("bo"), PlayerInfo::new());
/// table.start_game().unwrap();
///
/// assert_eq!(table.phase(), TablePhase::InProgress);
/// let status = table.get_status(&UserId::new("ann")).unwrap();
/// assert!(status.status().unwrap().actions().is_some());
/// ```
pub struct GameTable {
    registry: Arc<GameRegistry>,
    config: TableConfig,
    pub(super) settings: GameSettings,
    phase: TablePhase,
    game_name: Option<String>,
    game: Option<Box<dyn Game>>,
    pub(super) state: GameState,
    pub(super) log: GameLog,
    roster: Roster,
    pub(super) bindings: FxHashMap<UserId, PlayerId>,
    pub(super) seats: BTreeMap<PlayerId, UserId>,
    pub(super) pending: PlayerActions,
    statuses: FxHashMap<UserId, Status>,
    /// Cached statuses whose log delta has not been taken yet.
    unsent: FxHashSet<UserId>,
    advice: FxHashMap<PlayerId, BTreeMap<UserId, Action>>,
    pub(super) outcome: Option<GameOutcome>,
}

impl GameTable {
    #[must_use]
    pub fn new(registry: Arc<GameRegistry>) -> Self {
        Self::with_config(registry, TableConfig::default())
    }

    #[must_use]
    pub fn with_config(registry: Arc<GameRegistry>, config: TableConfig) -> Self {
        Self {
            registry,
            settings: GameSettings::new(),
            phase: TablePhase::Idle,
            game_name: None,
            game: None,
            state: GameState::new(),
            log: GameLog::new().with_mirror(config.mirror_log),
            roster: Roster::new(),
            bindings: FxHashMap::default(),
            seats: BTreeMap::new(),
            pending: PlayerActions::new(),
            statuses: FxHashMap::default(),
            unsent: FxHashSet::default(),
            advice: FxHashMap::default(),
            outcome: None,
            config,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn phase(&self) -> TablePhase {
        self.phase
    }

    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    #[must_use]
    pub fn game_name(&self) -> Option<&str> {
        self.game_name.as_deref()
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn log(&self) -> &GameLog {
        &self.log
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    /// Seat of a user in the current game.
    #[must_use]
    pub fn seat_of(&self, user: &UserId) -> Option<PlayerId> {
        self.bindings.get(user).copied()
    }

    /// User bound to a seat in the current game.
    #[must_use]
    pub fn user_of(&self, seat: PlayerId) -> Option<&UserId> {
        self.seats.get(&seat)
    }

    /// Seats and their users, in seat order.
    pub fn players(&self) -> impl Iterator<Item = (PlayerId, &UserId)> {
        self.seats.iter().map(|(seat, user)| (*seat, user))
    }

    /// Users the game is waiting on, in seat order.
    #[must_use]
    pub fn expected(&self) -> Vec<UserId> {
        self.pending
            .keys()
            .filter_map(|seat| self.seats.get(seat).cloned())
            .collect()
    }

    // === Settings ===

    /// Set a game setting. Takes effect at the next `start_game`.
    pub fn set_setting(&mut self, key: impl Into<String>, value: impl Into<Term>) {
        self.settings.insert(key, value);
    }

    pub fn remove_setting(&mut self, key: &str) -> Option<Term> {
        self.settings.remove(key)
    }

    // === Roster ===

    pub fn add_player(&mut self, user: UserId, info: PlayerInfo) {
        let replaced = self.roster.remove_user(&user);
        self.forget_users(&replaced);
        self.roster.add_player(user, info);
    }

    /// Register `user` as an advisor of the player `player`.
    ///
    /// # Errors
    ///
    /// `RoleError::UnknownPlayer` if `player` is not a registered player,
    /// `RoleError::SelfAdvisor` if `user` is `player`.
    pub fn add_advisor(&mut self, user: UserId, player: &UserId) -> Result<(), TableError> {
        if &user == player {
            return Err(RoleError::SelfAdvisor(user).into());
        }
        if !self.roster.is_player(player) {
            return Err(RoleError::UnknownPlayer(player.clone()).into());
        }
        let replaced = self.roster.remove_user(&user);
        self.forget_users(&replaced);
        self.roster.add_advisor(user, player)?;
        Ok(())
    }

    pub fn add_spectator(&mut self, user: UserId) {
        let replaced = self.roster.remove_user(&user);
        self.forget_users(&replaced);
        self.roster.add_spectator(user);
    }

    /// Remove a user, cascading to a player's advisors.
    ///
    /// Seat bindings survive, so a player who registers again resumes
    /// their seat. Returns whether anyone was removed.
    pub fn remove_user(&mut self, user: &UserId) -> bool {
        let removed = self.roster.remove_user(user);
        self.forget_users(&removed);
        !removed.is_empty()
    }

    /// Drop cached state for removed users. Unbound users also lose their
    /// log cursor; a seated player keeps it for when they return.
    fn forget_users(&mut self, users: &[UserId]) {
        for user in users {
            self.statuses.remove(user);
            self.unsent.remove(user);
            if !self.bindings.contains_key(user) {
                self.log.forget(user);
            }
            for advice in self.advice.values_mut() {
                advice.remove(user);
            }
        }
    }

    // === Lifecycle ===

    /// Select a game by name, discarding any running instance.
    ///
    /// # Errors
    ///
    /// `RegistrationError::UnknownGame` if the registry has no such game;
    /// the table is left unchanged.
    pub fn set_game(&mut self, name: &str) -> Result<(), TableError> {
        self.registry.lookup(name)?;
        if self.game.is_some() {
            info!(game = ?self.game_name, "discarding running game");
        }
        self.reset_instance();
        self.game_name = Some(name.to_string());
        self.phase = TablePhase::GameSelected;
        info!(game = name, "game selected");
        Ok(())
    }

    fn reset_instance(&mut self) {
        self.game = None;
        self.state = GameState::new();
        self.log = GameLog::new().with_mirror(self.config.mirror_log);
        self.bindings.clear();
        self.seats.clear();
        self.pending.clear();
        self.statuses.clear();
        self.unsent.clear();
        self.advice.clear();
        self.outcome = None;
    }

    /// Start the selected game with the registered players.
    ///
    /// # Errors
    ///
    /// - `SessionError::NoGameSelected` / `AlreadyStarted` for the wrong phase
    /// - `SessionError::PlayerCount` if the game does not accept the number
    ///   of registered players
    /// - `GameError` if the game fails to build, seat players or begin; the
    ///   table stays in `GameSelected`
    pub fn start_game(&mut self) -> Result<(), TableError> {
        let name = match self.phase {
            TablePhase::Idle => return Err(SessionError::NoGameSelected.into()),
            TablePhase::InProgress | TablePhase::Ended => {
                return Err(SessionError::AlreadyStarted.into())
            }
            TablePhase::GameSelected => self
                .game_name
                .clone()
                .ok_or(SessionError::NoGameSelected)?,
        };
        let registry = Arc::clone(&self.registry);
        let info = registry.lookup(&name)?;

        let count = self.roster.players().len();
        if !info.accepts(count) {
            return Err(SessionError::PlayerCount {
                count,
                min: info.min_players,
                max: info.max_players,
            }
            .into());
        }

        if !self.settings.contains("seed") {
            if let Some(seed) = self.config.seed {
                self.settings.insert("seed", seed_term(seed));
            }
        }

        let mut game = info.build(&self.settings)?;
        let seating = game.process_players(&self.roster.player_entries())?;

        self.reset_instance();
        for (user, seat) in seating {
            self.bindings.insert(user.clone(), seat);
            self.seats.insert(seat, user);
        }
        if let Some(seed) = self.settings.get("seed").and_then(Term::as_int) {
            self.state.seed_rng(seed as u64);
        }
        self.game = Some(game);

        info!(game = %name, players = count, "starting game");
        if let Err(err) = self.advance(|game, ctx| game.begin_game(ctx)) {
            self.reset_instance();
            return Err(err);
        }
        Ok(())
    }

    /// Run one step of the game inside a transaction.
    ///
    /// On success the returned turn is installed; an empty turn ends the
    /// game. On failure state and log are rolled back before the error is
    /// returned.
    fn advance<F>(&mut self, step: F) -> Result<(), TableError>
    where
        F: FnOnce(&mut dyn Game, &mut TurnContext<'_>) -> Result<PlayerActions, GameError>,
    {
        let game = self.game.as_deref_mut().ok_or(SessionError::NoActiveGame)?;
        let players: Vec<PlayerId> = self.seats.keys().copied().collect();

        self.state.begin();
        self.log.begin();
        let mut ctx = TurnContext {
            state: &mut self.state,
            log: &mut self.log,
            settings: &self.settings,
            players: &players,
        };
        let result = match step(&mut *game, &mut ctx) {
            Ok(next) if next.is_empty() => game.end_game(&mut ctx).map(|outcome| (next, Some(outcome))),
            Ok(next) => Ok((next, None)),
            Err(err) => Err(err),
        };

        match result {
            Ok((next, outcome)) => {
                self.state.commit();
                self.log.commit();
                self.install_turn(next, outcome);
                Ok(())
            }
            Err(err) => {
                self.state.abort();
                self.log.abort();
                warn!(error = %err, "rolled back game step");
                Err(err.into())
            }
        }
    }

    fn install_turn(&mut self, next: PlayerActions, outcome: Option<GameOutcome>) {
        self.pending = next;
        self.statuses.clear();
        self.unsent.clear();
        self.advice.clear();

        if let Some(outcome) = outcome {
            info!(result = ?outcome.result, "game over");
            self.outcome = Some(outcome);
            self.pending.clear();
            self.phase = TablePhase::Ended;
            return;
        }
        self.phase = TablePhase::InProgress;

        if self.config.eager_statuses {
            for user in self.expected() {
                if self.roster.is_player(&user) {
                    let status = self.build_status(&user, false);
                    self.unsent.insert(user.clone());
                    self.statuses.insert(user, status);
                }
            }
        }
    }

    // === Turns ===

    /// Apply `user`'s chosen action and return their fresh status.
    ///
    /// # Errors
    ///
    /// - `SessionError::NoActiveGame` unless a game is in progress
    /// - `RoleError` if the user is unknown, a spectator, an advisor, or
    ///   holds no seat
    /// - `SessionError::NotExpected` if the game is not waiting on them
    /// - `ResolutionError` if the descriptor matches no offered action
    /// - `GameError` if the game rejects the action (nothing is applied)
    pub fn take_action(
        &mut self,
        user: &UserId,
        descriptor: &ActionDescriptor,
    ) -> Result<StatusReport, TableError> {
        if self.phase != TablePhase::InProgress {
            return Err(SessionError::NoActiveGame.into());
        }
        match self.roster.role(user) {
            None => return Err(RoleError::UnknownUser(user.clone()).into()),
            Some(Role::Spectator) => return Err(RoleError::SpectatorAction(user.clone()).into()),
            Some(Role::Advisor { .. }) => return Err(RoleError::AdvisorAction(user.clone()).into()),
            Some(Role::Player) => {}
        }
        let seat = self.seat_of(user).ok_or_else(|| RoleError::Unbound(user.clone()))?;
        let action = self.resolve(user, seat, descriptor)?;

        info!(%user, %seat, %action, "taking action");
        self.advance(|game, ctx| game.take_action(ctx, seat, &action))?;
        self.get_status(user)
    }

    /// Record an advisor's suggestion for their player's current turn.
    ///
    /// The game is not involved; the suggestion shows up in the advised
    /// player's status until the turn resolves.
    ///
    /// # Errors
    ///
    /// - `SessionError::NoActiveGame` unless a game is in progress
    /// - `RoleError::UnknownUser` / `NotAdvisor` for non-advisors
    /// - `RoleError::Unbound` if the advised player holds no seat
    /// - `SessionError::NotExpected` if the advised player is not acting
    /// - `ResolutionError` if the descriptor matches no offered action
    pub fn give_advice(
        &mut self,
        user: &UserId,
        descriptor: &ActionDescriptor,
    ) -> Result<(), TableError> {
        if self.phase != TablePhase::InProgress {
            return Err(SessionError::NoActiveGame.into());
        }
        let player = match self.roster.role(user) {
            None => return Err(RoleError::UnknownUser(user.clone()).into()),
            Some(Role::Advisor { player }) => player.clone(),
            Some(_) => return Err(RoleError::NotAdvisor(user.clone()).into()),
        };
        let seat = self
            .seat_of(&player)
            .ok_or_else(|| RoleError::Unbound(player.clone()))?;
        let action = self.resolve(&player, seat, descriptor)?;

        debug!(advisor = %user, %player, %action, "advice recorded");
        self.advice
            .entry(seat)
            .or_default()
            .insert(user.clone(), action);
        Ok(())
    }

    fn resolve(
        &self,
        user: &UserId,
        seat: PlayerId,
        descriptor: &ActionDescriptor,
    ) -> Result<Action, TableError> {
        let controller = self
            .pending
            .get(&seat)
            .ok_or_else(|| SessionError::NotExpected(user.clone()))?;
        Ok(controller.find(descriptor)?.clone())
    }

    // === Status ===

    /// The participant's status for the current turn.
    ///
    /// Built on first request and reused until the turn resolves; the log
    /// delta it carries is consumed once. After the game ends this reports
    /// the outcome instead.
    ///
    /// # Errors
    ///
    /// `RoleError::UnknownUser` for unregistered users,
    /// `SessionError::NoActiveGame` before the game starts.
    pub fn get_status(&mut self, user: &UserId) -> Result<StatusReport, TableError> {
        if !self.roster.contains(user) {
            return Err(RoleError::UnknownUser(user.clone()).into());
        }
        match self.phase {
            TablePhase::Idle | TablePhase::GameSelected => Err(SessionError::NoActiveGame.into()),
            TablePhase::Ended => {
                let outcome = self.outcome.clone().ok_or(SessionError::NoActiveGame)?;
                let viewer = self.viewer_of(user);
                let log = self.log.get_update(user, viewer);
                Ok(StatusReport::Ended { outcome, log })
            }
            TablePhase::InProgress => {
                let mut status = match self.statuses.get(user).cloned() {
                    Some(mut status) if self.unsent.contains(user) => {
                        let viewer = self.viewer_of(user);
                        status.log = self.log.get_update(user, viewer);
                        self.unsent.remove(user);
                        self.statuses.insert(user.clone(), status.clone());
                        status
                    }
                    Some(status) => status,
                    None => {
                        let status = self.build_status(user, true);
                        self.statuses.insert(user.clone(), status.clone());
                        status
                    }
                };
                status.advice = self.advice_for(user);
                Ok(StatusReport::Active(status))
            }
        }
    }

    /// Seat whose view `user` gets: their own for players, their player's
    /// for advisors, none for spectators.
    fn viewer_of(&self, user: &UserId) -> Option<PlayerId> {
        match self.roster.role(user)? {
            Role::Player => self.seat_of(user),
            Role::Advisor { player } => self.seat_of(player),
            Role::Spectator => None,
        }
    }

    fn advice_for(&self, user: &UserId) -> BTreeMap<UserId, Action> {
        self.viewer_of(user)
            .and_then(|seat| self.advice.get(&seat))
            .cloned()
            .unwrap_or_default()
    }

    /// Build a status. Without `take_log` the log delta is left empty and
    /// the cursor untouched.
    fn build_status(&mut self, user: &UserId, take_log: bool) -> Status {
        let viewer = self.viewer_of(user);
        let observation = match &self.game {
            Some(game) => game.get_observation(&self.state, viewer),
            None => self.state.observe(viewer),
        };
        let log = if take_log {
            self.log.get_update(user, viewer)
        } else {
            Vec::new()
        };

        let prompt = match viewer.and_then(|seat| self.pending.get(&seat)) {
            Some(controller) => Prompt::Actions(numbered(controller)),
            None => Prompt::WaitingFor(self.expected()),
        };
        debug!(%user, ?viewer, log = log.len(), "built status");

        Status {
            observation,
            log,
            prompt,
            advice: BTreeMap::new(),
        }
    }

    /// The whole log as `user` may see it; `None` returns every entry.
    ///
    /// # Errors
    ///
    /// `RoleError::UnknownUser` for unregistered users.
    pub fn full_log(&self, user: Option<&UserId>) -> Result<Vec<LogEntry>, TableError> {
        match user {
            None => Ok(self.log.entries().cloned().collect()),
            Some(user) if self.roster.contains(user) => Ok(self.log.get_full(self.viewer_of(user))),
            Some(user) => Err(RoleError::UnknownUser(user.clone()).into()),
        }
    }

    // === Persistence support ===

    pub(super) fn require_game(&self, name: &str) -> Result<(), TableError> {
        let selected = self.game_name.as_deref().ok_or(SessionError::NoGameSelected)?;
        if selected != name {
            return Err(SessionError::GameMismatch {
                expected: selected.to_string(),
                found: name.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Build a fresh instance of the selected game from `settings`.
    pub(super) fn rebuild_game(
        &self,
        settings: &GameSettings,
    ) -> Result<Box<dyn Game>, TableError> {
        let name = self.game_name.as_deref().ok_or(SessionError::NoGameSelected)?;
        Ok(self.registry.lookup(name)?.build(settings)?)
    }

    pub(super) fn install_game(&mut self, game: Box<dyn Game>) {
        self.game = Some(game);
    }

    pub(super) fn restore_turn(&mut self, phase: TablePhase) {
        self.log.set_mirror(self.config.mirror_log);
        self.statuses.clear();
        self.unsent.clear();
        self.advice.clear();
        self.phase = phase;
    }
}

fn numbered(controller: &ActionController) -> ActionController {
    let mut controller = controller.clone();
    controller.number_actions();
    controller
}

fn seed_term(seed: u64) -> Term {
    Term::Int(seed as i64)
}
