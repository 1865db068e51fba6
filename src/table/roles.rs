//! Participant roles.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::RoleError;
use crate::core::UserId;
use crate::rules::PlayerInfo;

/// What a registered user does at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Plays a seat.
    Player,
    /// Suggests actions to one player.
    Advisor { player: UserId },
    /// Watches.
    Spectator,
}

/// Registered participants.
///
/// Registering a user who already has a role replaces that role. Removing a
/// player also removes their advisors.
///
/// ## Example
///
/// ```
/// use rust_gsm::core::UserId;
/// use rust_gsm::rules::PlayerInfo;
/// use rust_gsm::table::Roster;
///
/// let mut roster = Roster::new();
/// let (ann, coach) = (UserId::new("ann"), UserId::new("coach"));
/// roster.add_player(ann.clone(), PlayerInfo::new());
/// roster.add_advisor(coach.clone(), &ann).unwrap();
///
/// assert_eq!(roster.remove_user(&ann), vec![coach.clone(), ann.clone()]);
/// assert!(roster.role(&coach).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Roster {
    roles: FxHashMap<UserId, Role>,
    /// Players in registration order.
    players: Vec<UserId>,
    info: FxHashMap<UserId, PlayerInfo>,
    advisors: FxHashMap<UserId, BTreeSet<UserId>>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_player(&mut self, user: UserId, info: PlayerInfo) {
        self.remove_user(&user);
        info!(%user, "adding player");
        self.players.push(user.clone());
        self.info.insert(user.clone(), info);
        self.roles.insert(user, Role::Player);
    }

    /// Register `user` as an advisor of `player`.
    ///
    /// # Errors
    ///
    /// `UnknownPlayer` if `player` is not registered as a player,
    /// `SelfAdvisor` if `user` is `player`.
    pub fn add_advisor(&mut self, user: UserId, player: &UserId) -> Result<(), RoleError> {
        if &user == player {
            return Err(RoleError::SelfAdvisor(user));
        }
        if !self.is_player(player) {
            return Err(RoleError::UnknownPlayer(player.clone()));
        }
        self.remove_user(&user);
        info!(%user, %player, "adding advisor");
        self.advisors
            .entry(player.clone())
            .or_default()
            .insert(user.clone());
        self.roles.insert(
            user,
            Role::Advisor {
                player: player.clone(),
            },
        );
        Ok(())
    }

    pub fn add_spectator(&mut self, user: UserId) {
        self.remove_user(&user);
        info!(%user, "adding spectator");
        self.roles.insert(user, Role::Spectator);
    }

    /// Remove a user and everyone who depends on them.
    ///
    /// Returns the removed users, dependents first. Unknown users are a
    /// no-op.
    pub fn remove_user(&mut self, user: &UserId) -> Vec<UserId> {
        let Some(role) = self.roles.remove(user) else {
            return Vec::new();
        };
        let mut removed = Vec::new();
        match role {
            Role::Player => {
                for advisor in self.advisors.remove(user).unwrap_or_default() {
                    self.roles.remove(&advisor);
                    info!(%advisor, player = %user, "removing advisor with player");
                    removed.push(advisor);
                }
                self.players.retain(|p| p != user);
                self.info.remove(user);
                info!(%user, "removing player");
            }
            Role::Advisor { player } => {
                if let Some(set) = self.advisors.get_mut(&player) {
                    set.remove(user);
                }
                info!(%user, %player, "removing advisor");
            }
            Role::Spectator => info!(%user, "removing spectator"),
        }
        removed.push(user.clone());
        removed
    }

    #[must_use]
    pub fn role(&self, user: &UserId) -> Option<&Role> {
        self.roles.get(user)
    }

    #[must_use]
    pub fn contains(&self, user: &UserId) -> bool {
        self.roles.contains_key(user)
    }

    #[must_use]
    pub fn is_player(&self, user: &UserId) -> bool {
        matches!(self.roles.get(user), Some(Role::Player))
    }

    /// Players in registration order.
    #[must_use]
    pub fn players(&self) -> &[UserId] {
        &self.players
    }

    /// Players with their registration info, in registration order.
    #[must_use]
    pub fn player_entries(&self) -> Vec<(UserId, PlayerInfo)> {
        self.players
            .iter()
            .map(|p| (p.clone(), self.info.get(p).cloned().unwrap_or_default()))
            .collect()
    }

    /// Advisors of `player`, sorted.
    pub fn advisors_of(&self, player: &UserId) -> impl Iterator<Item = &UserId> {
        self.advisors.get(player).into_iter().flatten()
    }

    /// Number of registered users of any role.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
