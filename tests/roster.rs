//! Roster and role tests through the table.

use std::sync::Arc;

use rust_gsm::core::{PlayerId, UserId};
use rust_gsm::games::war::War;
use rust_gsm::rules::{GameRegistry, PlayerInfo};
use rust_gsm::table::{GameTable, Role, RoleError, SessionError, TableError};

fn u(name: &str) -> UserId {
    UserId::new(name)
}

fn table() -> GameTable {
    let mut registry = GameRegistry::new();
    registry.register(War::info()).unwrap();
    let mut table = GameTable::new(Arc::new(registry));
    table.set_game("war").unwrap();
    table
}

/// Removing a player removes their advisors; removing an advisor keeps the
/// player.
#[test]
fn test_removal_cascades_one_way() {
    let mut table = table();
    table.add_player(u("p"), PlayerInfo::new());
    table.add_advisor(u("a1"), &u("p")).unwrap();
    table.add_advisor(u("a2"), &u("p")).unwrap();

    assert!(table.remove_user(&u("a1")));
    assert!(table.roster().is_player(&u("p")));
    assert!(table.roster().contains(&u("a2")));

    assert!(table.remove_user(&u("p")));
    assert!(!table.roster().contains(&u("a2")));
    assert!(table.roster().is_empty());
}

/// Removing someone unknown is a no-op.
#[test]
fn test_remove_unknown() {
    let mut table = table();
    assert!(!table.remove_user(&u("ghost")));
}

/// Advisors must reference a registered player, and not themselves.
#[test]
fn test_advisor_validation() {
    let mut table = table();
    table.add_player(u("p"), PlayerInfo::new());
    table.add_spectator(u("s"));

    assert_eq!(
        table.add_advisor(u("a"), &u("s")),
        Err(TableError::Role(RoleError::UnknownPlayer(u("s"))))
    );
    assert_eq!(
        table.add_advisor(u("p"), &u("p")),
        Err(TableError::Role(RoleError::SelfAdvisor(u("p"))))
    );
    assert!(table.roster().is_player(&u("p")));

    table.remove_user(&u("p"));
    assert_eq!(
        table.add_advisor(u("a"), &u("p")),
        Err(TableError::Role(RoleError::UnknownPlayer(u("p"))))
    );
}

/// Registering again replaces the previous role.
#[test]
fn test_reregistration_replaces_role() {
    let mut table = table();
    table.add_player(u("p"), PlayerInfo::new());
    table.add_player(u("x"), PlayerInfo::new());
    table.add_advisor(u("x2"), &u("x")).unwrap();

    table.add_spectator(u("x"));
    assert_eq!(table.roster().role(&u("x")), Some(&Role::Spectator));
    assert!(!table.roster().contains(&u("x2")));
    assert_eq!(table.roster().players(), &[u("p")]);
}

/// A removed player keeps their seat and resumes it on return.
#[test]
fn test_binding_survives_removal() {
    let mut table = table();
    table.add_player(u("ann"), PlayerInfo::new());
    table.add_player(u("bo"), PlayerInfo::new());
    table.start_game().unwrap();

    assert!(table.remove_user(&u("bo")));
    assert_eq!(table.seat_of(&u("bo")), Some(PlayerId(1)));
    assert!(matches!(
        table.get_status(&u("bo")),
        Err(TableError::Role(RoleError::UnknownUser(_)))
    ));

    table.add_player(u("bo"), PlayerInfo::new());
    let status = table.get_status(&u("bo")).unwrap();
    assert_eq!(status.status().unwrap().waiting_for(), Some(&[u("ann")][..]));
}

/// A player who joins after the start has no seat.
#[test]
fn test_late_player_is_unbound() {
    let mut table = table();
    table.add_player(u("ann"), PlayerInfo::new());
    table.add_player(u("bo"), PlayerInfo::new());
    table.start_game().unwrap();
    table.add_player(u("cy"), PlayerInfo::new());

    assert_eq!(
        table.take_action(&u("cy"), &0usize.into()),
        Err(TableError::Role(RoleError::Unbound(u("cy"))))
    );
    let status = table.get_status(&u("cy")).unwrap();
    assert!(status.status().unwrap().actions().is_none());
}

/// Not enough players to start.
#[test]
fn test_start_needs_players() {
    let mut table = table();
    table.add_player(u("ann"), PlayerInfo::new());
    table.add_spectator(u("s"));
    assert_eq!(
        table.start_game(),
        Err(TableError::Session(SessionError::PlayerCount {
            count: 1,
            min: 2,
            max: 8,
        }))
    );
}
