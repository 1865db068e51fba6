//! Save/load tests.

use std::sync::Arc;

use rust_gsm::actions::ActionDescriptor;
use rust_gsm::core::UserId;
use rust_gsm::games::war::War;
use rust_gsm::rules::{GameRegistry, PlayerInfo};
use rust_gsm::state::Transactional;
use rust_gsm::table::{GameTable, SessionError, TableConfig, TableError, TablePhase};

fn u(name: &str) -> UserId {
    UserId::new(name)
}

fn registry() -> Arc<GameRegistry> {
    let mut registry = GameRegistry::new();
    registry.register(War::info()).unwrap();
    Arc::new(registry)
}

fn fresh(players: &[&str]) -> GameTable {
    let mut table = GameTable::with_config(registry(), TableConfig::default().with_seed(3));
    table.set_game("war").unwrap();
    for p in players {
        table.add_player(u(p), PlayerInfo::new());
    }
    table
}

fn played() -> GameTable {
    let mut table = fresh(&["ann", "bo"]);
    table.start_game().unwrap();
    table.take_action(&u("ann"), &ActionDescriptor::Index(0)).unwrap();
    table
}

/// A saved game resumes with the same state, log, turn and seats.
#[test]
fn test_save_load_resumes() {
    let original = played();
    let bytes = original.save().unwrap();

    let mut restored = fresh(&["ann", "bo"]);
    restored.load(&bytes).unwrap();

    assert_eq!(restored.phase(), TablePhase::InProgress);
    assert_eq!(restored.state(), original.state());
    assert_eq!(restored.log().len(), original.log().len());
    assert_eq!(restored.expected(), vec![u("bo")]);
    assert_eq!(restored.seat_of(&u("ann")), original.seat_of(&u("ann")));
    assert!(!restored.state().in_transaction());

    let status = restored.get_status(&u("bo")).unwrap();
    assert!(status.status().unwrap().actions().is_some());
    restored
        .take_action(&u("bo"), &ActionDescriptor::Index(0))
        .unwrap();
}

/// Saved cursors keep already delivered entries from being sent twice.
#[test]
fn test_cursors_survive() {
    let mut original = played();
    original.get_status(&u("bo")).unwrap();
    let cursor = original.log().cursor(&u("bo"));
    assert!(cursor > 0);

    let mut restored = fresh(&["ann", "bo"]);
    restored.load(&original.save().unwrap()).unwrap();
    assert_eq!(restored.log().cursor(&u("bo")), cursor);
}

/// A saved seat held by someone with another role is a conflict.
#[test]
fn test_role_conflict_rejected() {
    let bytes = played().save().unwrap();

    let mut table = fresh(&["ann"]);
    table.add_spectator(u("bo"));
    assert_eq!(
        table.load(&bytes),
        Err(TableError::Session(SessionError::LoadConflict { user: u("bo") }))
    );
    assert_eq!(table.phase(), TablePhase::GameSelected);
}

/// A saved seat already bound to a different user is a conflict.
#[test]
fn test_seat_conflict_rejected() {
    let bytes = played().save().unwrap();

    let mut table = fresh(&["bo", "ann"]);
    table.start_game().unwrap();
    assert!(matches!(
        table.load(&bytes),
        Err(TableError::Session(SessionError::LoadConflict { .. }))
    ));
}

/// The snapshot's game must be the selected one.
#[test]
fn test_game_must_match() {
    let bytes = played().save().unwrap();
    let mut table = GameTable::new(registry());
    assert_eq!(
        table.load(&bytes),
        Err(TableError::Session(SessionError::NoGameSelected))
    );
}
