//! Full games of War through the table.

use std::sync::Arc;

use rust_gsm::actions::{ActionDescriptor, ActionSpec};
use rust_gsm::core::{PlayerId, Term, UserId};
use rust_gsm::games::war::War;
use rust_gsm::rules::{GameRegistry, GameResult, PlayerInfo};
use rust_gsm::state::Value;
use rust_gsm::table::{GameTable, TableConfig, TableError, TablePhase};

fn table(players: usize, seed: u64) -> GameTable {
    let mut registry = GameRegistry::new();
    registry.register(War::info()).unwrap();
    let mut table = GameTable::with_config(Arc::new(registry), TableConfig::default().with_seed(seed));
    table.set_game("war").unwrap();
    table.set_setting("life", 6i64);
    for i in 0..players {
        table.add_player(UserId::new(format!("user{i}")), PlayerInfo::new());
    }
    table.start_game().unwrap();
    table
}

/// Play until someone wins, preferring attacks.
fn play_out(table: &mut GameTable) -> usize {
    let mut turns = 0;
    while table.phase() == TablePhase::InProgress && turns < 500 {
        let user = table.expected()[0].clone();
        let report = table.get_status(&user).unwrap();
        let actions = report.status().unwrap().actions().unwrap();
        let choice = actions
            .group("play")
            .and_then(|g| g.iter().next())
            .or_else(|| actions.iter().next())
            .and_then(|a| a.idx)
            .unwrap();
        table
            .take_action(&user, &ActionDescriptor::Index(choice))
            .unwrap();
        turns += 1;
    }
    turns
}

/// Attacks eventually leave one player standing.
#[test]
fn test_two_player_game_completes() {
    let mut table = table(2, 42);
    play_out(&mut table);

    assert_eq!(table.phase(), TablePhase::Ended);
    let outcome = table.outcome().unwrap();
    let GameResult::Winner(winner) = outcome.result else {
        panic!("expected a single winner, got {:?}", outcome.result);
    };
    assert!(outcome.scores[&winner] > 0);
    assert_eq!(outcome.scores.values().filter(|&&s| s > 0).count(), 1);
}

/// Four players play to the end too.
#[test]
fn test_four_player_game_completes() {
    let mut table = table(4, 7);
    play_out(&mut table);
    assert_eq!(table.phase(), TablePhase::Ended);
    assert_eq!(table.outcome().unwrap().scores.len(), 4);
}

/// The same seed replays the same game.
#[test]
fn test_seeded_games_replay() {
    let mut a = table(3, 99);
    let mut b = table(3, 99);
    assert_eq!(a.state(), b.state());

    let turns_a = play_out(&mut a);
    let turns_b = play_out(&mut b);
    assert_eq!(turns_a, turns_b);
    assert_eq!(a.outcome(), b.outcome());
}

/// Players cannot read each other's hands.
#[test]
fn test_observation_hides_opponent_hand() {
    let mut table = table(2, 1);
    let card = War::hand(table.state(), PlayerId(1))[0];

    let mine = table.get_status(&UserId::new("user1")).unwrap();
    let theirs = table.get_status(&UserId::new("user0")).unwrap();

    let power_seen_by = |observation: &Value| {
        observation
            .get("objects")
            .and_then(Value::as_list)
            .and_then(|objects| {
                objects
                    .iter()
                    .find(|o| o.get("id").and_then(Value::as_term) == Some(&Term::Entity(card)))
                    .and_then(|o| o.get("power").cloned())
            })
    };
    assert!(power_seen_by(&mine.status().unwrap().observation).is_some());
    assert!(power_seen_by(&theirs.status().unwrap().observation).is_none());
}

/// Play actions come from one combinatorial specification.
#[test]
fn test_play_group_matches_specification() {
    let mut table = table(3, 5);
    let hand = War::hand(table.state(), PlayerId(0));
    let report = table.get_status(&UserId::new("user0")).unwrap();
    let play = report.status().unwrap().actions().unwrap().group("play").unwrap();

    let spec = ActionSpec::tuple([
        ActionSpec::from("play"),
        ActionSpec::choice(hand),
        ActionSpec::choice([PlayerId(1), PlayerId(2)]),
    ]);
    let terms: Vec<Vec<Term>> = play.iter().map(|a| a.terms().to_vec()).collect();
    assert_eq!(terms, spec.expand());
}

/// Invalid settings surface when the game is built.
#[test]
fn test_bad_setting_blocks_start() {
    let mut registry = GameRegistry::new();
    registry.register(War::info()).unwrap();
    let mut table = GameTable::new(Arc::new(registry));
    table.set_game("war").unwrap();
    table.set_setting("life", "lots");
    table.add_player(UserId::new("a"), PlayerInfo::new());
    table.add_player(UserId::new("b"), PlayerInfo::new());

    assert!(matches!(table.start_game(), Err(TableError::Game(_))));
    assert_eq!(table.phase(), TablePhase::GameSelected);
}

/// With mirroring on, a full game runs with log lines going to `tracing`.
#[test]
fn test_mirrored_game() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let mut registry = GameRegistry::new();
    registry.register(War::info()).unwrap();
    let config = TableConfig::default().with_seed(11).with_mirror_log(true);
    let mut table = GameTable::with_config(Arc::new(registry), config);
    table.set_game("war").unwrap();
    table.set_setting("life", 4i64);
    table.add_player(UserId::new("a"), PlayerInfo::new());
    table.add_player(UserId::new("b"), PlayerInfo::new());
    table.start_game().unwrap();

    play_out(&mut table);
    assert_eq!(table.phase(), TablePhase::Ended);
    assert!(!table.log().is_empty());
}
