//! Root game state container.

use serde::{Deserialize, Serialize};

use super::{EntityTable, TCell, TMap, Transactional, Value};
use crate::core::{GameRng, PlayerId};

/// Everything a running game may mutate.
///
/// The table owns one `GameState` per game instance and wraps every call
/// into the rules collaborator in a transaction on it, so a failing action
/// leaves no trace.
///
/// ## Example
///
/// ```
/// use rust_gsm::state::{GameState, Transactional};
///
/// let mut state = GameState::with_seed(7);
/// state.set("round", 1i64);
///
/// state.begin();
/// state.set("round", 2i64);
/// let roll = state.rng_mut().unwrap().gen_range(0..6);
/// state.abort();
///
/// assert_eq!(state.get("round").and_then(|v| v.as_int()), Some(1));
/// // The RNG was rewound too.
/// assert_eq!(state.rng_mut().unwrap().gen_range(0..6), roll);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    vars: TMap<String, Value>,
    entities: EntityTable,
    rng: TCell<Option<GameRng>>,
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State with a seeded RNG.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: TCell::new(Some(GameRng::new(seed))),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.vars.get_mut(key)
    }

    /// Set a top-level variable, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.vars.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.vars.remove(key)
    }

    #[must_use]
    pub fn vars(&self) -> &TMap<String, Value> {
        &self.vars
    }

    pub fn vars_mut(&mut self) -> &mut TMap<String, Value> {
        &mut self.vars
    }

    #[must_use]
    pub fn entities(&self) -> &EntityTable {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut EntityTable {
        &mut self.entities
    }

    /// The game RNG, if one was seeded.
    pub fn rng_mut(&mut self) -> Option<&mut GameRng> {
        self.rng.get_mut().as_mut()
    }

    /// Replace the RNG with a freshly seeded one.
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng.set(Some(GameRng::new(seed)));
    }

    /// Default observation: top-level variables plus the privatized
    /// entity table.
    #[must_use]
    pub fn observe(&self, viewer: Option<PlayerId>) -> Value {
        let mut view = TMap::new();
        view.insert("state".to_string(), Value::Map(self.vars.clone()));
        view.insert("objects".to_string(), self.entities.observe(viewer));
        Value::Map(view)
    }
}

impl Transactional for GameState {
    fn begin(&mut self) {
        self.vars.begin();
        self.entities.begin();
        self.rng.begin();
    }

    fn commit(&mut self) {
        self.vars.commit();
        self.entities.commit();
        self.rng.commit();
    }

    fn abort(&mut self) {
        self.vars.abort();
        self.entities.abort();
        self.rng.abort();
    }

    fn in_transaction(&self) -> bool {
        self.vars.in_transaction()
    }
}
