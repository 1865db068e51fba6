//! Core identifiers shared by every layer of the session engine.
//!
//! - `EntityId`: handle for a game object living in the entity table
//! - `PlayerId`: an in-game seat, bound to an external user by the table
//! - `UserId`: external participant identity (player, advisor or spectator)
//! - `Term`: one element of an action or log line
//! - `GameRng`: deterministic randomness for rules collaborators

pub mod entity;
pub mod player;
pub mod rng;
pub mod term;
pub mod user;

pub use entity::EntityId;
pub use player::PlayerId;
pub use rng::{GameRng, GameRngState};
pub use term::Term;
pub use user::UserId;
