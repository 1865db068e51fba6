//! "War", a small card game for exercising the engine.
//!
//! - Each player starts with 20 life and a shuffled deck of power cards
//! - Cards in hand are visible only to their owner
//! - On your turn: draw a card, play a card against an opponent, or pass
//! - A played card deals its power as damage and is revealed to everyone
//! - Last player standing wins
//!
//! Supports 2-8 players. Settings: `life`, `deck_size`, `hand_size`, `seed`.

mod game;

pub use game::War;
