//! Terms: the atoms of actions and log lines.
//!
//! A term is either a primitive value or a reference to something in the
//! game (an entity or a player seat). Actions are flat tuples of terms, log
//! entries are sequences of terms, and game state leaves are terms.
//!
//! ```
//! use rust_gsm::core::{EntityId, PlayerId, Term};
//!
//! let play = [Term::from("play"), Term::from(EntityId(4)), Term::from(PlayerId(1))];
//! assert_eq!(play[0].as_text(), Some("play"));
//! assert_eq!(play[1].as_entity(), Some(EntityId(4)));
//! assert_eq!(play[2].as_player(), Some(PlayerId(1)));
//! ```

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::player::PlayerId;

/// A primitive value or an entity reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    Bool(bool),
    Int(i64),
    Text(String),
    Entity(EntityId),
    Player(PlayerId),
}

impl Term {
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Term::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Term::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Term::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_entity(&self) -> Option<EntityId> {
        match self {
            Term::Entity(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_player(&self) -> Option<PlayerId> {
        match self {
            Term::Player(p) => Some(*p),
            _ => None,
        }
    }

    /// True for entity and player references.
    #[must_use]
    pub fn is_reference(&self) -> bool {
        matches!(self, Term::Entity(_) | Term::Player(_))
    }
}

impl From<bool> for Term {
    fn from(b: bool) -> Self {
        Term::Bool(b)
    }
}

impl From<i64> for Term {
    fn from(i: i64) -> Self {
        Term::Int(i)
    }
}

impl From<i32> for Term {
    fn from(i: i32) -> Self {
        Term::Int(i64::from(i))
    }
}

impl From<u32> for Term {
    fn from(i: u32) -> Self {
        Term::Int(i64::from(i))
    }
}

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Term::Text(s.to_string())
    }
}

impl From<String> for Term {
    fn from(s: String) -> Self {
        Term::Text(s)
    }
}

impl From<EntityId> for Term {
    fn from(id: EntityId) -> Self {
        Term::Entity(id)
    }
}

impl From<PlayerId> for Term {
    fn from(p: PlayerId) -> Self {
        Term::Player(p)
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Bool(b) => write!(f, "{b}"),
            Term::Int(i) => write!(f, "{i}"),
            Term::Text(s) => f.write_str(s),
            Term::Entity(id) => write!(f, "{id}"),
            Term::Player(p) => write!(f, "{p}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(Term::from(3i32), Term::Int(3));
        assert_eq!(Term::from(3u32), Term::Int(3));
        assert_eq!(Term::from(true), Term::Bool(true));
        assert_eq!(Term::from("x"), Term::Text("x".into()));
        assert_eq!(Term::from(EntityId(2)), Term::Entity(EntityId(2)));
    }

    #[test]
    fn test_accessors_reject_other_variants() {
        let t = Term::Int(5);
        assert_eq!(t.as_int(), Some(5));
        assert_eq!(t.as_text(), None);
        assert_eq!(t.as_entity(), None);
        assert!(!t.is_reference());
        assert!(Term::Player(PlayerId(0)).is_reference());
    }

    #[test]
    fn test_display() {
        assert_eq!(Term::from("hello").to_string(), "hello");
        assert_eq!(Term::from(EntityId(9)).to_string(), "#9");
        assert_eq!(Term::from(PlayerId(1)).to_string(), "Player 1");
        assert_eq!(Term::from(-4i64).to_string(), "-4");
    }

    #[test]
    fn test_serialization() {
        let t = Term::Entity(EntityId(3));
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"{"Entity":3}"#);
        let back: Term = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
