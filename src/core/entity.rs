//! Entity identification.
//!
//! Every object a game creates in its `EntityTable` gets a unique `EntityId`.
//! Ids are allocated sequentially by the table; games may also request a
//! specific id when creating an object.
//!
//! ```
//! use rust_gsm::core::EntityId;
//!
//! let card = EntityId::new(7);
//! assert_eq!(card.raw(), 7);
//! assert_eq!(card.to_string(), "#7");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a game entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create an entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The id that follows this one in allocation order.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
