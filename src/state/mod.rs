//! Transactional game state.
//!
//! All mutable game state lives in containers that can snapshot and roll back:
//!
//! - `TMap`: insertion-ordered map
//! - `TList`: ordered list
//! - `TSet`: insertion-ordered set
//! - `TCell`: a single transactional slot
//! - `Value`: heterogeneous nested state tree built from the above
//! - `EntityTable`: typed game objects with per-player visibility
//! - `GameState`: the root container the table owns and hands to the game
//!
//! ## Transactions
//!
//! `begin()` opens a speculative window, `commit()` keeps everything written
//! since, `abort()` restores the data observed at `begin()`. Transactions
//! propagate to every transactional value stored inside a container, so
//! aborting the root rewinds the whole tree. Calling `begin()` while already
//! in a transaction aborts the running one first.
//!
//! Snapshots are O(1): containers are backed by `im` persistent structures,
//! so the shadow copy shares all untouched nodes with the live data.
//!
//! ```
//! use rust_gsm::state::{TMap, Transactional};
//!
//! let mut scores: TMap<String, i64> = TMap::new();
//! scores.insert("alice".to_string(), 3);
//!
//! scores.begin();
//! scores.insert("alice".to_string(), 99);
//! scores.abort();
//!
//! assert_eq!(scores.get("alice"), Some(&3));
//! ```

mod cell;
mod game_state;
mod list;
mod map;
mod objects;
mod set;
mod value;

pub use cell::TCell;
pub use game_state::GameState;
pub use list::TList;
pub use map::TMap;
pub use objects::{EntityTable, GameObject, ObjectType, Visibility};
pub use set::TSet;
pub use value::Value;

use crate::core::{EntityId, PlayerId, Term, UserId};

/// Capability implemented by everything that takes part in transactions.
///
/// Containers call these on each value they hold, so a value type must
/// implement `Transactional` to be stored in `TMap`/`TList`. Plain data types
/// implement it as a no-op (see `impl_inert_transactional!`).
pub trait Transactional {
    /// Open a transaction, aborting any transaction already running.
    fn begin(&mut self);

    /// Keep all changes since `begin()`. No-op outside a transaction.
    fn commit(&mut self);

    /// Restore the state observed at `begin()`. No-op outside a transaction.
    fn abort(&mut self);

    /// Whether a transaction is open.
    fn in_transaction(&self) -> bool;
}

/// Implements `Transactional` as a no-op for types that hold no nested state.
#[macro_export]
macro_rules! impl_inert_transactional {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::state::Transactional for $ty {
                fn begin(&mut self) {}
                fn commit(&mut self) {}
                fn abort(&mut self) {}
                fn in_transaction(&self) -> bool {
                    false
                }
            }
        )*
    };
}

impl_inert_transactional!(
    (),
    bool,
    i32,
    i64,
    u8,
    u32,
    u64,
    usize,
    String,
    Term,
    EntityId,
    PlayerId,
    UserId,
);

impl<T: Transactional> Transactional for Option<T> {
    fn begin(&mut self) {
        if let Some(inner) = self {
            inner.begin();
        }
    }

    fn commit(&mut self) {
        if let Some(inner) = self {
            inner.commit();
        }
    }

    fn abort(&mut self) {
        if let Some(inner) = self {
            inner.abort();
        }
    }

    fn in_transaction(&self) -> bool {
        self.as_ref().is_some_and(Transactional::in_transaction)
    }
}

impl<T: Transactional + ?Sized> Transactional for Box<T> {
    fn begin(&mut self) {
        (**self).begin();
    }

    fn commit(&mut self) {
        (**self).commit();
    }

    fn abort(&mut self) {
        (**self).abort();
    }

    fn in_transaction(&self) -> bool {
        (**self).in_transaction()
    }
}
