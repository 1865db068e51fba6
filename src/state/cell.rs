//! Single transactional slot.

use serde::{Deserialize, Serialize};

use super::Transactional;

/// One value with snapshot/rollback.
///
/// Used for scalars that live outside a container but still have to follow
/// the surrounding transaction, such as id counters and the game RNG.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TCell<T: Clone> {
    value: T,
    #[serde(skip)]
    shadow: Option<T>,
}

impl<T: Clone> TCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            shadow: None,
        }
    }

    #[must_use]
    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Replace the value, returning the old one.
    pub fn set(&mut self, value: T) -> T {
        std::mem::replace(&mut self.value, value)
    }
}

impl<T: Clone> Transactional for TCell<T> {
    fn begin(&mut self) {
        if self.in_transaction() {
            self.abort();
        }
        self.shadow = Some(self.value.clone());
    }

    fn commit(&mut self) {
        self.shadow = None;
    }

    fn abort(&mut self) {
        if let Some(shadow) = self.shadow.take() {
            self.value = shadow;
        }
    }

    fn in_transaction(&self) -> bool {
        self.shadow.is_some()
    }
}

impl<T: Clone + PartialEq> PartialEq for TCell<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Clone + Eq> Eq for TCell<T> {}
