//! Ordered transactional list.

use im::Vector;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use super::Transactional;

/// Ordered list with snapshot/rollback.
///
/// Elements take part in the list's transactions.
#[derive(Clone, Debug)]
pub struct TList<V: Clone> {
    data: Vector<V>,
    shadow: Option<Vector<V>>,
}

impl<V: Clone> TList<V> {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Vector::new(),
            shadow: None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&V> {
        self.data.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut V> {
        self.data.get_mut(index)
    }

    #[must_use]
    pub fn first(&self) -> Option<&V> {
        self.data.front()
    }

    #[must_use]
    pub fn last(&self) -> Option<&V> {
        self.data.back()
    }

    /// Append to the end.
    pub fn push(&mut self, value: V) {
        self.data.push_back(value);
    }

    /// Remove from the end.
    pub fn pop(&mut self) -> Option<V> {
        self.data.pop_back()
    }

    /// Insert at `index`, clamped to the list length.
    pub fn insert(&mut self, index: usize, value: V) {
        let index = index.min(self.data.len());
        self.data.insert(index, value);
    }

    /// Remove the element at `index`, or `None` if out of range.
    pub fn remove(&mut self, index: usize) -> Option<V> {
        (index < self.data.len()).then(|| self.data.remove(index))
    }

    /// Replace the element at `index`, returning the old value.
    pub fn set(&mut self, index: usize, value: V) -> Option<V> {
        (index < self.data.len()).then(|| self.data.set(index, value))
    }

    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn reverse(&mut self) {
        self.data = self.data.iter().rev().cloned().collect();
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &V> {
        self.data.iter()
    }

    /// Iterate over elements from `start` to the end.
    pub fn iter_from(&self, start: usize) -> impl Iterator<Item = &V> {
        self.data.iter().skip(start)
    }

    #[must_use]
    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.data.iter().any(|v| v == value)
    }

    #[must_use]
    pub fn position(&self, value: &V) -> Option<usize>
    where
        V: PartialEq,
    {
        self.data.iter().position(|v| v == value)
    }

    /// Copy the elements into a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<V> {
        self.data.iter().cloned().collect()
    }
}

impl<V: Clone + Transactional> Transactional for TList<V> {
    fn begin(&mut self) {
        if self.in_transaction() {
            self.abort();
        }
        for child in self.data.iter_mut() {
            child.begin();
        }
        self.shadow = Some(self.data.clone());
    }

    fn commit(&mut self) {
        if !self.in_transaction() {
            return;
        }
        for child in self.data.iter_mut() {
            child.commit();
        }
        self.shadow = None;
    }

    fn abort(&mut self) {
        let Some(shadow) = self.shadow.take() else {
            return;
        };
        self.data = shadow;
        for child in self.data.iter_mut() {
            child.abort();
        }
    }

    fn in_transaction(&self) -> bool {
        self.shadow.is_some()
    }
}

impl<V: Clone> Default for TList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + PartialEq> PartialEq for TList<V> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<V: Clone + Eq> Eq for TList<V> {}

impl<V: Clone> FromIterator<V> for TList<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
            shadow: None,
        }
    }
}

impl<V: Clone> Extend<V> for TList<V> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for v in iter {
            self.data.push_back(v);
        }
    }
}

impl<V: Clone> From<Vec<V>> for TList<V> {
    fn from(values: Vec<V>) -> Self {
        values.into_iter().collect()
    }
}

impl<V: Clone + Serialize> Serialize for TList<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.data.iter())
    }
}

impl<'de, V: Clone + Deserialize<'de>> Deserialize<'de> for TList<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Vec::<V>::deserialize(deserializer)?.into())
    }
}
