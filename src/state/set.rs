//! Insertion-ordered transactional set.

use std::borrow::Borrow;
use std::hash::Hash;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use super::{TMap, Transactional};

/// Insertion-ordered set with snapshot/rollback.
///
/// Members are immutable, so only membership is rolled back.
///
/// ```
/// use rust_gsm::state::{TSet, Transactional};
///
/// let mut seen: TSet<u32> = [1, 2].into_iter().collect();
/// seen.begin();
/// seen.insert(3);
/// seen.remove(&1);
/// seen.abort();
/// assert_eq!(seen.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
/// ```
#[derive(Clone, Debug)]
pub struct TSet<T: Hash + Eq + Clone> {
    inner: TMap<T, ()>,
}

impl<T: Hash + Eq + Clone> TSet<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { inner: TMap::new() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[must_use]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.contains_key(value)
    }

    /// Add a member. Returns false if it was already present.
    pub fn insert(&mut self, value: T) -> bool {
        self.inner.insert(value, ()).is_none()
    }

    /// Remove a member. Returns false if it was absent.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.remove(value).is_some()
    }

    /// Remove and return the most recently added member.
    pub fn pop(&mut self) -> Option<T> {
        self.inner.pop_last().map(|(k, ())| k)
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.inner.keys()
    }

    /// Members of `self` followed by new members of `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        self.iter().chain(other.iter()).cloned().collect()
    }

    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        self.iter().filter(|v| other.contains(*v)).cloned().collect()
    }

    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        self.iter().filter(|v| !other.contains(*v)).cloned().collect()
    }

    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        self.difference(other).union(&other.difference(self))
    }

    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.iter().all(|v| other.contains(v))
    }

    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.iter().all(|v| !other.contains(v))
    }
}

impl<T: Hash + Eq + Clone> Transactional for TSet<T> {
    fn begin(&mut self) {
        self.inner.begin();
    }

    fn commit(&mut self) {
        self.inner.commit();
    }

    fn abort(&mut self) {
        self.inner.abort();
    }

    fn in_transaction(&self) -> bool {
        self.inner.in_transaction()
    }
}

impl<T: Hash + Eq + Clone> Default for TSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sets compare by membership; order is ignored.
impl<T: Hash + Eq + Clone> PartialEq for TSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl<T: Hash + Eq + Clone> Eq for TSet<T> {}

impl<T: Hash + Eq + Clone> FromIterator<T> for TSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Hash + Eq + Clone> Extend<T> for TSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl<T: Hash + Eq + Clone + Serialize> Serialize for TSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Hash + Eq + Clone + Deserialize<'de>> Deserialize<'de> for TSet<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Vec::<T>::deserialize(deserializer)?.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[u32]) -> TSet<u32> {
        values.iter().copied().collect()
    }

    #[test]
    fn test_insert_remove() {
        let mut s = set(&[1, 2]);
        assert!(!s.insert(1));
        assert!(s.insert(3));
        assert!(s.remove(&2));
        assert!(!s.remove(&2));
        assert_eq!(s.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(s.pop(), Some(3));
    }

    #[test]
    fn test_set_algebra() {
        let a = set(&[1, 2, 3]);
        let b = set(&[3, 4]);

        assert_eq!(a.union(&b), set(&[1, 2, 3, 4]));
        assert_eq!(a.intersection(&b), set(&[3]));
        assert_eq!(a.difference(&b), set(&[1, 2]));
        assert_eq!(a.symmetric_difference(&b), set(&[1, 2, 4]));
    }

    #[test]
    fn test_relations() {
        let a = set(&[1, 2]);
        let b = set(&[1, 2, 3]);
        let c = set(&[7]);

        assert!(a.is_subset(&b));
        assert!(b.is_superset(&a));
        assert!(!b.is_subset(&a));
        assert!(a.is_disjoint(&c));
        assert!(!a.is_disjoint(&b));
    }

    #[test]
    fn test_equality_ignores_order() {
        assert_eq!(set(&[1, 2, 3]), set(&[3, 1, 2]));
        assert_ne!(set(&[1, 2]), set(&[1, 2, 3]));
    }

    #[test]
    fn test_transaction() {
        let mut s = set(&[1]);
        s.begin();
        s.insert(2);
        assert!(s.in_transaction());
        s.commit();
        s.begin();
        s.clear();
        s.abort();
        assert_eq!(s, set(&[1, 2]));
    }
}
