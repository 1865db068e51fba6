//! Insertion-ordered transactional map.

use std::borrow::Borrow;
use std::hash::Hash;

use im::{HashMap as ImHashMap, Vector};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use super::Transactional;

#[derive(Clone, Debug)]
struct MapData<K: Hash + Eq + Clone, V: Clone> {
    order: Vector<K>,
    entries: ImHashMap<K, V>,
}

impl<K: Hash + Eq + Clone, V: Clone> MapData<K, V> {
    fn new() -> Self {
        Self {
            order: Vector::new(),
            entries: ImHashMap::new(),
        }
    }
}

/// Insertion-ordered map with snapshot/rollback.
///
/// Iteration follows insertion order; re-inserting an existing key keeps
/// its position. Values take part in the map's transactions, keys do not
/// (they are immutable once inserted).
///
/// ```
/// use rust_gsm::state::{TMap, Transactional};
///
/// let mut hp: TMap<&str, i64> = TMap::new();
/// hp.insert("goblin", 7);
/// hp.insert("orc", 12);
///
/// hp.begin();
/// hp.remove("goblin");
/// assert_eq!(hp.len(), 1);
/// hp.abort();
///
/// let keys: Vec<_> = hp.keys().copied().collect();
/// assert_eq!(keys, vec!["goblin", "orc"]);
/// ```
#[derive(Clone, Debug)]
pub struct TMap<K: Hash + Eq + Clone, V: Clone> {
    data: MapData<K, V>,
    shadow: Option<MapData<K, V>>,
}

impl<K, V> TMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: MapData::new(),
            shadow: None,
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.order.len()
    }

    /// Check if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.order.is_empty()
    }

    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data.entries.get(key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data.entries.get_mut(key)
    }

    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data.entries.contains_key(key)
    }

    /// Insert a value, returning the previous one.
    ///
    /// New keys go to the end; existing keys keep their position.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let previous = self.data.entries.insert(key.clone(), value);
        if previous.is_none() {
            self.data.order.push_back(key);
        }
        previous
    }

    /// Remove a key, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = self.data.entries.remove(key)?;
        if let Some(pos) = self.data.order.iter().position(|k| <K as Borrow<Q>>::borrow(k) == key) {
            self.data.order.remove(pos);
        }
        Some(value)
    }

    /// Get the value for `key`, inserting `default()` first if missing.
    pub fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        if !self.data.entries.contains_key(&key) {
            self.data.order.push_back(key.clone());
        }
        self.data.entries.entry(key).or_insert_with(default)
    }

    /// Move an existing key to the end (`last`) or the front of the order.
    ///
    /// Returns false if the key is not present.
    pub fn move_to_end<Q>(&mut self, key: &Q, last: bool) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(pos) = self.data.order.iter().position(|k| <K as Borrow<Q>>::borrow(k) == key) else {
            return false;
        };
        let k = self.data.order.remove(pos);
        if last {
            self.data.order.push_back(k);
        } else {
            self.data.order.push_front(k);
        }
        true
    }

    /// Remove and return the most recently inserted entry.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let key = self.data.order.pop_back()?;
        let value = self.data.entries.remove(&key)?;
        Some((key, value))
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.data.order.clear();
        self.data.entries.clear();
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.data.order.iter()
    }

    /// Iterate over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.data
            .order
            .iter()
            .filter_map(move |k| self.data.entries.get(k).map(|v| (k, v)))
    }
}

impl<K, V> TMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone + Transactional,
{
    fn children_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.data.entries.iter_mut().map(|(_, v)| v)
    }
}

impl<K, V> Transactional for TMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone + Transactional,
{
    fn begin(&mut self) {
        if self.in_transaction() {
            self.abort();
        }
        // Children snapshot themselves first, so the shadow captures them
        // already inside their own transaction and `abort` can rewind both.
        for child in self.children_mut() {
            child.begin();
        }
        self.shadow = Some(self.data.clone());
    }

    fn commit(&mut self) {
        if !self.in_transaction() {
            return;
        }
        for child in self.children_mut() {
            child.commit();
        }
        self.shadow = None;
    }

    fn abort(&mut self) {
        let Some(shadow) = self.shadow.take() else {
            return;
        };
        self.data = shadow;
        for child in self.children_mut() {
            child.abort();
        }
    }

    fn in_transaction(&self) -> bool {
        self.shadow.is_some()
    }
}

impl<K, V> Default for TMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Maps compare by content and order; transaction state is ignored.
impl<K, V> PartialEq for TMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K, V> Eq for TMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone + Eq,
{
}

impl<K, V> FromIterator<(K, V)> for TMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for TMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> Serialize for TMap<K, V>
where
    K: Hash + Eq + Clone + Serialize,
    V: Clone + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, K, V> Deserialize<'de> for TMap<K, V>
where
    K: Hash + Eq + Clone + Deserialize<'de>,
    V: Clone + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = Vec::<(K, V)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}
