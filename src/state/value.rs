//! Heterogeneous nested state values.

use serde::{Deserialize, Serialize};

use super::{TList, TMap, TSet, Transactional};
use crate::core::{EntityId, PlayerId, Term};

/// A node in the game state tree.
///
/// Leaves are plain terms, inner nodes are transactional containers, so any
/// tree built from `Value`s rolls back as a whole.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Term(Term),
    Map(TMap<String, Value>),
    List(TList<Value>),
    Set(TSet<Term>),
}

impl Value {
    /// An empty map node.
    #[must_use]
    pub fn map() -> Self {
        Value::Map(TMap::new())
    }

    /// An empty list node.
    #[must_use]
    pub fn list() -> Self {
        Value::List(TList::new())
    }

    /// An empty set node.
    #[must_use]
    pub fn set() -> Self {
        Value::Set(TSet::new())
    }

    #[must_use]
    pub fn as_term(&self) -> Option<&Term> {
        match self {
            Value::Term(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        self.as_term().and_then(Term::as_int)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        self.as_term().and_then(Term::as_bool)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.as_term().and_then(Term::as_text)
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&TMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut TMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&TList<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut TList<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_set(&self) -> Option<&TSet<Term>> {
        match self {
            Value::Set(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_set_mut(&mut self) -> Option<&mut TSet<Term>> {
        match self {
            Value::Set(s) => Some(s),
            _ => None,
        }
    }

    /// Look up `key` if this is a map node.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|m| m.get(key))
    }
}

impl Transactional for Value {
    fn begin(&mut self) {
        match self {
            Value::Term(_) => {}
            Value::Map(m) => m.begin(),
            Value::List(l) => l.begin(),
            Value::Set(s) => s.begin(),
        }
    }

    fn commit(&mut self) {
        match self {
            Value::Term(_) => {}
            Value::Map(m) => m.commit(),
            Value::List(l) => l.commit(),
            Value::Set(s) => s.commit(),
        }
    }

    fn abort(&mut self) {
        match self {
            Value::Term(_) => {}
            Value::Map(m) => m.abort(),
            Value::List(l) => l.abort(),
            Value::Set(s) => s.abort(),
        }
    }

    fn in_transaction(&self) -> bool {
        match self {
            Value::Term(_) => false,
            Value::Map(m) => m.in_transaction(),
            Value::List(l) => l.in_transaction(),
            Value::Set(s) => s.in_transaction(),
        }
    }
}

macro_rules! value_from_term {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Term(v.into())
                }
            }
        )*
    };
}

value_from_term!(Term, bool, i64, i32, u32, &str, String, EntityId, PlayerId);

impl From<TMap<String, Value>> for Value {
    fn from(map: TMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl From<TList<Value>> for Value {
    fn from(list: TList<Value>) -> Self {
        Value::List(list)
    }
}

impl From<TSet<Term>> for Value {
    fn from(set: TSet<Term>) -> Self {
        Value::Set(set)
    }
}
