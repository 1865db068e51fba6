//! A single concrete action.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Term;

/// One concrete, chosen move: a flat ordered tuple of terms.
///
/// Equality and hashing only look at the terms. `idx` and `group` are
/// delivery metadata: the participant-visible number assigned when the
/// controller is handed out, and the name of the group the action came from.
///
/// ## Example
///
/// ```
/// use rust_gsm::actions::Action;
/// use rust_gsm::core::{EntityId, Term};
///
/// let play = Action::new([Term::from("play"), Term::from(EntityId(3))]);
/// assert_eq!(play.len(), 2);
/// assert_eq!(play, Action::new(["play".into(), EntityId(3).into()]));
/// assert_eq!(play.to_string(), "play #3");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Action {
    /// The terms. SmallVec keeps short actions off the heap.
    pub terms: SmallVec<[Term; 4]>,
    pub idx: Option<usize>,
    pub group: Option<Arc<str>>,
}

impl Action {
    #[must_use]
    pub fn new(terms: impl IntoIterator<Item = Term>) -> Self {
        Self {
            terms: terms.into_iter().collect(),
            idx: None,
            group: None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Term> {
        self.terms.get(position)
    }

    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// The first term if it is text, the conventional verb of an action.
    #[must_use]
    pub fn verb(&self) -> Option<&str> {
        self.terms.first().and_then(Term::as_text)
    }

    /// Whether this action's terms equal `pick`.
    #[must_use]
    pub fn matches(&self, pick: &[Term]) -> bool {
        self.terms.as_slice() == pick
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms
    }
}

impl Eq for Action {}

impl Hash for Action {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.terms.hash(state);
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

impl From<Vec<Term>> for Action {
    fn from(terms: Vec<Term>) -> Self {
        Self::new(terms)
    }
}
