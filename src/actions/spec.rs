//! Nested action specifications.
//!
//! Rules code rarely lists legal moves one by one. Instead it describes them
//! with a small combinator language and lets [`ActionSpec::expand`] produce
//! the concrete term tuples:
//!
//! - `Term`: a single base term
//! - `Choice`: any one of the members (union of their expansions)
//! - `Tuple`: one expansion per position, combined (Cartesian product)
//! - `Action`: an already built action, used as-is
//!
//! Nested tuples and actions inside a tuple are flattened, so every result is
//! a flat term sequence.
//!
//! ```
//! use rust_gsm::actions::ActionSpec;
//! use rust_gsm::core::Term;
//!
//! // ("play", [1, 2], ["left", "right"]) -> four actions
//! let spec = ActionSpec::tuple([
//!     ActionSpec::from("play"),
//!     ActionSpec::choice([1i64, 2]),
//!     ActionSpec::choice(["left", "right"]),
//! ]);
//! let expanded = spec.expand();
//! assert_eq!(expanded.len(), 4);
//! assert_eq!(
//!     expanded[1],
//!     vec![Term::from("play"), Term::from(1i64), Term::from("right")]
//! );
//! ```

use serde::{Deserialize, Serialize};

use super::Action;
use crate::core::{EntityId, PlayerId, Term};

/// A compact description of a set of actions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionSpec {
    Term(Term),
    Action(Action),
    Choice(Vec<ActionSpec>),
    Tuple(Vec<ActionSpec>),
}

impl ActionSpec {
    /// Any one of `items`.
    pub fn choice<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ActionSpec>,
    {
        ActionSpec::Choice(items.into_iter().map(Into::into).collect())
    }

    /// All positional combinations of `items`.
    pub fn tuple<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ActionSpec>,
    {
        ActionSpec::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Expand into flat term sequences, in declaration order.
    ///
    /// An empty `Choice` yields nothing; an empty `Tuple` yields one empty
    /// sequence.
    #[must_use]
    pub fn expand(&self) -> Vec<Vec<Term>> {
        match self {
            ActionSpec::Term(term) => vec![vec![term.clone()]],
            ActionSpec::Action(action) => vec![action.terms.to_vec()],
            ActionSpec::Choice(items) => items.iter().flat_map(ActionSpec::expand).collect(),
            ActionSpec::Tuple(items) => {
                let mut combos: Vec<Vec<Term>> = vec![Vec::new()];
                for item in items {
                    let options = item.expand();
                    combos = combos
                        .iter()
                        .flat_map(|prefix| {
                            options.iter().map(move |option| {
                                let mut combo = prefix.clone();
                                combo.extend(option.iter().cloned());
                                combo
                            })
                        })
                        .collect();
                    if combos.is_empty() {
                        break;
                    }
                }
                combos
            }
        }
    }

    /// Number of actions `expand` would produce, without building them.
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            ActionSpec::Term(_) | ActionSpec::Action(_) => 1,
            ActionSpec::Choice(items) => items.iter().map(ActionSpec::count).sum(),
            ActionSpec::Tuple(items) => items
                .iter()
                .map(ActionSpec::count)
                .fold(1usize, usize::saturating_mul),
        }
    }
}

macro_rules! spec_from_term {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ActionSpec {
                fn from(v: $ty) -> Self {
                    ActionSpec::Term(v.into())
                }
            }
        )*
    };
}

spec_from_term!(Term, bool, i64, i32, u32, &str, String, EntityId, PlayerId);

impl From<Action> for ActionSpec {
    fn from(action: Action) -> Self {
        ActionSpec::Action(action)
    }
}

impl<T: Into<ActionSpec>> From<Vec<T>> for ActionSpec {
    fn from(items: Vec<T>) -> Self {
        ActionSpec::choice(items)
    }
}
