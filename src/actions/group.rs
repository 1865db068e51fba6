//! Named groups of actions.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Action, ActionSpec};
use crate::core::Term;

/// How to pick an action inside one group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector<'a> {
    /// Position within the group.
    Index(usize),
    /// Terms of the wanted action.
    Pick(&'a [Term]),
}

/// A named collection of actions, built fresh each turn.
///
/// ## Example
///
/// ```
/// use rust_gsm::actions::{ActionGroup, ActionSpec, Selector};
/// use rust_gsm::core::Term;
///
/// let mut group = ActionGroup::new("attack");
/// group.extend(ActionSpec::tuple([
///     ActionSpec::from("attack"),
///     ActionSpec::choice(["north", "south"]),
/// ]));
///
/// assert_eq!(group.len(), 2);
/// let pick = [Term::from("attack"), Term::from("south")];
/// assert!(group.find(Selector::Pick(&pick)).is_some());
/// assert!(group.find(Selector::Index(2)).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionGroup {
    name: Arc<str>,
    desc: Option<String>,
    actions: Vec<Action>,
}

impl ActionGroup {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            desc: None,
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn desc(&self) -> Option<&str> {
        self.desc.as_deref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Action> {
        self.actions.iter_mut()
    }

    /// Append one action.
    pub fn push(&mut self, action: impl Into<Action>) -> &mut Self {
        let mut action = action.into();
        action.group = Some(Arc::clone(&self.name));
        self.actions.push(action);
        self
    }

    /// Append every action described by `spec`.
    ///
    /// A bare `Action` is appended unchanged.
    pub fn extend(&mut self, spec: impl Into<ActionSpec>) -> &mut Self {
        match spec.into() {
            ActionSpec::Action(action) => {
                self.push(action);
            }
            spec => {
                for terms in spec.expand() {
                    self.push(Action::new(terms));
                }
            }
        }
        self
    }

    /// Look up an action by position or by terms.
    #[must_use]
    pub fn find(&self, selector: Selector<'_>) -> Option<&Action> {
        match selector {
            Selector::Index(idx) => self.actions.get(idx),
            Selector::Pick(pick) => self.actions.iter().find(|a| a.matches(pick)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_sets_group() {
        let mut group = ActionGroup::new("end").with_desc("end your turn");
        group.push(Action::new(["pass".into()]));
        let action = group.find(Selector::Index(0)).unwrap();
        assert_eq!(action.group.as_deref(), Some("end"));
        assert_eq!(group.desc(), Some("end your turn"));
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut group = ActionGroup::new("g");
        group.extend(ActionSpec::choice(["a", "b"])).extend("c");
        let verbs: Vec<_> = group.iter().filter_map(Action::verb).collect();
        assert_eq!(verbs, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_extend_with_action_passes_through() {
        let mut group = ActionGroup::new("g");
        let action = Action::new(["x".into(), Term::Int(1)]);
        group.extend(action.clone());
        assert_eq!(group.len(), 1);
        assert_eq!(group.find(Selector::Index(0)), Some(&action));
    }

    #[test]
    fn test_pick_returns_first_match() {
        let mut group = ActionGroup::new("g");
        group.extend(ActionSpec::choice(["a", "a"]));
        let pick = [Term::from("a")];
        assert_eq!(group.len(), 2);
        assert!(group.find(Selector::Pick(&pick)).is_some());
        assert!(group.find(Selector::Pick(&[Term::from("z")])).is_none());
    }
}
