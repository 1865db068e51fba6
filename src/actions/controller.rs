//! Per-turn action controllers and descriptor resolution.

use serde::{Deserialize, Serialize};

use super::{Action, ActionGroup, ResolutionError, Selector};
use crate::core::Term;

/// How a participant names the action they chose.
///
/// On the wire this is untagged: a bare integer is a global index, a list of
/// terms is a pick, and an object selects within a named group.
///
/// ```
/// use rust_gsm::actions::ActionDescriptor;
///
/// let d: ActionDescriptor = serde_json::from_str("3").unwrap();
/// assert_eq!(d, ActionDescriptor::Index(3));
///
/// let d: ActionDescriptor = serde_json::from_str(r#"{"group": "end", "idx": 4}"#).unwrap();
/// assert!(matches!(d, ActionDescriptor::Group { .. }));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionDescriptor {
    /// Global flattened index across all groups.
    Index(usize),
    /// Terms of the wanted action, searched group by group.
    Pick(Vec<Term>),
    /// Resolve within one named group. `idx` is still the global index.
    Group {
        group: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        idx: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pick: Option<Vec<Term>>,
    },
}

impl From<usize> for ActionDescriptor {
    fn from(idx: usize) -> Self {
        ActionDescriptor::Index(idx)
    }
}

impl From<Vec<Term>> for ActionDescriptor {
    fn from(pick: Vec<Term>) -> Self {
        ActionDescriptor::Pick(pick)
    }
}

impl From<&Action> for ActionDescriptor {
    fn from(action: &Action) -> Self {
        ActionDescriptor::Pick(action.terms.to_vec())
    }
}

/// Every action group available to one participant on one turn.
///
/// Built by the rules collaborator, numbered and handed out by the table,
/// and replaced after the turn resolves.
///
/// ## Example
///
/// ```
/// use rust_gsm::actions::{ActionController, ActionDescriptor, ActionSpec};
///
/// let mut controller = ActionController::new();
/// controller.new_group("move").extend(ActionSpec::choice(["left", "right"]));
/// controller.new_group("end").extend("pass");
///
/// assert_eq!(controller.len(), 3);
/// let chosen = controller.find(&ActionDescriptor::Index(2)).unwrap();
/// assert_eq!(chosen.verb(), Some("pass"));
/// assert!(controller.find(&ActionDescriptor::Index(3)).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionController {
    groups: Vec<ActionGroup>,
}

impl ActionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new empty group and return it for filling.
    pub fn new_group(&mut self, name: impl AsRef<str>) -> &mut ActionGroup {
        self.push_group(ActionGroup::new(name))
    }

    /// Append a prepared group.
    pub fn push_group(&mut self, group: ActionGroup) -> &mut ActionGroup {
        self.groups.push(group);
        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }

    #[must_use]
    pub fn groups(&self) -> &[ActionGroup] {
        &self.groups
    }

    #[must_use]
    pub fn group(&self, name: &str) -> Option<&ActionGroup> {
        self.groups.iter().find(|g| g.name() == name)
    }

    /// Total number of actions across all groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.iter().map(ActionGroup::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(ActionGroup::is_empty)
    }

    /// All actions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.groups.iter().flat_map(ActionGroup::iter)
    }

    /// Number every action `0..len()` in declaration order.
    ///
    /// Called right before the controller is delivered to a participant, so
    /// the numbering is stable for exactly one turn.
    pub fn number_actions(&mut self) {
        let all = self.groups.iter_mut().flat_map(ActionGroup::iter_mut);
        for (idx, action) in all.enumerate() {
            action.idx = Some(idx);
        }
    }

    /// Resolve a descriptor to one action.
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange` for an index outside `0..len()`
    /// - `UnknownGroup` if the named group does not exist
    /// - `NoMatch` if a pick matches no action
    /// - `EmptySelector` for a group descriptor without `idx` or `pick`
    pub fn find(&self, descriptor: &ActionDescriptor) -> Result<&Action, ResolutionError> {
        match descriptor {
            ActionDescriptor::Index(index) => self.find_index(*index),
            ActionDescriptor::Pick(pick) => self.find_pick(pick),
            ActionDescriptor::Group { group, idx, pick } => {
                self.find_in_group(group, *idx, pick.as_deref())
            }
        }
    }

    fn find_index(&self, index: usize) -> Result<&Action, ResolutionError> {
        let mut local = index;
        for group in &self.groups {
            if local < group.len() {
                return group
                    .find(Selector::Index(local))
                    .ok_or_else(|| self.out_of_range(index));
            }
            local -= group.len();
        }
        Err(self.out_of_range(index))
    }

    fn find_pick(&self, pick: &[Term]) -> Result<&Action, ResolutionError> {
        self.groups
            .iter()
            .find_map(|g| g.find(Selector::Pick(pick)))
            .ok_or_else(|| ResolutionError::NoMatch(pick.to_vec()))
    }

    fn find_in_group(
        &self,
        name: &str,
        idx: Option<usize>,
        pick: Option<&[Term]>,
    ) -> Result<&Action, ResolutionError> {
        let mut offset = 0;
        let group = self
            .groups
            .iter()
            .find(|g| {
                let found = g.name() == name;
                if !found {
                    offset += g.len();
                }
                found
            })
            .ok_or_else(|| ResolutionError::UnknownGroup(name.to_string()))?;

        match (idx, pick) {
            (Some(index), _) => index
                .checked_sub(offset)
                .and_then(|local| group.find(Selector::Index(local)))
                .ok_or_else(|| self.out_of_range(index)),
            (None, Some(pick)) => group
                .find(Selector::Pick(pick))
                .ok_or_else(|| ResolutionError::NoMatch(pick.to_vec())),
            (None, None) => Err(ResolutionError::EmptySelector(name.to_string())),
        }
    }

    fn out_of_range(&self, index: usize) -> ResolutionError {
        ResolutionError::IndexOutOfRange {
            index,
            total: self.len(),
        }
    }
}
