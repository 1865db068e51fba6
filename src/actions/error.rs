//! Action resolution errors.

use crate::core::Term;

/// A descriptor could not be resolved to an action.
///
/// Each variant identifies which lookup failed so the transport can tell
/// the participant what was wrong with their choice.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    /// Global index outside `0..total`.
    #[error("action index {index} is out of range (total actions: {total})")]
    IndexOutOfRange { index: usize, total: usize },

    /// No group with this name in the controller.
    #[error("action group '{0}' not found")]
    UnknownGroup(String),

    /// No action has these terms.
    #[error("no action matches {0:?}")]
    NoMatch(Vec<Term>),

    /// A group descriptor named neither an index nor a pick.
    #[error("action descriptor for group '{0}' has neither idx nor pick")]
    EmptySelector(String),
}
