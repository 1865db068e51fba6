//! Action model: what a participant may do on their turn.
//!
//! ## Key Types
//!
//! - `Action`: one concrete move, a flat tuple of terms
//! - `ActionSpec`: nested choice/tuple description expanded into actions
//! - `ActionGroup`: a named list of actions
//! - `ActionController`: all groups offered to one participant this turn
//! - `ActionDescriptor`: how a participant names their choice
//!
//! Ownership runs top-down only: a controller owns its groups, a group owns
//! its actions. Actions remember their group by name, never by reference.

mod action;
mod controller;
mod error;
mod group;
mod spec;

pub use action::Action;
pub use controller::{ActionController, ActionDescriptor};
pub use error::ResolutionError;
pub use group::{ActionGroup, Selector};
pub use spec::ActionSpec;
