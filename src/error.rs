//! Setup-time errors shared across layers.
//!
//! Domain-specific errors live beside the code that raises them
//! (`actions::ResolutionError`, `rules::GameError`, `log::LogError`,
//! `table::{SessionError, RoleError, TableError}`). Registration failures
//! are raised both by the entity table and by the game registry, so they
//! live here.

use crate::core::EntityId;

/// A type, game or entity could not be registered.
///
/// Registration errors are fatal to the setup call that raised them only;
/// the owning table or state is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// No game with this name is registered.
    #[error("unknown game '{0}'")]
    UnknownGame(String),

    /// A game with this name is already registered.
    #[error("game '{0}' is already registered")]
    DuplicateGame(String),

    /// An object type with this name is already registered.
    #[error("object type '{0}' is already registered")]
    DuplicateType(String),

    /// Objects were created with a type nobody registered.
    #[error("unknown object type '{0}'")]
    UnknownType(String),

    /// A required property was not supplied at creation.
    #[error("object of type '{obj_type}' is missing property '{property}' (required: {required:?})")]
    MissingProperty {
        obj_type: String,
        property: String,
        required: Vec<String>,
    },

    /// An explicit id is already taken.
    #[error("entity id {0} is already in use")]
    IdCollision(EntityId),
}
