//! Built-in rules collaborators.

pub mod war;
