//! External participant identity.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Name of a participant registered at a table.
///
/// Users are opaque to the engine: the transport decides what a name means
/// (account, connection, bot id). The same user holds exactly one role at a
/// time.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a user id.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The user name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for UserId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&UserId> for UserId {
    fn from(user: &UserId) -> Self {
        user.clone()
    }
}

impl Borrow<str> for UserId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
