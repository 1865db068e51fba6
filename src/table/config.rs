//! Table configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a [`GameTable`](super::GameTable).
///
/// ## Example
///
/// ```
/// use rust_gsm::table::TableConfig;
///
/// let config = TableConfig::default()
///     .with_mirror_log(true)
///     .with_seed(42);
/// assert!(config.eager_statuses);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Emit game log entries through `tracing` (target `game_log`).
    pub mirror_log: bool,
    /// Build the acting players' statuses as soon as a turn resolves.
    /// When off, every status is built on first request.
    pub eager_statuses: bool,
    /// Seed handed to games through the `seed` setting when the table's
    /// settings do not set one.
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            mirror_log: false,
            eager_statuses: true,
            seed: None,
        }
    }
}

impl TableConfig {
    #[must_use]
    pub fn with_mirror_log(mut self, mirror: bool) -> Self {
        self.mirror_log = mirror;
        self
    }

    #[must_use]
    pub fn with_eager_statuses(mut self, eager: bool) -> Self {
        self.eager_statuses = eager;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
