//! Per-participant status snapshots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::actions::{Action, ActionController};
use crate::core::UserId;
use crate::log::LogEntry;
use crate::rules::GameOutcome;
use crate::state::Value;

/// What the participant is asked to do.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prompt {
    /// It is (or, for an advisor, their player's) turn: choose one of these.
    Actions(ActionController),
    /// Users still expected to act this turn, in seat order.
    WaitingFor(Vec<UserId>),
}

/// One participant's view of the current turn.
///
/// Valid until the next action resolves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Game state filtered for this participant.
    pub observation: Value,
    /// Log entries not delivered to this participant before.
    pub log: Vec<LogEntry>,
    pub prompt: Prompt,
    /// Suggestions from advisors, by advisor.
    pub advice: BTreeMap<UserId, Action>,
}

impl Status {
    /// The offered actions, if it is this participant's turn.
    #[must_use]
    pub fn actions(&self) -> Option<&ActionController> {
        match &self.prompt {
            Prompt::Actions(controller) => Some(controller),
            Prompt::WaitingFor(_) => None,
        }
    }

    /// Who the participant is waiting on, if it is not their turn.
    #[must_use]
    pub fn waiting_for(&self) -> Option<&[UserId]> {
        match &self.prompt {
            Prompt::Actions(_) => None,
            Prompt::WaitingFor(users) => Some(users),
        }
    }
}

/// Answer to a status request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusReport {
    Active(Status),
    /// The game is over; `log` holds the entries not yet delivered.
    Ended {
        outcome: GameOutcome,
        log: Vec<LogEntry>,
    },
}

impl StatusReport {
    #[must_use]
    pub fn status(&self) -> Option<&Status> {
        match self {
            StatusReport::Active(status) => Some(status),
            StatusReport::Ended { .. } => None,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&GameOutcome> {
        match self {
            StatusReport::Active(_) => None,
            StatusReport::Ended { outcome, .. } => Some(outcome),
        }
    }

    /// The log delta carried by either variant.
    #[must_use]
    pub fn log(&self) -> &[LogEntry] {
        match self {
            StatusReport::Active(status) => &status.log,
            StatusReport::Ended { log, .. } => log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::GameResult;

    #[test]
    fn test_prompt_accessors() {
        let waiting = Status {
            observation: Value::map(),
            log: Vec::new(),
            prompt: Prompt::WaitingFor(vec![UserId::new("p1")]),
            advice: BTreeMap::new(),
        };
        assert!(waiting.actions().is_none());
        assert_eq!(waiting.waiting_for(), Some(&[UserId::new("p1")][..]));

        let acting = Status {
            prompt: Prompt::Actions(ActionController::new()),
            ..waiting
        };
        assert!(acting.actions().is_some());
        assert!(acting.waiting_for().is_none());
    }

    #[test]
    fn test_report_accessors() {
        let ended = StatusReport::Ended {
            outcome: GameOutcome::new(GameResult::Draw),
            log: vec![LogEntry::new(["draw"])],
        };
        assert!(ended.status().is_none());
        assert_eq!(ended.outcome().map(|o| &o.result), Some(&GameResult::Draw));
        assert_eq!(ended.log().len(), 1);
    }
}
