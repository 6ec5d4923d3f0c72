//! State tracking for the two-step deploy sequence
//!
//! The sequence is strictly linear and lives only in memory; the hosting
//! branch itself is the only persisted output of a deploy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Deploy sequence state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeployState {
    Initial,
    PublishingDocs,
    PublishingReadme,
    Success,
    Failed,
}

impl DeployState {
    /// Terminal states end the sequence; nothing may follow them
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }

    /// Valid successors in the linear sequence
    fn can_transition_to(&self, to: DeployState) -> bool {
        match self {
            Self::Initial => matches!(to, Self::PublishingDocs),
            Self::PublishingDocs => matches!(to, Self::PublishingReadme | Self::Failed),
            Self::PublishingReadme => matches!(to, Self::Success | Self::Failed),
            Self::Success | Self::Failed => false,
        }
    }

    /// State name as reported in `DeployReport`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "INITIAL",
            Self::PublishingDocs => "PUBLISHING_DOCS",
            Self::PublishingReadme => "PUBLISHING_README",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }
}

/// Rejected state transition
#[derive(Debug, Error, PartialEq, Eq)]
#[error("無効な状態遷移です: {from:?} → {to:?}")]
pub struct InvalidTransition {
    pub from: DeployState,
    pub to: DeployState,
}

/// A recorded state transition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateTransition {
    /// From state
    pub from: DeployState,

    /// To state
    pub to: DeployState,

    /// Timestamp
    pub timestamp: DateTime<Utc>,

    /// Additional detail (e.g., the error that caused a failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Tracks the deploy sequence through its linear states
#[derive(Debug)]
pub struct DeploySequence {
    current_state: DeployState,
    transitions: Vec<StateTransition>,
}

impl Default for DeploySequence {
    fn default() -> Self {
        Self::new()
    }
}

impl DeploySequence {
    /// Create a new sequence in the initial state
    pub fn new() -> Self {
        Self {
            current_state: DeployState::Initial,
            transitions: Vec::new(),
        }
    }

    /// Transition to a new state
    ///
    /// Only the linear successors of the current state are accepted;
    /// terminal states accept nothing.
    pub fn transition(
        &mut self,
        to: DeployState,
        detail: Option<String>,
    ) -> Result<(), InvalidTransition> {
        if !self.current_state.can_transition_to(to) {
            return Err(InvalidTransition {
                from: self.current_state,
                to,
            });
        }

        self.transitions.push(StateTransition {
            from: self.current_state,
            to,
            timestamp: Utc::now(),
            detail,
        });
        self.current_state = to;

        Ok(())
    }

    /// Get current state
    pub fn state(&self) -> DeployState {
        self.current_state
    }

    /// True once the sequence has reached Success or Failed
    pub fn is_terminal(&self) -> bool {
        self.current_state.is_terminal()
    }

    /// Recorded transitions, in order
    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    /// Elapsed time between first and last transition, in milliseconds
    pub fn elapsed_ms(&self) -> i64 {
        match (self.transitions.first(), self.transitions.last()) {
            (Some(first), Some(last)) => {
                (last.timestamp - first.timestamp).num_milliseconds()
            }
            _ => 0,
        }
    }

    /// Transition history as a human-readable string
    pub fn history(&self) -> String {
        self.transitions
            .iter()
            .map(|t| {
                let detail = t
                    .detail
                    .as_ref()
                    .map(|d| format!(" ({})", d))
                    .unwrap_or_default();
                format!(
                    "{}: {} → {}{}",
                    t.timestamp.to_rfc3339(),
                    t.from.as_str(),
                    t.to.as_str(),
                    detail
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
