//! Error types for gridmdp.
//!
//! Every failure is raised where the violation is detected and carries the
//! offending state, action or value in its message.

use rand::distributions::WeightedError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MdpError>;

#[derive(Debug, Error)]
pub enum MdpError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("Unknown state: {0}")]
    UnknownState(String),

    #[error("Unknown action {action} in state {state}")]
    UnknownAction { state: String, action: String },

    #[error(transparent)]
    Consistency(#[from] ConsistencyError),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error reading {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot sample a successor: {0}")]
    Sampling(#[from] WeightedError),
}

/// The invariant `check_consistency` found broken.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsistencyError {
    #[error("States derived from transitions differ from declared states (undeclared: {undeclared}, unreached: {unreached})")]
    StateSetMismatch { undeclared: String, unreached: String },

    #[error("Initial state {0} is not a state")]
    InvalidInitialState(String),

    #[error("Reward keys differ from states (extra: {extra}, missing: {missing})")]
    RewardKeyMismatch { extra: String, missing: String },

    #[error("Terminal {0} is not a state")]
    InvalidTerminal(String),

    #[error("Probabilities for action {action} in state {state} sum to {sum}")]
    ProbabilitySum {
        state: String,
        action: String,
        sum: f64,
    },
}

/// Non-fatal conditions found while building a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MdpWarning {
    /// No transition table: the model only answers reward queries.
    EmptyTransitions,
}

impl MdpError {
    pub(crate) fn unknown_state<S: std::fmt::Debug>(s: &S) -> Self {
        Self::UnknownState(format!("{s:?}"))
    }

    pub(crate) fn unknown_action<S: std::fmt::Debug, A: std::fmt::Debug>(s: &S, a: &A) -> Self {
        Self::UnknownAction {
            state: format!("{s:?}"),
            action: format!("{a:?}"),
        }
    }
}
