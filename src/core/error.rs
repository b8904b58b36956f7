//! Error taxonomy shared by every search component.
//!
//! All violations are fatal: they indicate a caller or game-model bug, not a
//! runtime condition to recover from, so they surface immediately at the
//! point of detection and propagate unchanged to the caller.

use thiserror::Error;

/// Errors raised by game models, agents, and searches.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A search was constructed against a game it cannot handle, or with a
    /// depth bound and heuristic supplied inconsistently.
    #[error("illegal configuration: {0}")]
    IllegalConfiguration(String),

    /// `result` or an agent produced an action outside the legal set for the
    /// state in question.
    #[error("illegal action: {0}")]
    IllegalAction(String),

    /// A search was invoked on a state that violates its preconditions, such
    /// as an already-terminal root or an empty legal-action set.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    /// A chance distribution failed validation where it was consumed.
    #[error("invalid chance distribution: {0}")]
    InvalidDistribution(String),
}

/// Result type for all fallible operations in this crate.
pub type Result<T> = std::result::Result<T, SearchError>;
