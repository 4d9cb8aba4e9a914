//! Error type for this crate.
//!
//! Per §7, almost nothing in the decision core returns `Result`: precondition
//! failures, lost units and production jams are modeled as state transitions,
//! not exceptions. `CoreResult` is reserved for the true system boundary —
//! reading/writing the persisted opponent model (§6 "Persisted state").

use thiserror::Error;

/// Errors crossing the true system boundary (persistence, config loading).
#[derive(Debug, Error)]
pub enum CoreError {
	#[error("failed to read opponent model at {path}: {source}")]
	OpponentModelRead {
		path: String,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to write opponent model at {path}: {source}")]
	OpponentModelWrite {
		path: String,
		#[source]
		source: std::io::Error,
	},
	#[error("malformed opponent model line: {0:?}")]
	MalformedSkillLine(String),
}

/// Result alias used at the system boundary.
pub type CoreResult<T> = Result<T, CoreError>;
