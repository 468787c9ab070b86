//! Error types for graph construction and data loading.

use thiserror::Error;

/// Failures that stop a graph from being built.
///
/// Per-field data gaps (missing amounts, unknown category columns, zero or
/// negative values) are not errors; they only omit links.
#[derive(Error, Debug)]
pub enum GraphError {
	/// The positional row partition needs at least the revenue block.
	#[error("expected at least {expected} rows, found {found}")]
	TooFewRows { expected: usize, found: usize },

	/// Two rows normalize to the same node name.
	#[error("duplicate node name: {0}")]
	DuplicateNode(String),

	/// The input document has no table under the requested key.
	#[error("dataset not found in document: {0}")]
	MissingDataset(String),

	/// The input document could not be parsed.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}
