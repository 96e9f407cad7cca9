//! Error types for corpus loading and per-request recommendation

use std::path::PathBuf;
use thiserror::Error;

/// Startup failures while loading the corpus. All of these are fatal.
#[derive(Debug, Error)]
pub enum LoadError {
	#[error("{what} not found: {}", path.display())]
	ResourceMissing { what: &'static str, path: PathBuf },

	#[error("Failed to read {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Malformed records file {}: {source}", path.display())]
	Records {
		path: PathBuf,
		#[source]
		source: csv::Error,
	},

	#[error("Malformed embeddings file {}: {reason}", path.display())]
	Embeddings { path: PathBuf, reason: String },

	#[error("Corpus has {records} records but {embeddings} embeddings")]
	LengthMismatch { records: usize, embeddings: usize },
}

/// Request-level failures. These are reported to the caller, never fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendError {
	#[error("Invalid parameter '{name}': {reason}")]
	InvalidParameter { name: &'static str, reason: String },

	#[error("Query embedding has {actual} dimensions, corpus expects {expected}")]
	DimensionMismatch { expected: usize, actual: usize },

	#[error("Failed to encode query: {0}")]
	Encode(String),
}

impl RecommendError {
	pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
		Self::InvalidParameter { name, reason: reason.into() }
	}

	/// Machine-readable code used in API error bodies
	pub fn code(&self) -> &'static str {
		match self {
			Self::InvalidParameter { .. } => "INVALID_PARAMETER",
			Self::DimensionMismatch { .. } => "DIMENSION_MISMATCH",
			Self::Encode(_) => "ENCODE_FAILED",
		}
	}

	pub fn is_client_error(&self) -> bool {
		matches!(self, Self::InvalidParameter { .. })
	}
}
