//! Query encoder seam

use anyhow::Result;

/// Anything that turns text into a fixed-length embedding.
///
/// Implementations must be deterministic for a fixed model and return
/// vectors of exactly `dimension()` floats.
pub trait QueryEncoder: Send + Sync {
	/// Model identifier shown in logs and `/health`
	fn name(&self) -> &str;

	fn dimension(&self) -> usize;

	fn encode(&self, text: &str) -> Result<Vec<f32>>;
}
