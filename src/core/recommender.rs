//! Recommendation context: corpus plus query encoder, built once at startup

use anyhow::{bail, Result};
use std::sync::Arc;

use crate::core::{rank, RecommendParams, Recommendation};
use crate::error::RecommendError;
use crate::models::QueryEncoder;
use crate::storage::Corpus;

/// Read-only after construction; clone the `Arc`s to share across requests.
#[derive(Clone)]
pub struct Recommender {
	corpus: Arc<Corpus>,
	encoder: Arc<dyn QueryEncoder>,
}

impl Recommender {
	pub fn new(corpus: Arc<Corpus>, encoder: Arc<dyn QueryEncoder>) -> Result<Self> {
		if !corpus.is_empty() && encoder.dimension() != corpus.dimension() {
			bail!(
				"Model produces {}-dim embeddings but the corpus stores {}-dim embeddings",
				encoder.dimension(),
				corpus.dimension()
			);
		}
		Ok(Self { corpus, encoder })
	}

	pub fn corpus(&self) -> &Corpus {
		&self.corpus
	}

	pub fn encoder(&self) -> &dyn QueryEncoder {
		self.encoder.as_ref()
	}

	/// `None` when the prompt is empty: nothing is encoded or ranked.
	pub fn recommend(&self, params: &RecommendParams) -> Result<Option<Vec<Recommendation>>, RecommendError> {
		if !params.has_prompt() {
			return Ok(None);
		}

		let query = self
			.encoder
			.encode(&params.prompt)
			.map_err(|e| RecommendError::Encode(format!("{:#}", e)))?;

		let ranked = rank(&query, &self.corpus, params.top_k, params.n_recs)?;

		Ok(Some(
			ranked
				.into_iter()
				.map(|c| Recommendation::new(c.record, c.score))
				.collect(),
		))
	}
}

impl std::fmt::Debug for Recommender {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Recommender")
			.field("songs", &self.corpus.len())
			.field("dimension", &self.corpus.dimension())
			.field("model", &self.encoder.name())
			.finish()
	}
}
