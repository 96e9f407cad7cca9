//! Similarity ranking over the whole corpus

use std::collections::HashSet;

use crate::core::similarity::cosine_similarity;
use crate::core::SongRecord;
use crate::error::RecommendError;
use crate::storage::Corpus;
use ndarray::ArrayView1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate<'a> {
	pub record: &'a SongRecord,
	pub score: f32,
}

/// Scores every record against `query`, then sorts, deduplicates by
/// (track_name, track_artist) and truncates to `min(top_k, n_results)`.
///
/// Ties keep corpus order, so the output is fully determined by the inputs.
pub fn rank<'a>(
	query: &[f32],
	corpus: &'a Corpus,
	top_k: usize,
	n_results: usize,
) -> Result<Vec<ScoredCandidate<'a>>, RecommendError> {
	if query.len() != corpus.dimension() {
		return Err(RecommendError::DimensionMismatch {
			expected: corpus.dimension(),
			actual: query.len(),
		});
	}

	let limit = top_k.min(n_results);
	if limit == 0 {
		return Ok(Vec::new());
	}

	let query = ArrayView1::from(query);
	let mut candidates: Vec<ScoredCandidate<'a>> = corpus
		.iter()
		.map(|(record, embedding)| ScoredCandidate {
			record,
			score: cosine_similarity(query, embedding),
		})
		.collect();

	// sort_by is stable
	candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

	let mut seen = HashSet::new();
	let ranked = candidates
		.into_iter()
		.filter(|c| seen.insert(c.record.key()))
		.take(limit)
		.collect();

	Ok(ranked)
}

#[cfg(test)]
mod tests {
	use super::*;
	use ndarray::{arr2, Array2};

	fn corpus(songs: &[(&str, &str, &str)], embeddings: Array2<f32>) -> Corpus {
		let records = songs
			.iter()
			.map(|(name, artist, genre)| SongRecord::new(*name, *artist, *genre))
			.collect();
		Corpus::from_parts(records, embeddings).unwrap()
	}

	fn labels(ranked: &[ScoredCandidate]) -> Vec<String> {
		ranked.iter().map(|c| c.record.label()).collect()
	}

	#[test]
	fn duplicate_pair_is_dropped() {
		let corpus = corpus(
			&[("A", "X", "pop"), ("B", "Y", "rock"), ("A", "X", "pop")],
			arr2(&[[1.0, 0.0], [0.0, 1.0], [1.0, 0.0]]),
		);

		let ranked = rank(&[1.0, 0.0], &corpus, 10, 5).unwrap();

		assert_eq!(labels(&ranked), vec!["A by X (pop)", "B by Y (rock)"]);
		assert_eq!(ranked[0].score, 1.0);
		assert_eq!(ranked[1].score, 0.0);
		// First occurrence survives
		assert!(std::ptr::eq(ranked[0].record, &corpus.records()[0]));
	}

	#[test]
	fn dedup_keeps_highest_scoring_copy() {
		let corpus = corpus(
			&[("A", "X", "pop"), ("B", "Y", "rock"), ("A", "X", "latin")],
			arr2(&[[0.0, 1.0], [1.0, 1.0], [1.0, 0.0]]),
		);

		let ranked = rank(&[1.0, 0.0], &corpus, 10, 10).unwrap();

		assert_eq!(labels(&ranked), vec!["A by X (latin)", "B by Y (rock)"]);
	}

	#[test]
	fn ties_keep_corpus_order() {
		let corpus = corpus(
			&[("C", "Z", "edm"), ("A", "X", "pop"), ("B", "Y", "rock")],
			arr2(&[[1.0, 0.0], [2.0, 0.0], [3.0, 0.0]]),
		);

		let ranked = rank(&[1.0, 0.0], &corpus, 10, 10).unwrap();

		assert_eq!(labels(&ranked), vec!["C by Z (edm)", "A by X (pop)", "B by Y (rock)"]);
	}

	#[test]
	fn output_length_is_smallest_bound() {
		let corpus = corpus(
			&[
				("A", "X", "pop"),
				("B", "Y", "rock"),
				("C", "Z", "edm"),
				("A", "X", "pop"),
				("D", "W", "rap"),
			],
			arr2(&[[1.0, 0.0], [0.8, 0.2], [0.5, 0.5], [1.0, 0.0], [0.0, 1.0]]),
		);
		let query = [1.0, 0.1];

		assert_eq!(rank(&query, &corpus, 10, 10).unwrap().len(), 4);
		assert_eq!(rank(&query, &corpus, 2, 10).unwrap().len(), 2);
		assert_eq!(rank(&query, &corpus, 10, 3).unwrap().len(), 3);
		assert_eq!(rank(&query, &corpus, 3, 1).unwrap().len(), 1);
	}

	#[test]
	fn zero_results_is_empty() {
		let corpus = corpus(&[("A", "X", "pop")], arr2(&[[1.0, 0.0]]));
		assert!(rank(&[1.0, 0.0], &corpus, 10, 0).unwrap().is_empty());
		assert!(rank(&[1.0, 0.0], &corpus, 0, 5).unwrap().is_empty());
	}

	#[test]
	fn wrong_dimension_is_rejected() {
		let corpus = corpus(&[("A", "X", "pop")], arr2(&[[1.0, 0.0]]));
		let err = rank(&[1.0, 0.0, 0.0], &corpus, 10, 5).unwrap_err();
		assert_eq!(err, RecommendError::DimensionMismatch { expected: 2, actual: 3 });
	}

	#[test]
	fn zero_norm_rows_score_zero() {
		let corpus = corpus(
			&[("Silent", "Nobody", "ambient"), ("A", "X", "pop")],
			arr2(&[[0.0, 0.0], [-1.0, 0.0]]),
		);

		let ranked = rank(&[1.0, 0.0], &corpus, 10, 10).unwrap();

		assert_eq!(ranked[0].record.track_name, "Silent");
		assert_eq!(ranked[0].score, 0.0);
		assert_eq!(ranked[1].score, -1.0);
	}

	#[test]
	fn ranking_is_repeatable() {
		let corpus = corpus(
			&[("A", "X", "pop"), ("B", "Y", "rock"), ("C", "Z", "edm"), ("D", "W", "rap")],
			arr2(&[[0.3, 0.7], [0.7, 0.3], [0.3, 0.7], [0.5, 0.5]]),
		);

		let first = rank(&[0.6, 0.4], &corpus, 10, 10).unwrap();
		let second = rank(&[0.6, 0.4], &corpus, 10, 10).unwrap();

		assert_eq!(first, second);
	}
}
