//! In-memory song corpus aligned with its embedding matrix

use ndarray::{Array2, ArrayView1};
use std::path::Path;

use crate::core::SongRecord;
use crate::error::LoadError;
use crate::storage::npy::{self, NpyError};
use crate::ui;

#[derive(Debug, Clone)]
pub struct Corpus {
	records: Vec<SongRecord>,
	embeddings: Array2<f32>,
}

impl Corpus {
	/// Loads the records CSV and the `.npy` embeddings. Row `i` of the
	/// matrix is the embedding of record `i`.
	pub fn load(records_path: &Path, embeddings_path: &Path) -> Result<Self, LoadError> {
		if !embeddings_path.exists() {
			return Err(LoadError::ResourceMissing {
				what: "Embeddings file",
				path: embeddings_path.to_path_buf(),
			});
		}

		let records = load_records(records_path)?;
		ui::debug(&format!("Read {} records from {}", records.len(), records_path.display()));

		let embeddings = npy::read_matrix(embeddings_path).map_err(|e| match e {
			NpyError::Io(source) => LoadError::Io {
				path: embeddings_path.to_path_buf(),
				source,
			},
			NpyError::Format(reason) => LoadError::Embeddings {
				path: embeddings_path.to_path_buf(),
				reason,
			},
		})?;
		ui::debug(&format!(
			"Read {}x{} embedding matrix from {}",
			embeddings.nrows(),
			embeddings.ncols(),
			embeddings_path.display()
		));

		Self::from_parts(records, embeddings)
	}

	pub fn from_parts(records: Vec<SongRecord>, embeddings: Array2<f32>) -> Result<Self, LoadError> {
		if records.len() != embeddings.nrows() {
			return Err(LoadError::LengthMismatch {
				records: records.len(),
				embeddings: embeddings.nrows(),
			});
		}
		Ok(Self { records, embeddings })
	}

	pub fn records(&self) -> &[SongRecord] {
		&self.records
	}

	pub fn embedding_at(&self, index: usize) -> Option<ArrayView1<'_, f32>> {
		(index < self.records.len()).then(|| self.embeddings.row(index))
	}

	/// Records paired with their embeddings, in corpus order
	pub fn iter(&self) -> impl Iterator<Item = (&SongRecord, ArrayView1<'_, f32>)> {
		self.records.iter().zip(self.embeddings.rows())
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn dimension(&self) -> usize {
		self.embeddings.ncols()
	}

	/// Number of distinct (track_name, track_artist) pairs
	pub fn distinct_songs(&self) -> usize {
		self.records
			.iter()
			.map(SongRecord::key)
			.collect::<std::collections::HashSet<_>>()
			.len()
	}
}

/// Reads the records CSV. Columns other than track_name, track_artist and
/// playlist_genre are ignored.
pub fn load_records(path: &Path) -> Result<Vec<SongRecord>, LoadError> {
	if !path.exists() {
		return Err(LoadError::ResourceMissing {
			what: "Records file",
			path: path.to_path_buf(),
		});
	}

	let to_error = |source: csv::Error| LoadError::Records {
		path: path.to_path_buf(),
		source,
	};

	let mut reader = csv::Reader::from_path(path).map_err(to_error)?;
	reader
		.deserialize::<SongRecord>()
		.collect::<Result<Vec<_>, _>>()
		.map_err(to_error)
}
