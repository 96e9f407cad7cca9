//! Index command - precompute song embeddings

use anyhow::{Context, Result};
use ndarray::Array2;
use std::path::Path;
use std::time::Instant;

use crate::config;
use crate::models::{QueryEncoder, TextModel};
use crate::storage::{self, npy};
use crate::ui;

const PROGRESS_EVERY: usize = 500;

pub fn run(output: Option<&Path>, force: bool) -> Result<()> {
	let start = Instant::now();
	let records_path = config::records_path();
	let output = output.map(Path::to_path_buf).unwrap_or_else(config::embeddings_path);

	if output.exists() && !force {
		ui::warn(&format!(
			"{} already exists. Use --force to rebuild it.",
			ui::path_link(&output, 60)
		));
		return Ok(());
	}

	ui::info(&format!("Reading records: {}", ui::path_link(&records_path, 60)));
	let records = storage::load_records(&records_path).context("Failed to read records")?;
	if records.is_empty() {
		anyhow::bail!("No records found in {}", records_path.display());
	}
	ui::success(&format!("Found {} songs", records.len()));

	ui::info(&format!("Loading embedding model ({})...", config::MODEL_NAME));
	let model = TextModel::from_models_dir()?;

	let descriptions: Vec<&str> = records.iter().map(|r| r.description.as_str()).collect();
	let matrix = encode_all(&model, &descriptions)?;

	npy::write_matrix(&output, &matrix)
		.with_context(|| format!("Failed to write {}", output.display()))?;

	println!();
	ui::success(&format!(
		"Wrote {}x{} embeddings to {} in {:.1}s",
		matrix.nrows(),
		matrix.ncols(),
		ui::path_link(&output, 60),
		start.elapsed().as_secs_f32()
	));

	Ok(())
}

/// Row `i` of the result is the embedding of `texts[i]`. Any failure aborts,
/// since a skipped row would misalign the corpus.
pub fn encode_all(encoder: &dyn QueryEncoder, texts: &[&str]) -> Result<Array2<f32>> {
	let total = texts.len();
	let dim = encoder.dimension();
	let mut matrix = Array2::<f32>::zeros((total, dim));

	for (i, (text, mut row)) in texts.iter().zip(matrix.rows_mut()).enumerate() {
		let embedding = encoder
			.encode(text)
			.with_context(|| format!("Failed to encode record {}: \"{}\"", i, text))?;

		if embedding.len() != dim {
			anyhow::bail!(
				"Record {} encoded to {} dimensions, expected {}",
				i,
				embedding.len(),
				dim
			);
		}
		row.assign(&ndarray::ArrayView1::from(embedding.as_slice()));

		if (i + 1) % PROGRESS_EVERY == 0 || i + 1 == total {
			ui::progress(i + 1, total, "Encoding songs");
		}
	}

	Ok(matrix)
}
