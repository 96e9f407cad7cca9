//! # Command Implementations
//!
//! Each submodule handles one CLI command (serve, recommend, repl, etc.).

pub mod index;
pub mod info;
pub mod recommend;
pub mod repl;
pub mod serve;

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Instant;

use crate::config;
use crate::core::Recommender;
use crate::models::TextModel;
use crate::storage::Corpus;
use crate::ui;

/// Loads corpus and model once; every command that ranks starts here.
pub fn load_recommender() -> Result<Recommender> {
	let records_path = config::records_path();
	let embeddings_path = config::embeddings_path();

	ui::info("Loading dataset...");
	let start = Instant::now();
	let corpus = Corpus::load(&records_path, &embeddings_path).context("Failed to load corpus")?;
	ui::success(&format!(
		"Loaded {} songs ({}-dim embeddings) in {:.2}s",
		corpus.len(),
		corpus.dimension(),
		start.elapsed().as_secs_f32()
	));

	if corpus.is_empty() {
		ui::warn("Corpus is empty, every query will return nothing");
	}

	ui::info(&format!("Loading embedding model ({})...", config::MODEL_NAME));
	let start = Instant::now();
	let model = TextModel::from_models_dir()?;
	ui::success(&format!("Model ready in {:.2}s", start.elapsed().as_secs_f32()));

	Recommender::new(Arc::new(corpus), Arc::new(model))
}
