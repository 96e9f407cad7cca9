//! Info command - corpus and model summary

use anyhow::Result;
use colored::*;
use std::path::Path;

use crate::config;
use crate::storage::Corpus;
use crate::ui;

pub fn run() -> Result<()> {
	let records_path = config::records_path();
	let embeddings_path = config::embeddings_path();

	ui::header("Data");
	print_path("Records", &records_path);
	print_path("Embeddings", &embeddings_path);

	ui::header("Model");
	println!("  {} {}", "Name:".bright_blue(), config::MODEL_NAME);
	match config::models_dir() {
		Some(dir) => {
			print_path("Directory", &dir);
			print_path("Model", &dir.join(config::TEXT_MODEL));
			print_path("Tokenizer", &dir.join(config::TOKENIZER));
		}
		None => println!("  {} {}", "Directory:".bright_blue(), "not found".red()),
	}

	ui::header("Corpus");
	match Corpus::load(&records_path, &embeddings_path) {
		Ok(corpus) => {
			println!("  {} {}", "Songs:".bright_blue(), corpus.len());
			println!("  {} {}", "Distinct:".bright_blue(), corpus.distinct_songs());
			println!("  {} {}", "Dimension:".bright_blue(), corpus.dimension());
			if let Some(message) = dimension_warning(corpus.dimension(), corpus.is_empty()) {
				ui::warn(&message);
			}
		}
		Err(e) => ui::error(&e.to_string()),
	}

	println!();
	Ok(())
}

/// serve, recommend and repl refuse to start when the model and corpus disagree
fn dimension_warning(corpus_dim: usize, empty: bool) -> Option<String> {
	if empty || corpus_dim == config::EMBEDDING_DIM {
		return None;
	}
	Some(format!(
		"Corpus stores {}-dim embeddings but {} produces {}; serve, recommend and repl will refuse to start. Rebuild with `moodrec index --force`",
		corpus_dim,
		config::MODEL_NAME,
		config::EMBEDDING_DIM
	))
}

fn print_path(label: &str, path: &Path) {
	let status = if path.exists() { "✓".bright_green() } else { "✗".bright_red() };
	println!(
		"  {} {} {}",
		format!("{}:", label).bright_blue(),
		ui::path_link(path, 70),
		status
	);
}
