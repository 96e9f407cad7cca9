//! moodrec - mood-based song recommendations
//!
//! Encodes a free-text mood with a sentence-transformer model and ranks a
//! song corpus by cosine similarity against precomputed embeddings.

use anyhow::Result;
use clap::Parser;

use moodrec::cli::{Cli, Command};
use moodrec::{commands, config, runtime, ui};

fn main() {
	if let Err(e) = run() {
		ui::error(&format!("{:#}", e));
		std::process::exit(1);
	}
}

fn run() -> Result<()> {
	let cli = Cli::parse();

	ui::Log::set_verbose(cli.verbose);
	runtime::set_provider(cli.provider);

	if let Some(path) = cli.records {
		config::set_records_path(path);
	}
	if let Some(path) = cli.embeddings {
		config::set_embeddings_path(path);
	}
	if let Some(path) = cli.models {
		config::set_model_dir(path);
	}

	match cli.command {
		Command::Serve { host, port } => {
			ui::print_logo();
			commands::serve::run(&host, port)
		}
		Command::Recommend { prompt, n_recs, top_k } => commands::recommend::run(&prompt, n_recs, top_k),
		Command::Repl { n_recs, top_k } => {
			ui::print_logo();
			commands::repl::run(n_recs, top_k)
		}
		Command::Index { output, force } => commands::index::run(output.as_deref(), force),
		Command::Info => commands::info::run(),
	}
}
