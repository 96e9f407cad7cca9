//! REPL mode - interactive mood session

use anyhow::Result;
use colored::Colorize;
use std::io::{self, Write};

use crate::core::RecommendParams;
use crate::ui;

pub fn run(n_recs: usize, top_k: usize) -> Result<()> {
	// Load corpus and model once
	let recommender = super::load_recommender()?;

	let mut n_recs = n_recs;
	let mut top_k = top_k;

	println!();
	ui::info("Starting interactive mode");
	ui::info("Describe your mood, or 'exit' to quit");
	println!();

	loop {
		print!("{} ", "mood>".bright_magenta().bold());
		io::stdout().flush()?;

		let mut input = String::new();
		if io::stdin().read_line(&mut input)? == 0 {
			break;
		}

		let line = input.trim();

		if line.is_empty() {
			continue;
		}

		if line == "exit" || line == "quit" || line == "q" {
			ui::info("Goodbye!");
			break;
		}

		if line == "help" {
			show_help();
			continue;
		}

		if let Some(setting) = line.strip_prefix(':') {
			match apply_setting(setting, &mut n_recs, &mut top_k) {
				Ok(()) => ui::success(&format!("n_recs={}, top_k={}", n_recs, top_k)),
				Err(e) => ui::error(&e.to_string()),
			}
			continue;
		}

		let params = RecommendParams::new(line, n_recs, top_k);
		if let Err(e) = super::recommend::query(&recommender, &params) {
			ui::error(&format!("Recommendation failed: {}", e));
		}

		println!();
	}

	Ok(())
}

/// ":n 5" sets result count, ":k 20" sets candidate pool
fn apply_setting(setting: &str, n_recs: &mut usize, top_k: &mut usize) -> Result<()> {
	let mut parts = setting.split_whitespace();
	let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
		anyhow::bail!("Usage: :n <count> or :k <count>");
	};

	let params = match key {
		"n" => RecommendParams::parse(None, Some(value), None)?,
		"k" => RecommendParams::parse(None, None, Some(value))?,
		other => anyhow::bail!("Unknown setting ':{}'", other),
	};

	match key {
		"n" => *n_recs = params.n_recs,
		_ => *top_k = params.top_k,
	}
	Ok(())
}

fn show_help() {
	println!("{}", "REPL Commands:".bright_blue().bold());
	println!("  {}      Describe a mood", "<text>".dimmed());
	println!("  {}  Number of songs to show", ":n <count>".dimmed());
	println!("  {}  Candidate pool size", ":k <count>".dimmed());
	println!("  {}        Show this help message", "help".dimmed());
	println!("  {}        Exit REPL mode", "exit".dimmed());
}
