//! Recommend command - one-shot mood query

use anyhow::Result;
use colored::*;
use std::time::Instant;

use crate::core::{RecommendParams, Recommendation, Recommender};
use crate::ui;

pub fn run(prompt: &str, n_recs: usize, top_k: usize) -> Result<()> {
	let params = RecommendParams::new(prompt, n_recs, top_k);
	if !params.has_prompt() {
		ui::warn("Empty mood, nothing to recommend");
		return Ok(());
	}

	let recommender = super::load_recommender()?;
	query(&recommender, &params)?;
	Ok(())
}

/// Runs one query and prints the results; shared with the REPL.
pub fn query(recommender: &Recommender, params: &RecommendParams) -> Result<usize> {
	let start = Instant::now();
	ui::info(&format!("Recommending for: \"{}\"", params.prompt));

	let Some(recs) = recommender.recommend(params)? else {
		return Ok(0);
	};

	if recs.is_empty() {
		ui::warn("No songs found");
		return Ok(0);
	}

	ui::header("Recommendations");
	print_results(&recs);
	println!();
	ui::success(&format!("Found {} songs in {}ms", recs.len(), start.elapsed().as_millis()));

	Ok(recs.len())
}

pub fn print_results(recs: &[Recommendation]) {
	for (i, rec) in recs.iter().enumerate() {
		let percentage = (rec.score * 100.0).round() as i32;
		println!(
			"{}. {} {} {} {}",
			format!("{:2}", i + 1).bright_blue().bold(),
			rec.track_name.bright_white().bold(),
			format!("by {}", rec.track_artist).white(),
			format!("({})", rec.playlist_genre).bright_magenta(),
			format!("{}%", percentage).dimmed(),
		);
	}
}
