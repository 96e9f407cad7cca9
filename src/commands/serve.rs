//! Serve command - HTTP recommendation server

use anyhow::{Context, Result};

use crate::server::{self, AppState};
use crate::ui;

pub fn run(host: &str, port: u16) -> Result<()> {
	let recommender = super::load_recommender()?;
	ui::debug(&format!("{:?}", recommender));

	let addr = format!("{}:{}", host, port);
	let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;

	runtime.block_on(server::serve(AppState::new(recommender), &addr))
}
