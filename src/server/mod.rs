//! HTTP server setup and routing.

mod error;
mod render;
mod routes;

use axum::{
	routing::{get, post},
	Router,
};
use std::sync::Arc;
use std::time::Instant;

use crate::core::Recommender;

pub use error::{ApiError, PageError};

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
	pub recommender: Arc<Recommender>,
	/// Server start time for uptime calculation
	pub started_at: Instant,
}

impl AppState {
	pub fn new(recommender: Recommender) -> Self {
		Self {
			recommender: Arc::new(recommender),
			started_at: Instant::now(),
		}
	}
}

pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/", get(routes::index))
		.route("/recommend", post(routes::recommend_form))
		.route("/api/recommend", post(routes::recommend_json))
		.route("/health", get(routes::health))
		.with_state(state)
}

/// Binds and serves until Ctrl-C
pub async fn serve(state: AppState, addr: &str) -> anyhow::Result<()> {
	let listener = tokio::net::TcpListener::bind(addr)
		.await
		.map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", addr, e))?;

	crate::ui::success(&format!("Listening on http://{}", listener.local_addr()?));

	axum::serve(listener, create_router(state))
		.with_graceful_shutdown(shutdown_signal())
		.await?;

	crate::ui::info("Server stopped");
	Ok(())
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		crate::ui::error(&format!("Failed to listen for Ctrl-C: {}", e));
		std::future::pending::<()>().await;
	}
	crate::ui::info("Shutting down...");
}
