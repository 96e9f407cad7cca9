//! Route handlers

use axum::{
	extract::{
		rejection::{FormRejection, JsonRejection},
		State,
	},
	response::Html,
	Form, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

use crate::core::{RecommendParams, Recommendation};

use super::error::{ApiError, PageError};
use super::render;
use super::AppState;

/// Raw form fields; counts stay strings so malformed input becomes a 400
/// with a useful message instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct RecommendForm {
	pub prompt: Option<String>,
	pub n_recs: Option<String>,
	pub top_k: Option<String>,
}

/// Counts are kept as raw JSON so a string or fractional value is reported
/// as an invalid parameter rather than a body decoding failure.
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
	#[serde(default)]
	pub prompt: String,
	pub n_recs: Option<Value>,
	pub top_k: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
	pub prompt: String,
	pub recommendations: Option<Vec<Recommendation>>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
	pub status: &'static str,
	pub songs: usize,
	pub dimension: usize,
	pub model: String,
	pub uptime_secs: u64,
}

/// GET /
pub async fn index() -> Html<String> {
	Html(render::index_page())
}

/// POST /recommend
pub async fn recommend_form(
	State(state): State<AppState>,
	form: Result<Form<RecommendForm>, FormRejection>,
) -> Result<Html<String>, PageError> {
	let Form(form) = form?;
	let params = RecommendParams::parse(form.prompt.as_deref(), form.n_recs.as_deref(), form.top_k.as_deref())?;
	let recommendations = run(&state, params.clone()).await?;

	Ok(Html(render::results_page(&params.prompt, recommendations.as_deref())))
}

/// POST /api/recommend
pub async fn recommend_json(
	State(state): State<AppState>,
	req: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendResponse>, ApiError> {
	let Json(req) = req?;
	let params = RecommendParams::from_json(&req.prompt, req.n_recs.as_ref(), req.top_k.as_ref())?;
	let recommendations = run(&state, params.clone()).await?;

	Ok(Json(RecommendResponse {
		prompt: params.prompt,
		recommendations,
	}))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
	let recommender = &state.recommender;
	Json(HealthResponse {
		status: "ok",
		songs: recommender.corpus().len(),
		dimension: recommender.corpus().dimension(),
		model: recommender.encoder().name().to_string(),
		uptime_secs: state.started_at.elapsed().as_secs(),
	})
}

/// Encoding and the corpus scan are CPU-bound, so they run off the async workers.
async fn run(state: &AppState, params: RecommendParams) -> Result<Option<Vec<Recommendation>>, ApiError> {
	if !params.has_prompt() {
		return Ok(None);
	}

	crate::ui::debug(&format!(
		"Recommending for mood: \"{}\" | top_k={}, n_recs={}",
		params.prompt, params.top_k, params.n_recs
	));

	let recommender = state.recommender.clone();
	let start = Instant::now();
	let result = tokio::task::spawn_blocking(move || recommender.recommend(&params))
		.await
		.map_err(|e| ApiError::Internal(format!("Recommendation task failed: {}", e)))??;

	if let Some(recs) = &result {
		crate::ui::debug(&format!("Returned {} songs in {}ms", recs.len(), start.elapsed().as_millis()));
	}

	Ok(result)
}
