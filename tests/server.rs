//! Integration tests for the HTTP interface.
//!
//! A keyword encoder stands in for the ONNX model so the router can be
//! exercised without model files.

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use ndarray::arr2;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use moodrec::core::{Recommender, SongRecord};
use moodrec::models::QueryEncoder;
use moodrec::server::{create_router, AppState};
use moodrec::storage::Corpus;

/// "sunny" → [1, 0], "stormy" → [0, 1], "explode" fails, anything else → [1, 1]
struct KeywordEncoder;

impl QueryEncoder for KeywordEncoder {
	fn name(&self) -> &str {
		"keyword"
	}

	fn dimension(&self) -> usize {
		2
	}

	fn encode(&self, text: &str) -> Result<Vec<f32>> {
		if text.contains("explode") {
			anyhow::bail!("model crashed");
		}
		Ok(if text.contains("sunny") {
			vec![1.0, 0.0]
		} else if text.contains("stormy") {
			vec![0.0, 1.0]
		} else {
			vec![1.0, 1.0]
		})
	}
}

fn app() -> Router {
	let records = vec![
		SongRecord::new("A", "X", "pop"),
		SongRecord::new("B", "Y", "rock"),
		SongRecord::new("A", "X", "pop"),
	];
	let corpus = Corpus::from_parts(records, arr2(&[[1.0, 0.0], [0.0, 1.0], [1.0, 0.0]])).unwrap();
	let recommender = Recommender::new(Arc::new(corpus), Arc::new(KeywordEncoder)).unwrap();
	create_router(AppState::new(recommender))
}

async fn send(request: Request<Body>) -> (StatusCode, String) {
	send_to(app(), request).await
}

async fn send_to(router: Router, request: Request<Body>) -> (StatusCode, String) {
	let response = router.oneshot(request).await.unwrap();
	let status = response.status();
	let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
	(status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post_form(body: &str) -> (StatusCode, String) {
	let request = Request::post("/recommend")
		.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
		.body(Body::from(body.to_string()))
		.unwrap();
	send(request).await
}

async fn post_json(body: Value) -> (StatusCode, Value) {
	post_json_to(app(), body).await
}

async fn post_json_to(router: Router, body: Value) -> (StatusCode, Value) {
	let request = Request::post("/api/recommend")
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from(body.to_string()))
		.unwrap();
	let (status, text) = send_to(router, request).await;
	(status, serde_json::from_str(&text).unwrap())
}

#[tokio::test]
async fn test_index_serves_form() {
	let (status, body) = send(Request::get("/").body(Body::empty()).unwrap()).await;

	assert_eq!(status, StatusCode::OK);
	assert!(body.contains("name=\"prompt\""));
	assert!(body.contains("name=\"n_recs\""));
	assert!(body.contains("name=\"top_k\""));
}

#[tokio::test]
async fn test_form_recommendations_are_deduplicated() {
	let (status, body) = post_form("prompt=sunny+day&n_recs=5&top_k=10").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body.matches("<li>A by X (pop)</li>").count(), 1);
	let a = body.find("<li>A by X (pop)</li>").unwrap();
	let b = body.find("<li>B by Y (rock)</li>").unwrap();
	assert!(a < b);
	assert!(body.contains("sunny day"));
}

#[tokio::test]
async fn test_form_defaults_when_counts_missing() {
	let (status, body) = post_form("prompt=stormy").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body.matches("<li>").count(), 2);
}

#[tokio::test]
async fn test_form_empty_prompt_shows_no_list() {
	let (status, body) = post_form("prompt=+++&n_recs=5").await;

	assert_eq!(status, StatusCode::OK);
	assert!(!body.contains("<ol>"));
}

#[tokio::test]
async fn test_form_rejects_malformed_counts() {
	let (status, body) = post_form("prompt=sunny&n_recs=five").await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert!(body.contains("n_recs"));

	let (status, _) = post_form("prompt=sunny&top_k=0").await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_json_recommendations() {
	let (status, body) = post_json(serde_json::json!({ "prompt": "stormy", "n_recs": 1 })).await;

	assert_eq!(status, StatusCode::OK);
	let recs = body["recommendations"].as_array().unwrap();
	assert_eq!(recs.len(), 1);
	assert_eq!(recs[0]["track_name"], "B");
	assert_eq!(recs[0]["label"], "B by Y (rock)");
	assert_eq!(recs[0]["score"], 1.0);
}

#[tokio::test]
async fn test_json_empty_prompt_returns_null() {
	let (status, body) = post_json(serde_json::json!({ "prompt": "" })).await;

	assert_eq!(status, StatusCode::OK);
	assert!(body["recommendations"].is_null());
}

#[tokio::test]
async fn test_json_rejects_negative_counts() {
	let (status, body) = post_json(serde_json::json!({ "prompt": "sunny", "top_k": -3 })).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error"]["code"], "INVALID_PARAMETER");
}

#[tokio::test]
async fn test_json_rejects_malformed_counts() {
	let (status, body) = post_json(serde_json::json!({ "prompt": "sunny", "n_recs": "five" })).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error"]["code"], "INVALID_PARAMETER");
	assert!(body["error"]["message"].as_str().unwrap().contains("n_recs"));

	let (status, body) = post_json(serde_json::json!({ "prompt": "sunny", "top_k": 2.5 })).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error"]["code"], "INVALID_PARAMETER");
	assert!(body["error"]["message"].as_str().unwrap().contains("top_k"));
}

#[tokio::test]
async fn test_json_accepts_numeric_string_counts() {
	let (status, body) = post_json(serde_json::json!({ "prompt": "stormy", "n_recs": "1", "top_k": null })).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["recommendations"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_json_broken_body_is_structured_error() {
	let request = Request::post("/api/recommend")
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from("{\"prompt\": "))
		.unwrap();
	let (status, text) = send(request).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	let body: Value = serde_json::from_str(&text).unwrap();
	assert_eq!(body["error"]["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_form_wrong_content_type_renders_error_page() {
	let request = Request::post("/recommend")
		.header(header::CONTENT_TYPE, "text/plain")
		.body(Body::from("prompt=sunny"))
		.unwrap();
	let (status, body) = send(request).await;

	assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
	assert!(body.contains("<html"));
}

#[tokio::test]
async fn test_encoder_failure_is_reported_not_fatal() {
	let router = app();

	let (status, body) = post_json_to(router.clone(), serde_json::json!({ "prompt": "explode" })).await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body["error"]["code"], "ENCODE_FAILED");

	// The same router keeps answering
	let (status, _) = post_json_to(router, serde_json::json!({ "prompt": "sunny" })).await;
	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_reports_corpus() {
	let (status, text) = send(Request::get("/health").body(Body::empty()).unwrap()).await;

	assert_eq!(status, StatusCode::OK);
	let body: Value = serde_json::from_str(&text).unwrap();
	assert_eq!(body["status"], "ok");
	assert_eq!(body["songs"], 3);
	assert_eq!(body["dimension"], 2);
	assert_eq!(body["model"], "keyword");
}
