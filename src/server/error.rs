use axum::{
	extract::rejection::{FormRejection, JsonRejection},
	http::StatusCode,
	response::{Html, IntoResponse, Response},
	Json,
};
use serde::Serialize;

use crate::error::RecommendError;

/// Failures surfaced by HTTP handlers
#[derive(Debug)]
pub enum ApiError {
	Recommend(RecommendError),
	/// Body could not be read or decoded
	Rejected { status: StatusCode, message: String },
	Internal(String),
}

impl From<RecommendError> for ApiError {
	fn from(e: RecommendError) -> Self {
		Self::Recommend(e)
	}
}

impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		Self::rejected(rejection.status(), rejection.body_text())
	}
}

impl From<FormRejection> for ApiError {
	fn from(rejection: FormRejection) -> Self {
		Self::rejected(rejection.status(), rejection.body_text())
	}
}

impl ApiError {
	/// Unsupported content types keep their 415; every other malformed body is a 400.
	fn rejected(status: StatusCode, message: String) -> Self {
		let status = if status == StatusCode::UNSUPPORTED_MEDIA_TYPE {
			status
		} else {
			StatusCode::BAD_REQUEST
		};
		Self::Rejected { status, message }
	}

	pub fn status_code(&self) -> StatusCode {
		match self {
			Self::Recommend(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
			Self::Rejected { status, .. } => *status,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	pub fn code(&self) -> &'static str {
		match self {
			Self::Recommend(e) => e.code(),
			Self::Rejected { .. } => "INVALID_REQUEST",
			Self::Internal(_) => "INTERNAL_ERROR",
		}
	}

	pub fn message(&self) -> String {
		match self {
			Self::Recommend(e) => e.to_string(),
			Self::Rejected { message, .. } | Self::Internal(message) => message.clone(),
		}
	}
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
	pub code: &'static str,
	pub message: String,
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		log_failure(&self);
		let body = ErrorResponse {
			error: ErrorDetail {
				code: self.code(),
				message: self.message(),
			},
		};
		(self.status_code(), Json(body)).into_response()
	}
}

/// Same failures, rendered as an HTML page for the form routes
#[derive(Debug)]
pub struct PageError(pub ApiError);

impl From<ApiError> for PageError {
	fn from(e: ApiError) -> Self {
		Self(e)
	}
}

impl From<FormRejection> for PageError {
	fn from(rejection: FormRejection) -> Self {
		Self(ApiError::from(rejection))
	}
}

impl From<RecommendError> for PageError {
	fn from(e: RecommendError) -> Self {
		Self(ApiError::Recommend(e))
	}
}

impl IntoResponse for PageError {
	fn into_response(self) -> Response {
		log_failure(&self.0);
		let page = super::render::error_page(self.0.status_code(), &self.0.message());
		(self.0.status_code(), Html(page)).into_response()
	}
}

fn log_failure(error: &ApiError) {
	if error.status_code().is_server_error() {
		crate::ui::error(&error.message());
	} else {
		crate::ui::debug(&format!("Rejected request: {}", error.message()));
	}
}
