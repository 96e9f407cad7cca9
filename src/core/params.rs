//! Validation of user-supplied recommendation parameters

use serde_json::Value;

use crate::config::{DEFAULT_N_RECS, DEFAULT_TOP_K};
use crate::error::RecommendError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendParams {
	/// Trimmed mood prompt; empty means "nothing to recommend"
	pub prompt: String,
	pub n_recs: usize,
	pub top_k: usize,
}

impl RecommendParams {
	pub fn new(prompt: &str, n_recs: usize, top_k: usize) -> Self {
		Self {
			prompt: prompt.trim().to_string(),
			n_recs,
			top_k,
		}
	}

	/// Parses raw form values. Missing or blank counts fall back to defaults.
	pub fn parse(
		prompt: Option<&str>,
		n_recs: Option<&str>,
		top_k: Option<&str>,
	) -> Result<Self, RecommendError> {
		Ok(Self::new(
			prompt.unwrap_or_default(),
			parse_count("n_recs", n_recs, DEFAULT_N_RECS)?,
			parse_count("top_k", top_k, DEFAULT_TOP_K)?,
		))
	}

	/// Validates counts from a JSON body. Integers and numeric strings are
	/// accepted; absent, null or blank counts fall back to defaults.
	pub fn from_json(
		prompt: &str,
		n_recs: Option<&Value>,
		top_k: Option<&Value>,
	) -> Result<Self, RecommendError> {
		Ok(Self::new(
			prompt,
			json_count("n_recs", n_recs, DEFAULT_N_RECS)?,
			json_count("top_k", top_k, DEFAULT_TOP_K)?,
		))
	}

	pub fn has_prompt(&self) -> bool {
		!self.prompt.is_empty()
	}
}

fn parse_count(name: &'static str, raw: Option<&str>, default: usize) -> Result<usize, RecommendError> {
	let raw = match raw.map(str::trim) {
		None | Some("") => return Ok(default),
		Some(raw) => raw,
	};

	let value: i64 = raw
		.parse()
		.map_err(|_| RecommendError::invalid(name, format!("'{}' is not a whole number", raw)))?;

	positive(name, value)
}

fn json_count(name: &'static str, raw: Option<&Value>, default: usize) -> Result<usize, RecommendError> {
	match raw {
		None | Some(Value::Null) => Ok(default),
		Some(Value::String(s)) => parse_count(name, Some(s.as_str()), default),
		Some(Value::Number(n)) => match n.as_i64() {
			Some(value) => positive(name, value),
			None => Err(RecommendError::invalid(name, format!("'{}' is not a whole number", n))),
		},
		Some(other) => Err(RecommendError::invalid(name, format!("expected a whole number, got {}", other))),
	}
}

fn positive(name: &'static str, value: i64) -> Result<usize, RecommendError> {
	if value <= 0 {
		return Err(RecommendError::invalid(name, format!("must be positive, got {}", value)));
	}
	usize::try_from(value).map_err(|_| RecommendError::invalid(name, format!("{} is too large", value)))
}
