//! Sentence-transformer text model (MiniLM) for mood and song embeddings

use anyhow::{Context, Result};
use ndarray::ArrayView2;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::Mutex;
use tokenizers::{Tokenizer, TruncationParams};

use crate::config::{self, MAX_SEQUENCE_LENGTH, MODEL_NAME};
use crate::core::normalize;
use crate::models::QueryEncoder;
use crate::ui;

pub struct TextModel {
	session: Mutex<Session>,
	tokenizer: Tokenizer,
	dimension: usize,
}

impl TextModel {
	/// Loads `model.onnx` and `tokenizer.json` from the configured models directory
	pub fn from_models_dir() -> Result<Self> {
		let model_path = config::get_text_model_path().context(format!(
			"Models directory not found. Set --models or {} to a directory containing {}",
			config::MODELS_DIR_ENV,
			config::TEXT_MODEL
		))?;
		let tokenizer_path = config::get_tokenizer_path().context(format!(
			"Tokenizer not found. Ensure {} exists",
			config::TOKENIZER
		))?;

		if !model_path.exists() {
			anyhow::bail!("Text model file does not exist: {}", model_path.display());
		}
		if !tokenizer_path.exists() {
			anyhow::bail!("Tokenizer file does not exist: {}", tokenizer_path.display());
		}

		Self::load(&model_path, &tokenizer_path)
	}

	pub fn load(model_path: &Path, tokenizer_path: &Path) -> Result<Self> {
		ui::debug(&format!("Loading text model: {}", model_path.display()));
		let session = crate::runtime::create_session(model_path).context("Failed to load text model")?;

		let mut tokenizer = Tokenizer::from_file(tokenizer_path)
			.map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;
		tokenizer
			.with_truncation(Some(TruncationParams {
				max_length: MAX_SEQUENCE_LENGTH,
				..Default::default()
			}))
			.map_err(|e| anyhow::anyhow!("Failed to configure tokenizer: {}", e))?;
		tokenizer.with_padding(None);

		let mut model = Self {
			session: Mutex::new(session),
			tokenizer,
			dimension: 0,
		};

		// Output width depends on the export, so measure it once
		model.dimension = model.embed("dimension probe")?.len();
		ui::debug(&format!("Text model produces {}-dim embeddings", model.dimension));

		Ok(model)
	}

	fn embed(&self, text: &str) -> Result<Vec<f32>> {
		let encoding = self
			.tokenizer
			.encode(text, true)
			.map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

		let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&x| x as i64).collect();
		let attention_mask: Vec<i64> = encoding.get_attention_mask().iter().map(|&x| x as i64).collect();
		let token_type_ids: Vec<i64> = encoding.get_type_ids().iter().map(|&x| x as i64).collect();
		let shape = vec![1, input_ids.len()];

		let input_ids = Value::from_array((shape.clone(), input_ids))?;
		let mask = Value::from_array((shape.clone(), attention_mask.clone()))?;
		let token_type_ids = Value::from_array((shape, token_type_ids))?;

		let mut session = self
			.session
			.lock()
			.map_err(|e| anyhow::anyhow!("Session lock: {}", e))?;

		let outputs = session.run(ort::inputs![
			"input_ids" => input_ids,
			"attention_mask" => mask,
			"token_type_ids" => token_type_ids,
		])?;

		let output = outputs
			.get("last_hidden_state")
			.or_else(|| outputs.get("sentence_embedding"))
			.context("Model output not found")?;

		let (shape, data) = output.try_extract_tensor::<f32>()?;
		let dims: Vec<usize> = shape.iter().map(|&x| x as usize).collect();

		let embedding = match dims.as_slice() {
			// [1, seq_len, hidden] needs pooling
			[1, seq_len, hidden] => {
				let values = data.get(..seq_len * hidden).context("Model output is truncated")?;
				let hidden_states = ArrayView2::from_shape((*seq_len, *hidden), values)?;
				mean_pool(hidden_states, &attention_mask)
			}
			// [1, hidden] is already pooled
			[1, _] => data.to_vec(),
			_ => anyhow::bail!("Unexpected output shape: {:?}", dims),
		};

		Ok(normalize(&embedding))
	}
}

impl QueryEncoder for TextModel {
	fn name(&self) -> &str {
		MODEL_NAME
	}

	fn dimension(&self) -> usize {
		self.dimension
	}

	fn encode(&self, text: &str) -> Result<Vec<f32>> {
		self.embed(text)
	}
}

/// Mean of token vectors whose attention mask is set
fn mean_pool(hidden_states: ArrayView2<f32>, attention_mask: &[i64]) -> Vec<f32> {
	let mut sum = ndarray::Array1::<f32>::zeros(hidden_states.ncols());
	let mut count = 0.0f32;

	for (token, &mask) in hidden_states.rows().into_iter().zip(attention_mask) {
		if mask == 1 {
			sum += &token;
			count += 1.0;
		}
	}

	if count > 0.0 {
		sum /= count;
	}

	sum.to_vec()
}
