//! Application configuration and constants

use std::path::PathBuf;
use std::sync::OnceLock;

static CUSTOM_MODEL_DIR: OnceLock<PathBuf> = OnceLock::new();
static CUSTOM_RECORDS: OnceLock<PathBuf> = OnceLock::new();
static CUSTOM_EMBEDDINGS: OnceLock<PathBuf> = OnceLock::new();

// === Model Files ===
pub const MODEL_NAME: &str = "all-MiniLM-L6-v2";
pub const TEXT_MODEL: &str = "model.onnx";
pub const TOKENIZER: &str = "tokenizer.json";

// === Model Parameters ===
pub const EMBEDDING_DIM: usize = 384;
pub const MAX_SEQUENCE_LENGTH: usize = 256;

// === Data ===
pub const DEFAULT_RECORDS: &str = "data/spotify_songs.csv";
pub const DEFAULT_EMBEDDINGS: &str = "instance/song_embeddings.npy";

pub const RECORDS_ENV: &str = "MOODREC_RECORDS";
pub const EMBEDDINGS_ENV: &str = "MOODREC_EMBEDDINGS";
pub const MODELS_DIR_ENV: &str = "MOODREC_MODELS_DIR";

// === Recommendation Defaults ===
pub const DEFAULT_N_RECS: usize = 5;
pub const DEFAULT_TOP_K: usize = 10;

// === Server ===
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

pub fn set_model_dir(path: PathBuf) {
	let _ = CUSTOM_MODEL_DIR.set(path);
}

pub fn set_records_path(path: PathBuf) {
	let _ = CUSTOM_RECORDS.set(path);
}

pub fn set_embeddings_path(path: PathBuf) {
	let _ = CUSTOM_EMBEDDINGS.set(path);
}

/// Record CSV location (--records, MOODREC_RECORDS, or data/spotify_songs.csv)
pub fn records_path() -> PathBuf {
	resolve(&CUSTOM_RECORDS, RECORDS_ENV, DEFAULT_RECORDS)
}

/// Embeddings .npy location (--embeddings, MOODREC_EMBEDDINGS, or instance/song_embeddings.npy)
pub fn embeddings_path() -> PathBuf {
	resolve(&CUSTOM_EMBEDDINGS, EMBEDDINGS_ENV, DEFAULT_EMBEDDINGS)
}

fn resolve(custom: &OnceLock<PathBuf>, env: &str, default: &str) -> PathBuf {
	if let Some(path) = custom.get() {
		return path.clone();
	}
	match std::env::var(env) {
		Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
		_ => PathBuf::from(default),
	}
}

/// Get models directory (--models, MOODREC_MODELS_DIR, next to the executable, or ./models)
pub fn models_dir() -> Option<PathBuf> {
	if let Some(custom) = CUSTOM_MODEL_DIR.get() {
		crate::ui::debug(&format!("Using custom model dir: {}", custom.display()));
		return Some(custom.clone());
	}

	if let Ok(env_path) = std::env::var(MODELS_DIR_ENV) {
		let path = PathBuf::from(&env_path);
		if path.is_dir() {
			crate::ui::debug(&format!("Using {}: {}", MODELS_DIR_ENV, env_path));
			return Some(path);
		}
	}

	if let Ok(exe) = std::env::current_exe() {
		if let Some(dir) = exe.parent() {
			let models = dir.join("models");
			if models.is_dir() {
				crate::ui::debug(&format!("Found models at: {}", models.display()));
				return Some(models);
			}
		}
	}

	let local = PathBuf::from("models");
	if local.is_dir() {
		return Some(local);
	}

	None
}

pub fn get_text_model_path() -> Option<PathBuf> {
	models_dir().map(|d| d.join(TEXT_MODEL))
}

pub fn get_tokenizer_path() -> Option<PathBuf> {
	models_dir().map(|d| d.join(TOKENIZER))
}
