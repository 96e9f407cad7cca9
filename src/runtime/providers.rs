//! Execution provider selection for ONNX Runtime sessions

use anyhow::{Context, Result};
use ort::ep::ExecutionProvider;
use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::Session;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use crate::ui;

pub use crate::cli::Provider;

static SELECTED_PROVIDER: OnceLock<Provider> = OnceLock::new();
static PROVIDER_LOGGED: AtomicBool = AtomicBool::new(false);

/// Set once from the CLI before any model is loaded
pub fn set_provider(p: Provider) {
	let _ = SELECTED_PROVIDER.set(p);
}

fn selected() -> Provider {
	SELECTED_PROVIDER.get().copied().unwrap_or_default()
}

fn announce(msg: &str, accelerated: bool) {
	if PROVIDER_LOGGED.swap(true, Ordering::Relaxed) {
		return;
	}
	if accelerated {
		ui::success(msg);
	} else {
		ui::info(msg);
	}
}

/// Builds a session for `model_path` on the selected provider, falling back to CPU
pub fn create_session(model_path: &Path) -> Result<Session> {
	let mut builder = Session::builder().context("Failed to create session builder")?;

	let provider = selected();
	match provider {
		Provider::Cpu => announce("Using CPU execution provider (forced)", false),
		Provider::Auto => {
			let registered = auto_order().iter().any(|&p| register(&mut builder, p));
			if !registered {
				announce("Using CPU execution provider", false);
			}
		}
		requested => {
			if !register(&mut builder, requested) {
				ui::error(&format!(
					"{} requested but unavailable, falling back to CPU",
					provider_name(requested)
				));
			}
		}
	}

	builder
		.with_optimization_level(GraphOptimizationLevel::Level3)?
		.with_intra_threads(4)?
		.commit_from_file(model_path)
		.context("Failed to load model")
}

/// Preference order when nothing was forced
fn auto_order() -> &'static [Provider] {
	#[cfg(target_os = "macos")]
	{
		&[Provider::Tensorrt, Provider::Cuda, Provider::Coreml, Provider::Xnnpack]
	}
	#[cfg(not(target_os = "macos"))]
	{
		&[Provider::Tensorrt, Provider::Cuda, Provider::Xnnpack]
	}
}

fn provider_name(provider: Provider) -> &'static str {
	match provider {
		Provider::Auto => "Auto",
		Provider::Cpu => "CPU",
		Provider::Cuda => "CUDA",
		Provider::Tensorrt => "TensorRT",
		Provider::Coreml => "CoreML",
		Provider::Xnnpack => "XNNPACK",
	}
}

fn register(builder: &mut SessionBuilder, provider: Provider) -> bool {
	let name = provider_name(provider);
	match provider {
		Provider::Cuda => try_register(builder, ort::ep::CUDA::default(), name),
		Provider::Tensorrt => try_register(builder, ort::ep::TensorRT::default(), name),
		Provider::Xnnpack => try_register(builder, ort::ep::XNNPACK::default(), name),
		#[cfg(target_os = "macos")]
		Provider::Coreml => try_register(builder, ort::ep::CoreML::default(), name),
		#[cfg(not(target_os = "macos"))]
		Provider::Coreml => {
			ui::debug("CoreML is only available on macOS");
			false
		}
		Provider::Auto | Provider::Cpu => false,
	}
}

fn try_register<E: ExecutionProvider>(builder: &mut SessionBuilder, ep: E, name: &str) -> bool {
	ui::debug(&format!("Trying provider: {}", name));

	if !ep.is_available().unwrap_or(false) {
		ui::debug(&format!("{} not available", name));
		return false;
	}

	match ep.register(builder) {
		Ok(_) => {
			announce(&format!("Using {} execution provider", name), true);
			true
		}
		Err(e) => {
			ui::debug(&format!("{} registration failed: {}", name, e));
			false
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn auto_never_tries_cpu_or_itself() {
		assert!(!auto_order().contains(&Provider::Auto));
		assert!(!auto_order().contains(&Provider::Cpu));
	}

	#[test]
	fn names_match_cli_help() {
		assert_eq!(provider_name(Provider::Tensorrt), "TensorRT");
		assert_eq!(provider_name(Provider::Xnnpack), "XNNPACK");
	}
}
