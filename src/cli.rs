use clap::builder::styling::{AnsiColor, Style, Styles};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{DEFAULT_HOST, DEFAULT_N_RECS, DEFAULT_PORT, DEFAULT_TOP_K};

/// Execution provider for ONNX Runtime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Provider {
	/// Auto-detect best available (TensorRT → CUDA → CoreML → XNNPACK → CPU)
	#[default]
	Auto,
	/// CPU only
	Cpu,
	/// NVIDIA CUDA GPU
	Cuda,
	/// NVIDIA TensorRT (optimized inference)
	Tensorrt,
	/// Apple CoreML (macOS only)
	Coreml,
	/// XNNPACK (optimized CPU kernels)
	Xnnpack,
}

fn parse_count(s: &str) -> Result<usize, String> {
	let val: i64 = s.parse().map_err(|_| format!("'{}' is not a whole number", s))?;
	if val <= 0 {
		Err(format!("must be positive, got {}", val))
	} else {
		usize::try_from(val).map_err(|_| format!("{} is too large", val))
	}
}

fn styles() -> Styles {
	Styles::styled()
		.header(Style::new().bold().fg_color(Some(AnsiColor::Magenta.into())))
		.usage(Style::new().bold().fg_color(Some(AnsiColor::Magenta.into())))
		.literal(Style::new().fg_color(Some(AnsiColor::Blue.into())))
		.placeholder(Style::new().fg_color(Some(AnsiColor::Yellow.into())))
		.valid(Style::new().fg_color(Some(AnsiColor::Blue.into())))
		.invalid(Style::new().fg_color(Some(AnsiColor::Red.into())))
}

#[derive(Parser, Debug)]
#[command(
	name = "moodrec",
	author,
	version,
	about = "Mood-based song recommendations from sentence embeddings",
	styles = styles(),
	after_help = format!(
		"{title}
  {bin} {index}                    {index_desc}
  {bin} {serve}  {serve_args}          {serve_desc}
  {bin} {recommend} {recommend_args}  {recommend_desc}
  {bin} {repl}                     {repl_desc}",
		title = "Examples:".bright_magenta().bold(),
		bin = "moodrec".bright_blue(),
		index = "index".yellow(),
		index_desc = "Precompute song embeddings".dimmed(),
		serve = "serve".yellow(),
		serve_args = "--port 8080",
		serve_desc = "Start the web app".dimmed(),
		recommend = "recommend".yellow(),
		recommend_args = "\"rainy sunday\" -n 3",
		recommend_desc = "One-shot recommendation".dimmed(),
		repl = "repl".yellow(),
		repl_desc = "Interactive mood prompt".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	/// Execution provider: auto, cpu, cuda, tensorrt, coreml, xnnpack
	#[arg(short = 'p', long = "provider", global = true, default_value = "auto")]
	pub provider: Provider,

	/// Records CSV (default: data/spotify_songs.csv)
	#[arg(long = "records", global = true, value_name = "CSV")]
	pub records: Option<PathBuf>,

	/// Precomputed embeddings (default: instance/song_embeddings.npy)
	#[arg(long = "embeddings", global = true, value_name = "NPY")]
	pub embeddings: Option<PathBuf>,

	/// Directory containing model.onnx and tokenizer.json
	#[arg(long = "models", global = true, value_name = "DIR")]
	pub models: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Serve the web interface and JSON API
	Serve {
		/// Address to bind
		#[arg(long = "host", default_value = DEFAULT_HOST)]
		host: String,

		/// Port to listen on
		#[arg(long = "port", default_value_t = DEFAULT_PORT)]
		port: u16,
	},

	/// Recommend songs for a mood
	Recommend {
		/// Mood description
		#[arg(value_name = "MOOD")]
		prompt: String,

		/// Number of songs to show
		#[arg(short = 'n', long = "n-recs", default_value_t = DEFAULT_N_RECS, value_parser = parse_count)]
		n_recs: usize,

		/// Candidate pool size before trimming
		#[arg(short = 'k', long = "top-k", default_value_t = DEFAULT_TOP_K, value_parser = parse_count)]
		top_k: usize,
	},

	/// Interactive recommendation session
	Repl {
		/// Number of songs to show
		#[arg(short = 'n', long = "n-recs", default_value_t = DEFAULT_N_RECS, value_parser = parse_count)]
		n_recs: usize,

		/// Candidate pool size before trimming
		#[arg(short = 'k', long = "top-k", default_value_t = DEFAULT_TOP_K, value_parser = parse_count)]
		top_k: usize,
	},

	/// Encode every song description and write the embeddings file
	Index {
		/// Output path (default: the --embeddings path)
		#[arg(short = 'o', long = "output", value_name = "NPY")]
		output: Option<PathBuf>,

		/// Overwrite an existing embeddings file
		#[arg(short = 'f', long = "force")]
		force: bool,
	},

	/// Show data, model and corpus status
	Info,
}
