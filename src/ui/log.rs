//! Unified logging system

use chrono::Local;
use colored::*;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

const LOGO: &str = r#"
                               _
  _ __ ___   ___   ___   __| |_ __ ___  ___
 | '_ ` _ \ / _ \ / _ \ / _` | '__/ _ \/ __|
 | | | | | | (_) | (_) | (_| | | |  __/ (__
 |_| |_| |_|\___/ \___/ \__,_|_|  \___|\___|"#;

const SLOGANS: &[&str] = &[
	"Tell me how you feel, I'll tell you what to play",
	"384 dimensions of vibes",
	"Cosine similarity, but make it a playlist",
	"Rainy sunday? Say no more",
	"Mean-pooled feelings, L2-normalized",
	"Heartbreak in, bangers out",
	"No shuffle button was harmed",
	"Because genre tags never understood you",
	"Deduplicated, just like your ex's playlists",
];

pub fn random_slogan() -> &'static str {
	let idx = rand::rng().random_range(0..SLOGANS.len());
	SLOGANS[idx]
}

pub fn print_logo() {
	println!("{}", LOGO.bright_magenta().bold());
	println!("{}", random_slogan().dimmed().italic());
}

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}
}

fn timestamp() -> ColoredString {
	Local::now().format("%H:%M:%S").to_string().dimmed()
}

pub fn info(msg: &str) {
	println!("[{}] {} {}", timestamp(), "ℹ".bright_blue().bold(), msg.bright_white());
}

pub fn success(msg: &str) {
	println!("[{}] {} {}", timestamp(), "✓".bright_green().bold(), msg.bright_white());
}

pub fn warn(msg: &str) {
	println!("[{}] {} {}", timestamp(), "⚠".bright_yellow().bold(), msg.bright_white());
}

pub fn error(msg: &str) {
	eprintln!("[{}] {} {}", timestamp(), "✗".bright_red().bold(), msg.bright_white());
}

pub fn debug(msg: &str) {
	if Log::is_verbose() {
		println!("[{}] {} {}", timestamp(), "⚙".bright_black().bold(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	println!("\n{}", format!("─── {} ───", text).bright_magenta().bold());
}

/// Progress line for long batch jobs, e.g. "[1200/32833] Encoding songs"
pub fn progress(current: usize, total: usize, msg: &str) {
	let counter = format!("[{}/{}]", current, total).bright_blue().bold();
	info(&format!("{} {}", counter, msg));
}

/// Clickable file path (OSC 8 terminal hyperlink)
pub fn path_link(path: &std::path::Path, max_len: usize) -> String {
	let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

	let uri = if cfg!(windows) {
		let path_str = absolute.to_string_lossy();
		let cleaned = path_str.strip_prefix(r"\\?\").unwrap_or(&path_str);
		format!("file:///{}", cleaned.replace('\\', "/"))
	} else {
		format!("file://{}", absolute.display())
	};

	let display = path.display().to_string();
	let display_name = if display.chars().count() > max_len {
		let tail: String = display
			.chars()
			.rev()
			.take(max_len.saturating_sub(3))
			.collect::<Vec<_>>()
			.into_iter()
			.rev()
			.collect();
		format!("...{}", tail)
	} else {
		display
	};

	format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", uri, display_name)
}
