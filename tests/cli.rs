// CLI smoke tests against the built binary

use std::process::Command;

fn moodrec() -> Command {
	Command::new(env!("CARGO_BIN_EXE_moodrec"))
}

#[test]
fn test_version_display() {
	let output = moodrec().arg("--version").output().expect("Failed to run moodrec --version");

	assert!(output.status.success(), "Version command failed");

	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("moodrec"), "Expected 'moodrec' in version output");
}

#[test]
fn test_help_display() {
	let output = moodrec().arg("--help").output().expect("Failed to run moodrec --help");

	assert!(output.status.success(), "Help command failed");

	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(
		stdout.contains("serve") && stdout.contains("recommend") && stdout.contains("index"),
		"Expected serve, recommend and index in help output"
	);
}

#[test]
fn test_missing_embeddings_fails_fast() {
	let dir = tempfile::tempdir().unwrap();
	let records = dir.path().join("songs.csv");
	std::fs::write(&records, "track_name,track_artist,playlist_genre\nYellow,Coldplay,rock\n").unwrap();

	let output = moodrec()
		.args(["recommend", "happy", "--records"])
		.arg(&records)
		.arg("--embeddings")
		.arg(dir.path().join("missing.npy"))
		.output()
		.expect("Failed to run moodrec recommend");

	assert!(!output.status.success(), "Expected failure without embeddings");

	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("not found"), "Expected a missing-file message, got: {}", stderr);
}

#[test]
fn test_invalid_count_is_rejected() {
	let output = moodrec()
		.args(["recommend", "happy", "-n", "-3"])
		.output()
		.expect("Failed to run moodrec recommend");

	assert!(!output.status.success(), "Expected negative count to be rejected");
}
