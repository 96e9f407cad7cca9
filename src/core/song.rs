//! Song records as loaded from the records CSV

use serde::{Deserialize, Serialize};

/// One row of the records file. Only the three displayed columns are kept;
/// the description is derived once at load time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "SongRow")]
pub struct SongRecord {
	pub track_name: String,
	pub track_artist: String,
	pub playlist_genre: String,
	pub description: String,
}

#[derive(Deserialize)]
struct SongRow {
	track_name: String,
	track_artist: String,
	playlist_genre: String,
}

impl From<SongRow> for SongRecord {
	fn from(row: SongRow) -> Self {
		Self::new(row.track_name, row.track_artist, row.playlist_genre)
	}
}

impl SongRecord {
	pub fn new(
		track_name: impl Into<String>,
		track_artist: impl Into<String>,
		playlist_genre: impl Into<String>,
	) -> Self {
		let track_name = track_name.into();
		let track_artist = track_artist.into();
		let playlist_genre = playlist_genre.into();
		let description = format!("{} by {} — genre: {}", track_name, track_artist, playlist_genre);

		Self {
			track_name,
			track_artist,
			playlist_genre,
			description,
		}
	}

	/// Identity used for deduplication
	pub fn key(&self) -> (&str, &str) {
		(&self.track_name, &self.track_artist)
	}

	/// "<track_name> by <track_artist> (<playlist_genre>)"
	pub fn label(&self) -> String {
		format!("{} by {} ({})", self.track_name, self.track_artist, self.playlist_genre)
	}
}

/// Owned result row handed back to callers after ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
	pub track_name: String,
	pub track_artist: String,
	pub playlist_genre: String,
	pub score: f32,
	pub label: String,
}

impl Recommendation {
	pub fn new(record: &SongRecord, score: f32) -> Self {
		Self {
			track_name: record.track_name.clone(),
			track_artist: record.track_artist.clone(),
			playlist_genre: record.playlist_genre.clone(),
			score,
			label: record.label(),
		}
	}
}
