//! Core domain types and ranking

pub mod params;
pub mod ranker;
pub mod recommender;
pub mod similarity;
pub mod song;

pub use params::RecommendParams;
pub use ranker::{rank, ScoredCandidate};
pub use recommender::Recommender;
pub use similarity::{cosine_similarity, normalize};
pub use song::{Recommendation, SongRecord};
