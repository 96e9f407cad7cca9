//! # Embedding Models
//!
//! The query encoder seam and its ONNX sentence-transformer implementation.

pub mod encoder;
pub mod text;

pub use encoder::QueryEncoder;
pub use text::TextModel;
