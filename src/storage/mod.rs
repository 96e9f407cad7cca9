//! Corpus storage: records CSV plus `.npy` embedding matrix

pub mod corpus;
pub mod npy;

pub use corpus::{load_records, Corpus};
