//! # moodrec Library
//!
//! Mood-based song recommendations: a free-text mood is embedded with a
//! sentence-transformer model and matched against precomputed song
//! embeddings by cosine similarity.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod runtime;
pub mod server;
pub mod storage;
pub mod ui;
