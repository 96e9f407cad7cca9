//! # ONNX Runtime
//!
//! Session creation for the text model, with execution provider selection.

pub mod providers;

pub use providers::{create_session, set_provider, Provider};
