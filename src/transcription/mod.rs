//! Inference client for the hosted Gemini multimodal API.

pub mod gemini;

pub use gemini::{process, InferenceError};
