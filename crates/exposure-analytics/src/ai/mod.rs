//! Reasoning-service abstraction for LLM-backed analysis.
//!
//! All natural-language understanding (answering questions about the CSV,
//! choosing the best frame for a brand) is delegated to an external hosted
//! model. This module keeps that dependency behind the [`ReasoningService`]
//! trait so the Tauri layer and tests can run against a deterministic stub.
//!
//! # Feature Flag
//!
//! The concrete Gemini client requires the `ai` feature (default on). The
//! [`ReasoningService`] trait and the prompt builders are always available.
//!
//! ```toml
//! # Disable the HTTP client for a smaller build
//! exposure-analytics = { version = "0.1", default-features = false }
//! ```
//!
//! # Adding a New Backend
//!
//! 1. Create a new file (e.g. `src/ai/openrouter.rs`)
//! 2. Implement the [`ReasoningService`] trait
//! 3. Export the new client in this module

mod prompts;
mod service;

pub use prompts::{build_best_frame_prompt, build_question_prompt};
pub use service::ReasoningService;

#[cfg(feature = "ai")]
mod gemini;

#[cfg(feature = "ai")]
pub use gemini::{GeminiClient, GeminiConfig, GeminiConfigBuilder};
