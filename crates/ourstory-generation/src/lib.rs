//! Our Story — text generation.
//!
//! Builds prompts for the three generated texts, sends them to a Gemini
//! model over HTTP, and applies the per-text failure policy: poems and
//! letters surface errors for a retry, the future reflection falls back to
//! a fixed paragraph.

pub mod client;
pub mod error;
pub mod prompts;
pub mod service;

pub use client::GeminiClient;
pub use error::GenerationError;
pub use prompts::{LetterDetails, MemoryDetails};
pub use service::{
    FUTURE_REFLECTION_FALLBACK, generate_future_reflection, generate_love_letter,
    generate_poetic_summary,
};
