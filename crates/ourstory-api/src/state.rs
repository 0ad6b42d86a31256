//! Shared application state.

use std::sync::Arc;

use ourstory_core::clock::Clock;
use ourstory_core::generation::TextGenerator;
use ourstory_core::repository::{ResponseRepository, StoryRepository};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock used to timestamp responses.
    pub clock: Arc<dyn Clock>,
    /// Story records.
    pub story_repository: Arc<dyn StoryRepository>,
    /// Proposal responses.
    pub response_repository: Arc<dyn ResponseRepository>,
    /// Text-generation provider.
    pub text_generator: Arc<dyn TextGenerator>,
    /// Base URL share links are rendered under.
    pub public_base_url: Arc<str>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        story_repository: Arc<dyn StoryRepository>,
        response_repository: Arc<dyn ResponseRepository>,
        text_generator: Arc<dyn TextGenerator>,
        public_base_url: &str,
    ) -> Self {
        Self {
            clock,
            story_repository,
            response_repository,
            text_generator,
            public_base_url: Arc::from(public_base_url),
        }
    }
}
