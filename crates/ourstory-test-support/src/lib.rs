//! Shared test mocks and utilities for the Our Story engine.

mod cache;
mod clock;
mod generation;
mod repository;

pub use cache::FailingKeyValueStore;
pub use clock::FixedClock;
pub use generation::{FailingTextGenerator, StubTextGenerator};
pub use repository::{
    FailingResponseRepository, FailingStoryRepository, InMemoryResponseRepository,
    InMemoryStoryRepository,
};
