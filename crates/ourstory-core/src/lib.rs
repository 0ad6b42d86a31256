//! Our Story Core — shared domain abstractions.
//!
//! This crate defines the story model and the collaborator traits that all
//! bounded contexts depend on. It contains no infrastructure code.

pub mod cache;
pub mod clock;
pub mod defaults;
pub mod error;
pub mod generation;
pub mod repository;
pub mod story;
