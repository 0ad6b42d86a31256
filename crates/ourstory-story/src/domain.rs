//! Domain types for the Story Sharing context.

pub mod commands;
pub mod links;
pub mod responses;
pub mod vault;
