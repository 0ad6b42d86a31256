//! Application services for the Story Sharing context.

pub mod command_handlers;
pub mod query_handlers;
