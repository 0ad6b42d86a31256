//! Route modules organized by concern.

pub mod generate;
pub mod health;
pub mod responses;
pub mod stories;
pub mod track;
