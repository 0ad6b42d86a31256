//! Our Story — Story Sharing bounded context.
//!
//! Responsible for turning a creator's draft into a share link, resolving a
//! link back into a story, recording the recipient's answer, and letting the
//! creator track answers behind the story's passcode.

pub mod application;
pub mod domain;
