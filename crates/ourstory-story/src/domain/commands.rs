//! Commands for the Story Sharing context.

use ourstory_core::story::StoryDraft;
use serde::Deserialize;

use crate::domain::responses::AcceptanceKind;

/// Command to publish a story draft as a share link.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareLink {
    /// The creator's draft.
    pub draft: StoryDraft,
    /// Optional human-chosen link name.
    #[serde(default)]
    pub custom_id: Option<String>,
}

/// Command to record the recipient's answer to the proposal.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    /// The story being answered, when the link carried an id.
    #[serde(default)]
    pub story_id: Option<String>,
    /// Responder display name; blank becomes "Anonymous".
    #[serde(default)]
    pub name: String,
    /// Which acceptance the recipient chose.
    pub kind: AcceptanceKind,
}

/// Command to look up the answers given to a story.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackStory {
    /// A full share link or a bare story id.
    pub link_or_id: String,
    /// The story's passcode.
    pub passcode: String,
}
