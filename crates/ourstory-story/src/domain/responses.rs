//! Proposal responses.

use ourstory_core::defaults::ANONYMOUS_RESPONDER;
use serde::{Deserialize, Serialize};

/// The ways a recipient can say yes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptanceKind {
    /// The simple accept flow.
    Valentine,
    /// The dramatic accept flow.
    DramaticValentine,
    /// The cinematic ending of the dramatic flow.
    Cinematic,
}

impl AcceptanceKind {
    /// Label stored with the response.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Valentine => "YES - Valentine",
            Self::DramaticValentine => "YES - Dramatic Valentine",
            Self::Cinematic => "YES - Grow Old With Me (Cinematic)",
        }
    }
}

/// Trims `name`, substituting the anonymous responder name when blank.
#[must_use]
pub fn responder_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        ANONYMOUS_RESPONDER.to_owned()
    } else {
        trimmed.to_owned()
    }
}
