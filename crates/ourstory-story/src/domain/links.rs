//! Share links and the query parameters that carry them.

use ourstory_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Longest accepted custom link name.
pub const MAX_CUSTOM_ID_LEN: usize = 64;

/// Warning attached to an inline link produced because the store was unreachable.
pub const OFFLINE_FALLBACK_WARNING: &str =
    "Cloud connection failed. Generated offline link instead.";

/// User-facing message for a custom link name that is already taken.
pub const DUPLICATE_ID_MESSAGE: &str =
    "This custom link name is already taken. Please choose another.";

/// User-facing message for tracking input that holds no story id.
pub const INVALID_TRACKING_INPUT_MESSAGE: &str = "Please enter a valid Story Link or ID.";

/// A link that opens a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShareLink {
    /// Points at a record held by the store (`?id=`).
    Pointer {
        /// The record id.
        id: String,
    },
    /// Carries the whole story inline (`?data=`).
    Inline {
        /// The encoded story token.
        token: String,
    },
}

impl ShareLink {
    /// Builds the full URL under `base`.
    #[must_use]
    pub fn url(&self, base: &str) -> String {
        match self {
            Self::Pointer { id } => format!("{base}?id={id}"),
            Self::Inline { token } => format!("{base}?data={token}"),
        }
    }
}

/// The link parameters a story is resolved from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StoryQuery {
    /// Value of the `id` parameter.
    #[serde(default)]
    pub id: Option<String>,
    /// Value of the `data` parameter.
    #[serde(default)]
    pub data: Option<String>,
}

fn is_link_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Trims a requested custom link name. A blank name means "generate one".
///
/// # Errors
///
/// Returns `DomainError::Validation` if the name is too long or contains a
/// character outside `[A-Za-z0-9_-]`.
pub fn normalize_custom_id(raw: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(id) = raw.map(str::trim).filter(|id| !id.is_empty()) else {
        return Ok(None);
    };
    if id.len() > MAX_CUSTOM_ID_LEN || !id.chars().all(is_link_safe) {
        return Err(DomainError::Validation(format!(
            "custom link names may only use letters, digits, '-' and '_' (at most {MAX_CUSTOM_ID_LEN} characters)"
        )));
    }
    Ok(Some(id.to_owned()))
}

/// Pulls a story id out of a pasted share link or a bare id.
///
/// A link contributes the value of its `id` parameter. Text without one is
/// taken as a bare id if it is link-safe.
#[must_use]
pub fn extract_story_id(link_or_id: &str) -> Option<String> {
    let text = link_or_id.trim();
    let from_param = text
        .split(['?', '&', '#'])
        .find_map(|part| part.strip_prefix("id="))
        .map(str::trim);

    let id = match from_param {
        Some(id) => id,
        None if text.chars().all(is_link_safe) => text,
        None => return None,
    };
    (!id.is_empty()).then(|| id.to_owned())
}
