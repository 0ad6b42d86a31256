//! Story ↔ token encoding.

use ourstory_core::story::{Story, StoryDraft};
use serde_json::Value;
use tracing::{debug, warn};

use crate::format::PayloadFormat;
use crate::keys;
use crate::token::{self, CodecError};

/// Encodes a story-shaped value into a URL-safe token.
///
/// Keys are minified depth-first, the result is serialized to JSON, deflated,
/// and base64-encoded. Never fails.
#[must_use]
pub fn encode(value: &Value) -> String {
    let minified = keys::minify(value);
    let token = token::compress(&minified.to_string());
    debug!(token_len = token.len(), "encoded story token");
    token
}

/// Encodes a partially populated story. Absent fields are not transmitted.
#[must_use]
pub fn encode_draft(draft: &StoryDraft) -> String {
    encode(&draft.to_value())
}

/// Encodes a fully populated story.
#[must_use]
pub fn encode_story(story: &Story) -> String {
    encode(&story.to_value())
}

/// Decodes a token into a long-key value.
///
/// Legacy payloads (already carrying long keys) are returned untouched;
/// minified payloads have their keys restored depth-first.
///
/// # Errors
///
/// Returns a `CodecError` describing why the token could not be decoded.
pub fn try_decode(token: &str) -> Result<Value, CodecError> {
    let json = token::decompress(token)?;
    let parsed: Value = serde_json::from_str(&json)?;

    match PayloadFormat::detect(&parsed) {
        PayloadFormat::Legacy => {
            debug!("decoded legacy long-key payload");
            Ok(parsed)
        }
        PayloadFormat::Minified => Ok(keys::restore(&parsed)),
    }
}

/// Best-effort structural decode. Returns `None` for empty, malformed or
/// tampered tokens instead of failing.
#[must_use]
pub fn decode(token: &str) -> Option<Value> {
    match try_decode(token) {
        Ok(value) => Some(value),
        Err(CodecError::EmptyToken) => None,
        Err(e) => {
            warn!(error = %e, token_len = token.len(), "failed to decode story token");
            None
        }
    }
}

/// Decodes a token and merges the result with the built-in defaults.
#[must_use]
pub fn decode_story(token: &str) -> Option<Story> {
    decode(token).map(|value| Story::from_value(&value))
}
