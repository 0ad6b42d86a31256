//! Detection of legacy (never minified) payloads.

use serde_json::Value;

/// Long keys whose presence marks a payload as already restored.
const LEGACY_PROBE_KEYS: [&str; 2] = ["partnerName", "yourName"];

/// The key form of a decoded payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    /// Produced by an encoder that did not minify keys; used as-is.
    Legacy,
    /// Short-key form; keys must be restored.
    Minified,
}

impl PayloadFormat {
    /// Classifies a parsed payload by probing for well-known long keys.
    #[must_use]
    pub fn detect(value: &Value) -> Self {
        match value.as_object() {
            Some(map) if LEGACY_PROBE_KEYS.iter().any(|key| map.contains_key(*key)) => {
                Self::Legacy
            }
            _ => Self::Minified,
        }
    }
}
