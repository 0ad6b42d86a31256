//! The story payload a share link carries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::defaults::{DEFAULT_PASSCODE, default_letter, default_timeline};

/// One memory on the story's timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineEvent {
    /// Free-form date label.
    pub date: String,
    /// Short heading.
    pub title: String,
    /// Longer description of the memory.
    pub description: String,
    /// Optional image URL.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,
    /// Optional two-line poem about the memory.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub poetic_summary: String,
}

impl TimelineEvent {
    /// Builds an event from a loosely-shaped mapping. Missing or non-string
    /// fields become empty strings.
    #[must_use]
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            date: string_or_empty(map, "date"),
            title: string_or_empty(map, "title"),
            description: string_or_empty(map, "description"),
            image: string_or_empty(map, "image"),
            poetic_summary: string_or_empty(map, "poeticSummary"),
        }
    }
}

/// A fully populated story. Every consumer-visible story is one of these;
/// partial input goes through [`Story::from_value`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    /// The recipient's display name.
    pub partner_name: String,
    /// The creator's display name.
    pub your_name: String,
    /// Optional anniversary label.
    pub anniversary: String,
    /// The letter body.
    pub letter: String,
    /// Memories in display order. Never empty.
    pub timeline: Vec<TimelineEvent>,
    /// Shared secret for the vault and response tracking.
    pub passcode: String,
    /// Optional video URL revealed by the vault.
    pub vault_video: String,
}

impl Default for Story {
    fn default() -> Self {
        Self {
            partner_name: String::new(),
            your_name: String::new(),
            anniversary: String::new(),
            letter: default_letter(),
            timeline: default_timeline(),
            passcode: DEFAULT_PASSCODE.to_owned(),
            vault_video: String::new(),
        }
    }
}

impl Story {
    /// Merges a loosely-shaped long-key value with the built-in defaults.
    ///
    /// A field that is missing, not a string, or empty takes its default. The
    /// timeline takes the default sequence when it is missing, not a sequence,
    /// or has no mapping elements.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        let Some(map) = value.as_object() else {
            return defaults;
        };

        let timeline: Vec<TimelineEvent> = map
            .get("timeline")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(TimelineEvent::from_map)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            partner_name: non_empty(map, "partnerName").unwrap_or(defaults.partner_name),
            your_name: non_empty(map, "yourName").unwrap_or(defaults.your_name),
            anniversary: non_empty(map, "anniversary").unwrap_or(defaults.anniversary),
            letter: non_empty(map, "letter").unwrap_or(defaults.letter),
            timeline: if timeline.is_empty() {
                defaults.timeline
            } else {
                timeline
            },
            passcode: non_empty(map, "passcode").unwrap_or(defaults.passcode),
            vault_video: non_empty(map, "vaultVideo").unwrap_or(defaults.vault_video),
        }
    }

    /// Returns the long-key structured form of this story.
    #[must_use]
    pub fn to_value(&self) -> Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(self).expect("Story serialization is infallible")
    }
}

/// A creator-supplied subset of a story. Absent fields are left out of the
/// serialized form entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoryDraft {
    /// The recipient's display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_name: Option<String>,
    /// The creator's display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub your_name: Option<String>,
    /// Optional anniversary label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anniversary: Option<String>,
    /// The letter body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter: Option<String>,
    /// Memories in display order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Vec<TimelineEvent>>,
    /// Shared secret for the vault and response tracking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passcode: Option<String>,
    /// Optional video URL revealed by the vault.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault_video: Option<String>,
}

impl StoryDraft {
    /// Returns the long-key structured form of this draft.
    #[must_use]
    pub fn to_value(&self) -> Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(self).expect("StoryDraft serialization is infallible")
    }
}

impl From<Story> for StoryDraft {
    fn from(story: Story) -> Self {
        Self {
            partner_name: Some(story.partner_name),
            your_name: Some(story.your_name),
            anniversary: Some(story.anniversary),
            letter: Some(story.letter),
            timeline: Some(story.timeline),
            passcode: Some(story.passcode),
            vault_video: Some(story.vault_video),
        }
    }
}

fn string_or_empty(map: &Map<String, Value>, key: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

fn non_empty(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}
