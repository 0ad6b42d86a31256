//! Command handlers for the Story Sharing context.
//!
//! Publishing prefers a pointer link backed by the store. Any store failure
//! other than a taken custom name degrades to an inline link.

use ourstory_codec::encode_draft;
use ourstory_core::clock::Clock;
use ourstory_core::defaults::DEFAULT_PARTNER_NAME;
use ourstory_core::error::DomainError;
use ourstory_core::repository::{NewResponse, ResponseRepository, StoredResponse, StoryRepository};
use ourstory_core::story::StoryDraft;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::commands::{CreateShareLink, RecordResponse};
use crate::domain::links::{OFFLINE_FALLBACK_WARNING, ShareLink, normalize_custom_id};
use crate::domain::responses::responder_name;
use crate::domain::vault::normalize_passcode;

/// A freshly published share link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinkCreated {
    /// The link itself.
    pub link: ShareLink,
    /// The link rendered under the public base URL.
    pub url: String,
    /// Non-fatal notice for the creator, set when the link fell back to
    /// inline form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<&'static str>,
}

fn prepare_draft(draft: &StoryDraft) -> Result<StoryDraft, DomainError> {
    let mut draft = draft.clone();
    draft.passcode = normalize_passcode(draft.passcode.as_deref())?;
    if draft.partner_name.as_deref().is_none_or(str::is_empty) {
        draft.partner_name = Some(DEFAULT_PARTNER_NAME.to_owned());
    }
    if draft.timeline.as_ref().is_some_and(Vec::is_empty) {
        draft.timeline = None;
    }
    Ok(draft)
}

/// Handles the `CreateShareLink` command: stores the draft and returns a
/// pointer link, or an inline link with a warning when the store fails.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the custom link name or the passcode
/// is malformed.
/// Returns `DomainError::DuplicateId` if the custom link name is taken.
pub async fn handle_create_share_link(
    command: &CreateShareLink,
    base_url: &str,
    repo: &dyn StoryRepository,
) -> Result<ShareLinkCreated, DomainError> {
    let custom_id = normalize_custom_id(command.custom_id.as_deref())?;
    let draft = prepare_draft(&command.draft)?;

    let (link, warning) = match repo.insert_story(&draft.to_value(), custom_id.as_deref()).await {
        Ok(record) => {
            info!(story_id = %record.id, "story published");
            (ShareLink::Pointer { id: record.id }, None)
        }
        Err(e @ DomainError::DuplicateId(_)) => return Err(e),
        Err(e) => {
            warn!(error = %e, "story store unavailable, falling back to inline link");
            let token = encode_draft(&draft);
            (ShareLink::Inline { token }, Some(OFFLINE_FALLBACK_WARNING))
        }
    };

    Ok(ShareLinkCreated {
        url: link.url(base_url),
        link,
        warning,
    })
}

/// Handles the `RecordResponse` command.
///
/// # Errors
///
/// Returns `DomainError` if the response cannot be stored.
pub async fn handle_record_response(
    command: &RecordResponse,
    clock: &dyn Clock,
    repo: &dyn ResponseRepository,
) -> Result<StoredResponse, DomainError> {
    let response = NewResponse {
        id: Uuid::new_v4(),
        story_id: command
            .story_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_owned),
        name: responder_name(&command.name),
        response: command.kind.label().to_owned(),
        recorded_at: clock.now(),
    };

    let stored = repo.record_response(response).await?;
    info!(
        response_id = %stored.id,
        story_id = ?stored.story_id,
        response = %stored.response,
        "response recorded"
    );
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use ourstory_codec::decode_story;
    use ourstory_core::error::DomainError;
    use ourstory_core::story::{StoryDraft, TimelineEvent};
    use serde_json::json;

    use crate::application::command_handlers::{handle_create_share_link, handle_record_response};
    use crate::domain::commands::{CreateShareLink, RecordResponse};
    use crate::domain::links::{OFFLINE_FALLBACK_WARNING, ShareLink};
    use crate::domain::responses::AcceptanceKind;
    use ourstory_test_support::{
        FailingResponseRepository, FailingStoryRepository, FixedClock, InMemoryResponseRepository,
        InMemoryStoryRepository,
    };

    const BASE: &str = "https://ourstory.example/";

    fn draft(partner: &str) -> StoryDraft {
        StoryDraft {
            partner_name: Some(partner.to_owned()),
            your_name: Some("Sam".to_owned()),
            ..StoryDraft::default()
        }
    }

    #[tokio::test]
    async fn test_create_share_link_with_custom_id_returns_pointer_link() {
        // Arrange
        let repo = InMemoryStoryRepository::new();
        let command = CreateShareLink {
            draft: draft("Maya"),
            custom_id: Some("  maya-and-sam ".to_owned()),
        };

        // Act
        let created = handle_create_share_link(&command, BASE, &repo).await.unwrap();

        // Assert
        assert_eq!(
            created.link,
            ShareLink::Pointer {
                id: "maya-and-sam".to_owned()
            }
        );
        assert_eq!(created.url, "https://ourstory.example/?id=maya-and-sam");
        assert_eq!(created.warning, None);
        let stored = repo.get("maya-and-sam").unwrap();
        assert_eq!(stored.data["partnerName"], json!("Maya"));
    }

    #[tokio::test]
    async fn test_create_share_link_without_custom_id_generates_one() {
        let repo = InMemoryStoryRepository::new();
        let command = CreateShareLink {
            draft: draft("Maya"),
            custom_id: None,
        };

        let created = handle_create_share_link(&command, BASE, &repo).await.unwrap();

        let ShareLink::Pointer { id } = created.link else {
            panic!("expected pointer link");
        };
        assert!(repo.get(&id).is_some());
    }

    #[tokio::test]
    async fn test_create_share_link_rejects_passcode_with_letters() {
        // Arrange
        let repo = InMemoryStoryRepository::new();
        let command = CreateShareLink {
            draft: StoryDraft {
                passcode: Some("ab12".to_owned()),
                ..draft("Maya")
            },
            custom_id: Some("maya".to_owned()),
        };

        // Act
        let result = handle_create_share_link(&command, BASE, &repo).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_create_share_link_stores_trimmed_passcode() {
        let repo = InMemoryStoryRepository::new();
        let command = CreateShareLink {
            draft: StoryDraft {
                passcode: Some(" 2580 ".to_owned()),
                ..draft("Maya")
            },
            custom_id: Some("maya".to_owned()),
        };

        handle_create_share_link(&command, BASE, &repo).await.unwrap();

        assert_eq!(repo.get("maya").unwrap().data["passcode"], json!("2580"));
    }

    #[tokio::test]
    async fn test_create_share_link_defaults_blank_partner_name_and_drops_empty_timeline() {
        // Arrange
        let repo = InMemoryStoryRepository::new();
        let command = CreateShareLink {
            draft: StoryDraft {
                partner_name: Some(String::new()),
                timeline: Some(Vec::new()),
                ..StoryDraft::default()
            },
            custom_id: Some("blank".to_owned()),
        };

        // Act
        handle_create_share_link(&command, BASE, &repo).await.unwrap();

        // Assert
        let stored = repo.get("blank").unwrap();
        assert_eq!(stored.data["partnerName"], json!("My Love"));
        assert!(stored.data.get("timeline").is_none());
    }

    #[tokio::test]
    async fn test_create_share_link_surfaces_duplicate_id() {
        // Arrange
        let repo = InMemoryStoryRepository::with_story("taken", json!({}));
        let command = CreateShareLink {
            draft: draft("Maya"),
            custom_id: Some("taken".to_owned()),
        };

        // Act
        let result = handle_create_share_link(&command, BASE, &repo).await;

        // Assert
        assert!(matches!(result, Err(DomainError::DuplicateId(id)) if id == "taken"));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_create_share_link_rejects_malformed_custom_id_before_storing() {
        let repo = InMemoryStoryRepository::new();
        let command = CreateShareLink {
            draft: draft("Maya"),
            custom_id: Some("our story?".to_owned()),
        };

        let result = handle_create_share_link(&command, BASE, &repo).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_create_share_link_falls_back_to_inline_link_when_store_fails() {
        // Arrange
        let mut command = CreateShareLink {
            draft: draft("Maya"),
            custom_id: Some("maya".to_owned()),
        };
        command.draft.timeline = Some(vec![TimelineEvent {
            date: "2023".into(),
            title: "A".into(),
            description: "d".into(),
            ..TimelineEvent::default()
        }]);

        // Act
        let created = handle_create_share_link(&command, BASE, &FailingStoryRepository)
            .await
            .unwrap();

        // Assert
        assert_eq!(created.warning, Some(OFFLINE_FALLBACK_WARNING));
        let ShareLink::Inline { token } = &created.link else {
            panic!("expected inline link");
        };
        assert_eq!(created.url, format!("{BASE}?data={token}"));
        let story = decode_story(token).unwrap();
        assert_eq!(story.partner_name, "Maya");
        assert_eq!(story.your_name, "Sam");
        assert_eq!(story.timeline.len(), 1);
        assert_eq!(story.timeline[0].title, "A");
    }

    #[tokio::test]
    async fn test_record_response_labels_kind_and_defaults_name() {
        // Arrange
        let fixed_now = Utc.with_ymd_and_hms(2026, 2, 14, 20, 0, 0).unwrap();
        let clock = FixedClock(fixed_now);
        let repo = InMemoryResponseRepository::new();
        let command = RecordResponse {
            story_id: Some("maya".to_owned()),
            name: "  ".to_owned(),
            kind: AcceptanceKind::Cinematic,
        };

        // Act
        let stored = handle_record_response(&command, &clock, &repo).await.unwrap();

        // Assert
        assert_eq!(stored.name, "Anonymous");
        assert_eq!(stored.response, "YES - Grow Old With Me (Cinematic)");
        assert_eq!(stored.story_id.as_deref(), Some("maya"));
        assert_eq!(stored.created_at, fixed_now);
        assert_eq!(repo.recorded(), vec![stored]);
    }

    #[tokio::test]
    async fn test_record_response_drops_blank_story_id() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 2, 14, 20, 0, 0).unwrap());
        let repo = InMemoryResponseRepository::new();
        let command = RecordResponse {
            story_id: Some(" ".to_owned()),
            name: "Maya".to_owned(),
            kind: AcceptanceKind::Valentine,
        };

        let stored = handle_record_response(&command, &clock, &repo).await.unwrap();

        assert_eq!(stored.story_id, None);
        assert_eq!(stored.name, "Maya");
    }

    #[tokio::test]
    async fn test_record_response_propagates_store_failure() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 2, 14, 20, 0, 0).unwrap());
        let command = RecordResponse {
            story_id: None,
            name: "Maya".to_owned(),
            kind: AcceptanceKind::Valentine,
        };

        let result = handle_record_response(&command, &clock, &FailingResponseRepository).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }
}
