//! Generation entry points with their failure policy.

use ourstory_core::error::DomainError;
use ourstory_core::generation::{PromptVariant, TextGenerator};
use tracing::warn;

use crate::prompts::{
    LetterDetails, MemoryDetails, future_reflection_prompt, love_letter_prompt,
    poetic_summary_prompt,
};

/// Paragraph shown when the future reflection cannot be generated.
pub const FUTURE_REFLECTION_FALLBACK: &str = "Ten years on, the best part of most days is still \
     the sound of you laughing in the kitchen. Slow mornings, ordinary evenings, the two of us \
     arguing over the crossword: all of it keeps reminding me that your yes was where my real \
     life began.";

/// Writes a two-line poem about one timeline memory.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the memory is missing its title,
/// date or description. Returns `DomainError::Generation` if the provider
/// fails.
pub async fn generate_poetic_summary(
    memory: &MemoryDetails,
    generator: &dyn TextGenerator,
) -> Result<String, DomainError> {
    if !memory.is_complete() {
        return Err(DomainError::Validation(
            "fill in the date, title and description before generating a poem".into(),
        ));
    }
    generator
        .generate_text(PromptVariant::PoeticSummary, &poetic_summary_prompt(memory))
        .await
}

/// Writes a love letter from the form answers.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the partner name is blank. Returns
/// `DomainError::Generation` if the provider fails.
pub async fn generate_love_letter(
    details: &LetterDetails,
    generator: &dyn TextGenerator,
) -> Result<String, DomainError> {
    if details.partner_name.trim().is_empty() {
        return Err(DomainError::Validation(
            "a partner name is required to write a letter".into(),
        ));
    }
    generator
        .generate_text(PromptVariant::LoveLetter, &love_letter_prompt(details))
        .await
}

/// Writes the after-credits reflection. Never fails: any provider error
/// yields [`FUTURE_REFLECTION_FALLBACK`].
pub async fn generate_future_reflection(partner_name: &str, generator: &dyn TextGenerator) -> String {
    match generator
        .generate_text(
            PromptVariant::FutureReflection,
            &future_reflection_prompt(partner_name),
        )
        .await
    {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "future reflection unavailable, using fallback text");
            FUTURE_REFLECTION_FALLBACK.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ourstory_test_support::{FailingTextGenerator, StubTextGenerator};

    fn memory() -> MemoryDetails {
        MemoryDetails {
            title: "First Date".into(),
            date: "June 2021".into(),
            description: "Rain on the pier".into(),
        }
    }

    #[tokio::test]
    async fn test_poetic_summary_sends_memory_prompt() {
        // Arrange
        let generator = StubTextGenerator::new("Two lines of rain");

        // Act
        let poem = generate_poetic_summary(&memory(), &generator).await.unwrap();

        // Assert
        assert_eq!(poem, "Two lines of rain");
        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].0, PromptVariant::PoeticSummary);
        assert!(prompts[0].1.contains("First Date"));
    }

    #[tokio::test]
    async fn test_poetic_summary_requires_complete_memory() {
        let generator = StubTextGenerator::new("unused");
        let incomplete = MemoryDetails {
            description: String::new(),
            ..memory()
        };

        let result = generate_poetic_summary(&incomplete, &generator).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_love_letter_surfaces_retryable_failure() {
        let details = LetterDetails {
            partner_name: "Maya".into(),
            ..LetterDetails::default()
        };

        let result = generate_love_letter(&details, &FailingTextGenerator { retryable: true }).await;

        assert!(matches!(
            result,
            Err(DomainError::Generation { retryable: true, .. })
        ));
    }

    #[tokio::test]
    async fn test_love_letter_requires_partner_name() {
        let generator = StubTextGenerator::new("unused");

        let result = generate_love_letter(&LetterDetails::default(), &generator).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_future_reflection_returns_generated_text() {
        let generator = StubTextGenerator::new("Ten years of coffee.");

        let text = generate_future_reflection("Maya", &generator).await;

        assert_eq!(text, "Ten years of coffee.");
        assert_eq!(generator.prompts()[0].0, PromptVariant::FutureReflection);
    }

    #[tokio::test]
    async fn test_future_reflection_falls_back_on_failure() {
        let text =
            generate_future_reflection("Maya", &FailingTextGenerator { retryable: false }).await;

        assert_eq!(text, FUTURE_REFLECTION_FALLBACK);
    }
}
