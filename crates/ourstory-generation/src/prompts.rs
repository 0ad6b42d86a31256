//! Prompt construction for each generated text.

use serde::Deserialize;

/// The memory a poetic summary is written about.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MemoryDetails {
    /// Heading of the timeline entry.
    pub title: String,
    /// Date label of the timeline entry.
    pub date: String,
    /// What happened.
    pub description: String,
}

impl MemoryDetails {
    /// Whether every field holds some text.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [&self.title, &self.date, &self.description]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Answers the love-letter form collects.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LetterDetails {
    /// Who the letter is for.
    pub partner_name: String,
    /// How the couple met.
    pub how_we_met: String,
    /// The writer's favorite shared memory.
    pub favorite_memory: String,
    /// What the writer admires most.
    pub admire: String,
    /// A joke only the two of them get.
    pub inside_joke: String,
}

/// Prompt for a two-line poem about one memory.
#[must_use]
pub fn poetic_summary_prompt(memory: &MemoryDetails) -> String {
    format!(
        "Write a personal two-line romantic poem about a shared memory.\n\
         \n\
         Memory: {title}\n\
         When: {date}\n\
         What happened: {description}\n\
         \n\
         Rules:\n\
         - Exactly two short lines.\n\
         - Warm and sweet rather than grand.\n\
         - Plain words, no elaborate metaphors.\n",
        title = memory.title.trim(),
        date = memory.date.trim(),
        description = memory.description.trim(),
    )
}

/// Prompt for a full letter built from the form answers.
#[must_use]
pub fn love_letter_prompt(details: &LetterDetails) -> String {
    format!(
        "Write a heartfelt letter of about 200 words to {partner}.\n\
         \n\
         How we met: {met}\n\
         Favorite memory: {memory}\n\
         What I admire most: {admire}\n\
         Our inside joke: {joke}\n\
         \n\
         Rules:\n\
         - Personal and emotionally mature.\n\
         - Skip the usual romantic cliches and any melodrama.\n\
         - Quiet, concrete imagery.\n\
         - Natural paragraphs that read as written by a person.\n",
        partner = details.partner_name.trim(),
        met = details.how_we_met.trim(),
        memory = details.favorite_memory.trim(),
        admire = details.admire.trim(),
        joke = details.inside_joke.trim(),
    )
}

/// Prompt for a short reflection written ten years after the proposal.
#[must_use]
pub fn future_reflection_prompt(partner_name: &str) -> String {
    format!(
        "Write a short reflection by someone looking back ten years after \
         {partner} said yes to marrying them.\n\
         \n\
         Tone: gentle, grateful and grounded. Use small everyday details and \
         avoid cliches. Three or four sentences at most.\n",
        partner = partner_name.trim(),
    )
}
