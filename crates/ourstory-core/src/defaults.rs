//! Built-in story content used whenever a story omits a field.

use crate::story::TimelineEvent;

/// Passcode guarding the vault and response tracking when none was chosen.
pub const DEFAULT_PASSCODE: &str = "1402";

/// Partner name substituted at link creation when the creator left it blank.
pub const DEFAULT_PARTNER_NAME: &str = "My Love";

/// Name recorded for responses that arrive without one.
pub const ANONYMOUS_RESPONDER: &str = "Anonymous";

const DEFAULT_LETTER: &str = "
My Dearest,

Since the day we met, ordinary days stopped feeling ordinary. You are the calm in my loudest moments and the reason my quiet ones feel full.

Every morning with you is something I am grateful for, and somehow I keep finding new things to love about you: the way you laugh, the way you listen, the way you care.

I made this so you could see, in one place, how much you mean to me. Even so, it only says a fraction of it...

Always yours.
";

/// Returns the built-in letter.
#[must_use]
pub fn default_letter() -> String {
    DEFAULT_LETTER.to_owned()
}

/// Returns the built-in timeline, oldest memory first.
#[must_use]
pub fn default_timeline() -> Vec<TimelineEvent> {
    vec![
        TimelineEvent {
            date: "February 14, 2023".to_owned(),
            title: "The Beginning".to_owned(),
            description: "The day we first crossed paths. A simple hello that turned into \
                          the start of everything."
                .to_owned(),
            image: "https://images.unsplash.com/photo-1516589178581-6cd7833ae3b2?q=80&w=2787&auto=format&fit=crop"
                .to_owned(),
            poetic_summary: "A chance hello on an ordinary day, and every day since found its way."
                .to_owned(),
        },
        TimelineEvent {
            date: "March 20, 2023".to_owned(),
            title: "Our First Date".to_owned(),
            description: "One coffee became hours of talking, and neither of us wanted the \
                          evening to end."
                .to_owned(),
            image: "https://images.unsplash.com/photo-1517048676732-d65bc937f952?q=80&w=2940&auto=format&fit=crop"
                .to_owned(),
            poetic_summary: "The coffee went cold while the hours flew, all of my attention was on you."
                .to_owned(),
        },
        TimelineEvent {
            date: "June 15, 2023".to_owned(),
            title: "Making Memories".to_owned(),
            description: "Late drives, long beach days, and a hundred small moments that \
                          became favorites."
                .to_owned(),
            image: "https://images.unsplash.com/photo-1518199266791-5375a83190b7?q=80&w=2940&auto=format&fit=crop"
                .to_owned(),
            poetic_summary: "Sunsets and salt air, summer in bloom, you made every place feel like home."
                .to_owned(),
        },
        TimelineEvent {
            date: "December 25, 2023".to_owned(),
            title: "First Christmas".to_owned(),
            description: "Our first holidays together, warmer and brighter than any before."
                .to_owned(),
            image: "https://images.unsplash.com/photo-1512389142860-9c449fc84698?q=80&w=2940&auto=format&fit=crop"
                .to_owned(),
            poetic_summary: "Snow outside and lights aglow, the warmest gift was you, I know."
                .to_owned(),
        },
        TimelineEvent {
            date: "Today".to_owned(),
            title: "Forever & Always".to_owned(),
            description: "Looking back at how far we have come, and looking forward to \
                          everything still ahead."
                .to_owned(),
            image: "https://images.unsplash.com/photo-1515934751635-c81c6bc9a2d8?q=80&w=2940&auto=format&fit=crop"
                .to_owned(),
            poetic_summary: "Hand in hand toward the dawn, our story written and carried on."
                .to_owned(),
        },
    ]
}
