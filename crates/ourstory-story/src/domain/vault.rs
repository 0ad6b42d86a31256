//! Passcode entry for the memory vault.
//!
//! Digits fill the slots one at a time. When every slot is filled the entry
//! is checked on its own; a wrong code clears the slots for another try.

use ourstory_core::defaults::DEFAULT_PASSCODE;
use ourstory_core::error::DomainError;
use tracing::debug;

/// Number of digits in a vault passcode.
pub const PASSCODE_LEN: usize = 4;

/// Message returned when a creator picks a passcode the vault cannot accept.
pub const INVALID_PASSCODE_MESSAGE: &str = "Passcode must be exactly 4 digits.";

/// Trims a creator-chosen passcode. Blank input means "use the default".
///
/// # Errors
///
/// Returns `DomainError::Validation` unless the passcode is exactly
/// [`PASSCODE_LEN`] ASCII digits, the only codes [`PasscodeEntry`] can match.
pub fn normalize_passcode(raw: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(passcode) = raw.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(None);
    };
    if passcode.len() != PASSCODE_LEN || !passcode.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::Validation(INVALID_PASSCODE_MESSAGE.to_owned()));
    }
    Ok(Some(passcode.to_owned()))
}

/// Result of feeding input to a [`PasscodeEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    /// More digits are needed.
    Pending,
    /// The code matched; the vault is open.
    Unlocked,
    /// The code did not match; the slots were cleared.
    Rejected,
}

/// Sequential digit entry checked against an expected passcode.
#[derive(Debug, Clone)]
pub struct PasscodeEntry {
    expected: String,
    entered: String,
    unlocked: bool,
}

impl PasscodeEntry {
    /// Creates an entry expecting `passcode`. A blank passcode falls back to
    /// the built-in default.
    #[must_use]
    pub fn new(passcode: &str) -> Self {
        let expected = if passcode.is_empty() {
            DEFAULT_PASSCODE
        } else {
            passcode
        };
        Self {
            expected: expected.to_owned(),
            entered: String::new(),
            unlocked: false,
        }
    }

    /// Number of slots shown to the user.
    #[must_use]
    pub fn slots(&self) -> usize {
        self.expected.chars().count()
    }

    /// Digits entered so far.
    #[must_use]
    pub fn entered(&self) -> &str {
        &self.entered
    }

    /// Whether the vault has been opened.
    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Feeds one character. Non-digits are ignored. Filling the last slot
    /// checks the code.
    pub fn push(&mut self, c: char) -> EntryOutcome {
        if self.unlocked {
            return EntryOutcome::Unlocked;
        }
        if !c.is_ascii_digit() {
            return EntryOutcome::Pending;
        }
        self.entered.push(c);
        if self.entered.chars().count() < self.slots() {
            return EntryOutcome::Pending;
        }

        if self.entered == self.expected {
            self.unlocked = true;
            EntryOutcome::Unlocked
        } else {
            debug!(slots = self.slots(), "vault passcode rejected");
            self.entered.clear();
            EntryOutcome::Rejected
        }
    }

    /// Feeds each character of `input` in turn and returns the first
    /// non-pending outcome. Input after that outcome is dropped.
    pub fn push_str(&mut self, input: &str) -> EntryOutcome {
        for c in input.chars() {
            let outcome = self.push(c);
            if outcome != EntryOutcome::Pending {
                return outcome;
            }
        }
        EntryOutcome::Pending
    }

    /// Removes the last entered digit.
    pub fn backspace(&mut self) {
        if !self.unlocked {
            self.entered.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_code_unlocks_on_last_digit() {
        // Arrange
        let mut entry = PasscodeEntry::new("1402");

        // Act
        let partial: Vec<_> = "140".chars().map(|c| entry.push(c)).collect();
        let last = entry.push('2');

        // Assert
        assert_eq!(partial, vec![EntryOutcome::Pending; 3]);
        assert_eq!(last, EntryOutcome::Unlocked);
        assert!(entry.is_unlocked());
    }

    #[test]
    fn test_wrong_code_is_rejected_and_cleared() {
        let mut entry = PasscodeEntry::new("1402");

        let outcome = entry.push_str("9999");

        assert_eq!(outcome, EntryOutcome::Rejected);
        assert_eq!(entry.entered(), "");
        assert!(!entry.is_unlocked());
    }

    #[test]
    fn test_non_digits_are_ignored() {
        let mut entry = PasscodeEntry::new("1402");

        assert_eq!(entry.push_str("1a4-0 2"), EntryOutcome::Unlocked);
    }

    #[test]
    fn test_backspace_corrects_a_digit() {
        // Arrange
        let mut entry = PasscodeEntry::new("1402");
        entry.push_str("149");

        // Act
        entry.backspace();
        let outcome = entry.push_str("02");

        // Assert
        assert_eq!(outcome, EntryOutcome::Unlocked);
    }

    #[test]
    fn test_retry_after_rejection() {
        let mut entry = PasscodeEntry::new("2580");
        entry.push_str("0000");

        assert_eq!(entry.push_str("2580"), EntryOutcome::Unlocked);
    }

    #[test]
    fn test_normalize_passcode_accepts_four_digits() {
        assert_eq!(
            normalize_passcode(Some(" 2580 ")).unwrap().as_deref(),
            Some("2580")
        );
        assert_eq!(normalize_passcode(Some("  ")).unwrap(), None);
        assert_eq!(normalize_passcode(None).unwrap(), None);
    }

    #[test]
    fn test_normalize_passcode_rejects_codes_entry_cannot_match() {
        for raw in ["ab12", "12a4", "123", "12345", "１２３４"] {
            let err = normalize_passcode(Some(raw)).unwrap_err();
            assert!(
                matches!(&err, DomainError::Validation(m) if m == INVALID_PASSCODE_MESSAGE),
                "{raw}: {err:?}"
            );
        }
    }

    #[test]
    fn test_every_accepted_passcode_can_be_unlocked() {
        let passcode = normalize_passcode(Some("0907")).unwrap().unwrap();
        let mut entry = PasscodeEntry::new(&passcode);

        assert_eq!(entry.push_str(&passcode), EntryOutcome::Unlocked);
    }

    #[test]
    fn test_slot_count_follows_passcode_length() {
        assert_eq!(PasscodeEntry::new("123456").slots(), 6);
        assert_eq!(PasscodeEntry::new("").slots(), DEFAULT_PASSCODE.len());
    }
}
