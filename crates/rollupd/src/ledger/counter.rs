//! Uppercasing counter and the list of senders that used it.

use serde::Serialize;

use crate::address::Address;

use super::errors::DomainError;

/// Aggregate projection over accepted `upper` commands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpperCounter {
    to_upper_total: u64,
    users: Vec<Address>,
}

impl UpperCounter {
    /// Number of accepted `upper` commands.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.to_upper_total
    }

    /// Distinct senders in first-seen order.
    #[must_use]
    pub fn users(&self) -> &[Address] {
        &self.users
    }

    pub(super) fn upper(&mut self, sentence: &str, sender: Address) -> Result<String, DomainError> {
        if is_numeric(sentence) {
            return Err(DomainError::InvalidText {
                sentence: sentence.to_owned(),
            });
        }
        if !self.users.contains(&sender) {
            self.users.push(sender);
        }
        self.to_upper_total = self.to_upper_total.saturating_add(1);
        Ok(sentence.to_uppercase())
    }
}

/// Whether JavaScript's `Number(sentence)` would yield a number.
///
/// Surrounding whitespace is ignored and blank text counts as zero. Signed
/// `Infinity` and the `0x`, `0o`, and `0b` integer literals are numeric;
/// Rust-only spellings such as `inf` or `NaN` are not.
fn is_numeric(sentence: &str) -> bool {
    let text = sentence.trim();
    if text.is_empty() || is_radix_literal(text) {
        return true;
    }
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned == "Infinity" {
        return true;
    }
    if unsigned
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return false;
    }
    text.parse::<f64>().is_ok()
}

fn is_radix_literal(text: &str) -> bool {
    let radix = match text.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => 16,
        Some("0o") => 8,
        Some("0b") => 2,
        _ => return false,
    };
    text.get(2..)
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix)))
}
