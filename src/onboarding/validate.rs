//! Field validators.
//!
//! Two layers live here. The step validators (`is_*`) gate the advance
//! action and reject empty input. The advisory checks (`*_error`) drive the
//! inline message under a text field while the user types; they stay quiet on
//! empty input and never stop the user from typing.

use std::sync::LazyLock;

use regex::Regex;

use super::model::{BirthDate, OnboardingAnswers};

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+\-\s()]+$").expect("phone pattern is valid"));

static NICKNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("nickname pattern is valid"));

/// Shown under a nickname containing anything but ASCII letters and digits.
pub const NICKNAME_ERROR: &str = "You can only use English and numbers without spaces.";

/// Shown under a phone number containing characters outside `[0-9+-() ]`.
pub const PHONE_ERROR: &str = "Please enter a valid phone number.";

/// Shown under text inputs while there is no error.
pub const HELPER_TEXT: &str = "You cannot change the entered information once you save it!";

pub fn is_phone_valid(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

pub fn is_nickname_valid(value: &str) -> bool {
    NICKNAME_RE.is_match(value)
}

/// Year must be exactly four digits; month and day need at least one.
///
/// No calendar check: "13" is an accepted month and "99" an accepted day.
pub fn is_birth_date_valid(date: &BirthDate) -> bool {
    fn digits(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_digit())
    }

    date.year.len() == 4
        && digits(&date.year)
        && !date.month.is_empty()
        && digits(&date.month)
        && !date.day.is_empty()
        && digits(&date.day)
}

/// A single-select step is complete once anything has been picked.
pub fn is_selected<T>(selection: &Option<T>) -> bool {
    selection.is_some()
}

/// The profile image step needs an explicit decision, file or default.
pub fn is_image_chosen(answers: &OnboardingAnswers) -> bool {
    answers.image_chosen
}

/// Inline message for a phone number being typed, if any.
pub fn phone_error(value: &str) -> Option<&'static str> {
    (!value.is_empty() && !is_phone_valid(value)).then_some(PHONE_ERROR)
}

/// Inline message for a nickname being typed, if any.
pub fn nickname_error(value: &str) -> Option<&'static str> {
    (!value.is_empty() && !is_nickname_valid(value)).then_some(NICKNAME_ERROR)
}
