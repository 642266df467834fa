//! Single-line text input with live, advisory validation.

use crate::onboarding::validate::{self, HELPER_TEXT};

use super::SubmitIntent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInputKind {
    Phone,
    Nickname,
}

impl TextInputKind {
    fn check(&self, value: &str) -> Option<&'static str> {
        match self {
            Self::Phone => validate::phone_error(value),
            Self::Nickname => validate::nickname_error(value),
        }
    }
}

/// Text field that flags bad input inline but never refuses a keystroke.
#[derive(Debug, Clone)]
pub struct TextInput {
    kind: TextInputKind,
    value: String,
    error: Option<&'static str>,
}

impl TextInput {
    pub fn new(kind: TextInputKind, value: impl Into<String>) -> Self {
        let value = value.into();
        let error = kind.check(&value);
        Self { kind, value, error }
    }

    pub fn kind(&self) -> TextInputKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Take the field's full new contents. The value is stored as typed.
    pub fn input(&mut self, raw: &str) -> String {
        self.value = raw.to_string();
        self.error = self.kind.check(&self.value);
        self.value.clone()
    }

    pub fn key_enter(&self) -> SubmitIntent {
        SubmitIntent
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Text under the field: the inline error, or the standing helper note.
    pub fn helper(&self) -> &'static str {
        self.error.unwrap_or(HELPER_TEXT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::validate::{NICKNAME_ERROR, PHONE_ERROR};

    #[test]
    fn valid_nickname_shows_helper() {
        let mut input = TextInput::new(TextInputKind::Nickname, "");
        assert_eq!(input.input("abc123"), "abc123");
        assert_eq!(input.error(), None);
        assert_eq!(input.helper(), HELPER_TEXT);
    }

    #[test]
    fn invalid_nickname_is_kept_and_flagged() {
        let mut input = TextInput::new(TextInputKind::Nickname, "");
        assert_eq!(input.input("abc 123"), "abc 123");
        assert_eq!(input.value(), "abc 123");
        assert_eq!(input.helper(), NICKNAME_ERROR);

        // Typing continues past the error
        assert_eq!(input.input("abc 1234"), "abc 1234");
        input.input("abc1234");
        assert_eq!(input.error(), None);
    }

    #[test]
    fn phone_error_clears_on_empty() {
        let mut input = TextInput::new(TextInputKind::Phone, "call me");
        assert_eq!(input.error(), Some(PHONE_ERROR));
        input.input("");
        assert_eq!(input.error(), None);
    }

    #[test]
    fn enter_always_submits() {
        let input = TextInput::new(TextInputKind::Phone, "not a number");
        assert_eq!(input.key_enter(), SubmitIntent);
    }
}
