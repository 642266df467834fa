//! User-facing copy for the onboarding wizard.

use super::state::OnboardingStep;

/// Title shown above the widget for a step. Lines are separated by `\n`.
pub fn step_prompt(step: OnboardingStep) -> &'static str {
    match step {
        OnboardingStep::Language => "Choose your language.",
        OnboardingStep::Phone => "Please enter\nyour phone number.",
        OnboardingStep::Nickname => "Please enter\nyour nickname.",
        OnboardingStep::BirthDate => "Please tell me\nthe year of your birth.",
        OnboardingStep::Gender => "Please choose\nyour gender.",
        OnboardingStep::ProfileImage => "Set up your\nown profile.",
        OnboardingStep::VisitPurpose => "What is this\nvisit for?",
    }
}

/// Placeholder shown inside an empty text field.
pub fn placeholder(step: OnboardingStep) -> Option<&'static str> {
    match step {
        OnboardingStep::Phone => Some("Enter Phone Number"),
        OnboardingStep::Nickname => Some("Enter Nickname"),
        _ => None,
    }
}

/// Caption under the profile image once a choice has been made.
pub const IMAGE_CAPTION: &str = "It's a picture that is visible to other users.";

/// Note under the birth date fields.
pub const BIRTH_DATE_NOTE: &str = "You cannot change the entered\ninformation once you save it!";

/// Labels of the profile image action sheet, in display order.
pub const SHEET_SELECT_FROM_DEVICE: &str = "Select from the album";
pub const SHEET_USE_DEFAULT: &str = "Set to default image";
pub const SHEET_CLOSE: &str = "Close";

/// Label of the advance button.
pub const NEXT_LABEL: &str = "Next";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_step_has_a_prompt() {
        for step in OnboardingStep::ALL {
            assert!(!step_prompt(step).is_empty(), "{step} has no prompt");
        }
    }

    #[test]
    fn multi_line_prompts_split_on_newline() {
        let lines: Vec<&str> = step_prompt(OnboardingStep::Phone).lines().collect();
        assert_eq!(lines, ["Please enter", "your phone number."]);
        assert_eq!(step_prompt(OnboardingStep::Language).lines().count(), 1);
    }

    #[test]
    fn only_text_steps_have_placeholders() {
        assert_eq!(placeholder(OnboardingStep::Phone), Some("Enter Phone Number"));
        assert_eq!(placeholder(OnboardingStep::Nickname), Some("Enter Nickname"));
        assert!(placeholder(OnboardingStep::Gender).is_none());
    }
}
