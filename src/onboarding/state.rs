//! Onboarding state machine: the step table and the transitions between steps.

use serde::{Deserialize, Serialize};

use crate::error::OnboardingError;

use super::model::OnboardingAnswers;
use super::prompts::step_prompt;
use super::validate;

/// Number of steps in the wizard.
pub const STEP_COUNT: usize = 7;

/// The steps of the onboarding wizard.
///
/// Progresses linearly: Language → Phone → Nickname → BirthDate → Gender →
/// ProfileImage → VisitPurpose. There is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Language,
    Phone,
    Nickname,
    BirthDate,
    Gender,
    ProfileImage,
    VisitPurpose,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; STEP_COUNT] = [
        Self::Language,
        Self::Phone,
        Self::Nickname,
        Self::BirthDate,
        Self::Gender,
        Self::ProfileImage,
        Self::VisitPurpose,
    ];

    pub const FIRST: OnboardingStep = Self::Language;

    /// Zero-based position of the step.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<OnboardingStep> {
        Self::ALL.get(index).copied()
    }

    /// The following step, or `None` on the last one.
    pub fn next(&self) -> Option<OnboardingStep> {
        Self::from_index(self.index() + 1)
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }

    /// Table entry describing this step.
    pub fn definition(&self) -> &'static StepDefinition {
        &STEPS[self.index()]
    }
}

impl std::fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Language => "language",
            Self::Phone => "phone",
            Self::Nickname => "nickname",
            Self::BirthDate => "birth_date",
            Self::Gender => "gender",
            Self::ProfileImage => "profile_image",
            Self::VisitPurpose => "visit_purpose",
        };
        write!(f, "{s}")
    }
}

/// Which input widget a step renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    LanguageSelector,
    PhoneInput,
    NicknameInput,
    BirthDateInput,
    GenderSelector,
    ProfileImageInput,
    VisitPurposeSelector,
}

/// One row of the step table.
#[derive(Debug)]
pub struct StepDefinition {
    pub step: OnboardingStep,
    pub widget: WidgetKind,
    /// Gate for the advance action on this step.
    pub validator: fn(&OnboardingAnswers) -> bool,
}

impl StepDefinition {
    pub fn prompt(&self) -> &'static str {
        step_prompt(self.step)
    }

    pub fn accepts(&self, answers: &OnboardingAnswers) -> bool {
        (self.validator)(answers)
    }
}

fn language_chosen(a: &OnboardingAnswers) -> bool {
    validate::is_selected(&a.language)
}

fn phone_valid(a: &OnboardingAnswers) -> bool {
    validate::is_phone_valid(&a.phone)
}

fn nickname_valid(a: &OnboardingAnswers) -> bool {
    validate::is_nickname_valid(&a.nickname)
}

fn birth_date_valid(a: &OnboardingAnswers) -> bool {
    validate::is_birth_date_valid(&a.birth_date)
}

fn gender_chosen(a: &OnboardingAnswers) -> bool {
    validate::is_selected(&a.gender)
}

fn visit_purpose_chosen(a: &OnboardingAnswers) -> bool {
    validate::is_selected(&a.visit_purpose)
}

/// The wizard, in order. Immutable for the life of the process.
pub static STEPS: [StepDefinition; STEP_COUNT] = [
    StepDefinition {
        step: OnboardingStep::Language,
        widget: WidgetKind::LanguageSelector,
        validator: language_chosen,
    },
    StepDefinition {
        step: OnboardingStep::Phone,
        widget: WidgetKind::PhoneInput,
        validator: phone_valid,
    },
    StepDefinition {
        step: OnboardingStep::Nickname,
        widget: WidgetKind::NicknameInput,
        validator: nickname_valid,
    },
    StepDefinition {
        step: OnboardingStep::BirthDate,
        widget: WidgetKind::BirthDateInput,
        validator: birth_date_valid,
    },
    StepDefinition {
        step: OnboardingStep::Gender,
        widget: WidgetKind::GenderSelector,
        validator: gender_chosen,
    },
    StepDefinition {
        step: OnboardingStep::ProfileImage,
        widget: WidgetKind::ProfileImageInput,
        validator: validate::is_image_chosen,
    },
    StepDefinition {
        step: OnboardingStep::VisitPurpose,
        widget: WidgetKind::VisitPurposeSelector,
        validator: visit_purpose_chosen,
    },
];

/// Where the wizard is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingState {
    Step(OnboardingStep),
    /// Answers have been handed off; nothing else can happen.
    Completed,
}

impl Default for OnboardingState {
    fn default() -> Self {
        Self::Step(OnboardingStep::FIRST)
    }
}

impl std::fmt::Display for OnboardingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Step(step) => write!(f, "{step}"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl OnboardingState {
    pub fn step(&self) -> Option<OnboardingStep> {
        match self {
            Self::Step(step) => Some(*step),
            Self::Completed => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Check if a transition from `self` to `target` is structurally valid.
    pub fn can_transition_to(&self, target: OnboardingState) -> bool {
        match (self, target) {
            (Self::Step(from), Self::Step(to)) => from.next() == Some(to),
            (Self::Step(from), Self::Completed) => from.is_last(),
            (Self::Completed, _) => false,
        }
    }

    /// Whether the advance action is enabled for these answers.
    ///
    /// Derived on every call; nothing is cached.
    pub fn can_advance(&self, answers: &OnboardingAnswers) -> bool {
        match self {
            Self::Step(step) => step.definition().accepts(answers),
            Self::Completed => false,
        }
    }

    /// The state the advance action leads to.
    pub fn advance(&self, answers: &OnboardingAnswers) -> Result<OnboardingState, OnboardingError> {
        let step = self.step().ok_or(OnboardingError::AlreadyCompleted)?;
        if !step.definition().accepts(answers) {
            return Err(OnboardingError::Incomplete {
                step: step.to_string(),
            });
        }
        Ok(match step.next() {
            Some(next) => Self::Step(next),
            None => Self::Completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::model::{BirthDate, Gender, Language, VisitPurpose};

    fn complete_answers() -> OnboardingAnswers {
        OnboardingAnswers::default()
            .with_language(Language::English)
            .with_phone("010-1111-2222")
            .with_nickname("abc123")
            .with_birth_date(BirthDate {
                year: "1990".into(),
                month: "4".into(),
                day: "15".into(),
            })
            .with_gender(Gender::Woman)
            .with_profile_image(None)
            .with_visit_purpose(VisitPurpose::General)
    }

    #[test]
    fn table_is_in_step_order() {
        assert_eq!(STEPS.len(), STEP_COUNT);
        for (i, def) in STEPS.iter().enumerate() {
            assert_eq!(def.step.index(), i, "{} is out of place", def.step);
            assert_eq!(OnboardingStep::from_index(i), Some(def.step));
        }
        assert_eq!(OnboardingStep::from_index(STEP_COUNT), None);
    }

    #[test]
    fn next_walks_all_steps() {
        let mut current = OnboardingStep::FIRST;
        let mut visited = vec![current];
        while let Some(next) = current.next() {
            visited.push(next);
            current = next;
        }
        assert_eq!(visited, OnboardingStep::ALL);
        assert!(current.is_last());
        assert_eq!(current, OnboardingStep::VisitPurpose);
    }

    #[test]
    fn valid_transitions() {
        use OnboardingStep::*;
        let s = OnboardingState::Step;
        assert!(s(Language).can_transition_to(s(Phone)));
        assert!(s(ProfileImage).can_transition_to(s(VisitPurpose)));
        assert!(s(VisitPurpose).can_transition_to(OnboardingState::Completed));
    }

    #[test]
    fn invalid_transitions() {
        use OnboardingStep::*;
        let s = OnboardingState::Step;
        // Skip
        assert!(!s(Language).can_transition_to(s(Nickname)));
        // Backward
        assert!(!s(Nickname).can_transition_to(s(Phone)));
        // Self
        assert!(!s(Gender).can_transition_to(s(Gender)));
        // Early completion
        assert!(!s(Gender).can_transition_to(OnboardingState::Completed));
        // Terminal
        assert!(!OnboardingState::Completed.can_transition_to(s(Language)));
    }

    #[test]
    fn advance_walks_to_completed_with_full_answers() {
        let answers = complete_answers();
        let mut state = OnboardingState::default();
        for step in OnboardingStep::ALL {
            assert_eq!(state, OnboardingState::Step(step));
            let next = state.advance(&answers).unwrap();
            assert!(state.can_transition_to(next));
            state = next;
        }
        assert!(state.is_terminal());
        assert!(matches!(
            state.advance(&answers),
            Err(OnboardingError::AlreadyCompleted)
        ));
    }

    #[test]
    fn advance_blocked_on_invalid_step() {
        let state = OnboardingState::Step(OnboardingStep::Nickname);
        let answers = complete_answers().with_nickname("has space");
        assert!(!state.can_advance(&answers));
        match state.advance(&answers) {
            Err(OnboardingError::Incomplete { step }) => assert_eq!(step, "nickname"),
            other => panic!("expected Incomplete, got {other:?}"),
        }
    }

    #[test]
    fn each_validator_reads_its_own_field() {
        let empty = OnboardingAnswers::default();
        let full = complete_answers();
        for def in &STEPS {
            assert!(!def.accepts(&empty), "{} accepts empty answers", def.step);
            assert!(def.accepts(&full), "{} rejects full answers", def.step);
        }
    }

    #[test]
    fn display_matches_serde() {
        for step in OnboardingStep::ALL {
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(format!("\"{step}\""), json);
        }
        assert_eq!(OnboardingState::Completed.to_string(), "completed");
    }

    #[test]
    fn widget_kinds_line_up() {
        assert_eq!(
            OnboardingStep::BirthDate.definition().widget,
            WidgetKind::BirthDateInput
        );
        assert_eq!(
            OnboardingStep::ProfileImage.definition().prompt(),
            "Set up your\nown profile."
        );
    }
}
