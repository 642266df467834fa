//! Onboarding wizard: the seven-step flow a new user completes after
//! signing in.
//!
//! The wizard walks through a fixed table of steps (language, phone,
//! nickname, birth date, gender, profile image, visit purpose). Each step has
//! an input widget and a validator; "Next" is enabled only while the
//! validator accepts the collected answers. Finishing the last step hands the
//! answers to a [`Registrar`](crate::registration::Registrar).

pub mod manager;
pub mod model;
pub mod preview;
pub mod prompts;
pub mod state;
pub mod validate;
pub mod widgets;

pub use manager::{OnboardingEvent, OnboardingManager, OnboardingSeed, PendingDecode, StepOutcome, StepView};
pub use model::{BirthDate, BirthDateField, Choice, Gender, Language, OnboardingAnswers, ProfileImage, VisitPurpose};
pub use preview::{FsPreviewDecoder, PreviewDecoder};
pub use state::{OnboardingState, OnboardingStep, StepDefinition, WidgetKind, STEPS};
