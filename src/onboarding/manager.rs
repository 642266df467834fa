//! OnboardingManager: owns the wizard state, routes widget input, and hands
//! the finished answers to the registrar.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{PreviewError, RegistrationError};
use crate::registration::{Registrar, RegistrationReceipt};

use super::model::{
    BirthDateField, Gender, Language, OnboardingAnswers, ProfileImage, VisitPurpose,
};
use super::preview::PreviewDecoder;
use super::prompts::{placeholder, BIRTH_DATE_NOTE};
use super::state::{OnboardingState, OnboardingStep, STEP_COUNT, WidgetKind};
use super::widgets::{
    BirthDateInput, DecodeTicket, ImageAction, OptionSelector, OptionView, Preview,
    ProfileImageInput, SheetOption, SubmitIntent, TextInput, TextInputKind,
};

/// Optional pre-selected values for the selector steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnboardingSeed {
    pub language: Option<Language>,
    pub gender: Option<Gender>,
    pub visit_purpose: Option<VisitPurpose>,
}

/// User input delivered to the wizard.
#[derive(Debug)]
pub enum OnboardingEvent {
    LanguageSelected(Language),
    PhoneInput(String),
    NicknameInput(String),
    BirthDateInput { field: BirthDateField, raw: String },
    /// A birth date sub-field was clicked into.
    BirthDateFocus(BirthDateField),
    /// Enter pressed in the focused field of the current widget.
    KeyEnter,
    GenderSelected(Gender),
    /// The profile image circle was clicked.
    OpenImageSheet,
    ImageSheet(SheetOption),
    /// The file picker returned a file.
    ImagePicked(PathBuf),
    /// A decode started by `ImagePicked` finished.
    ImageDecoded {
        ticket: DecodeTicket,
        result: Result<ProfileImage, PreviewError>,
    },
    VisitPurposeSelected(VisitPurpose),
    /// The "Next" button.
    Next,
}

/// Decode the host should run, then feed back as [`OnboardingEvent::ImageDecoded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDecode {
    pub ticket: DecodeTicket,
    pub path: PathBuf,
}

/// Result of handling one event.
#[derive(Debug, Default)]
pub struct StepOutcome {
    /// The step index moved forward (or the flow completed).
    pub advanced: bool,
    /// The flow reached its terminal state during this event.
    pub completed: bool,
    /// The host should open a file picker.
    pub pick_file: bool,
    /// A decode was requested.
    pub decode: Option<PendingDecode>,
    /// Focus jumped to another birth date sub-field.
    pub focus_moved_to: Option<BirthDateField>,
    /// Outcome of the registration hand-off, set on completion.
    pub registration: Option<Result<RegistrationReceipt, RegistrationError>>,
}

/// What the current step shows. Recomputed on every call.
#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    /// One-based.
    pub step_number: usize,
    pub step_count: usize,
    pub step: OnboardingStep,
    pub prompt_lines: Vec<&'static str>,
    pub widget: WidgetKind,
    pub value: Option<String>,
    pub helper: Option<&'static str>,
    pub has_error: bool,
    pub options: Vec<OptionView>,
    pub focus: Option<&'static str>,
    /// Shown inside an empty text field.
    pub placeholder: Option<&'static str>,
    pub sheet_open: bool,
    pub preview: Option<&'static str>,
    pub caption: Option<&'static str>,
    pub can_advance: bool,
}

/// Coordinates the onboarding wizard.
pub struct OnboardingManager {
    id: Uuid,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    state: OnboardingState,
    answers: OnboardingAnswers,
    language: OptionSelector<Language>,
    phone: TextInput,
    nickname: TextInput,
    birth_date: BirthDateInput,
    gender: OptionSelector<Gender>,
    image: ProfileImageInput,
    visit_purpose: OptionSelector<VisitPurpose>,
    registrar: Arc<dyn Registrar>,
    decoder: Arc<dyn PreviewDecoder>,
}

impl OnboardingManager {
    pub fn new(
        seed: OnboardingSeed,
        registrar: Arc<dyn Registrar>,
        decoder: Arc<dyn PreviewDecoder>,
    ) -> Self {
        let answers = OnboardingAnswers {
            language: seed.language,
            gender: seed.gender,
            visit_purpose: seed.visit_purpose,
            ..OnboardingAnswers::default()
        };

        let id = Uuid::new_v4();
        tracing::debug!(flow_id = %id, "Onboarding started");

        Self {
            id,
            started_at: Utc::now(),
            completed_at: None,
            state: OnboardingState::default(),
            language: OptionSelector::new(seed.language),
            phone: TextInput::new(TextInputKind::Phone, ""),
            nickname: TextInput::new(TextInputKind::Nickname, ""),
            birth_date: BirthDateInput::new(answers.birth_date.clone()),
            gender: OptionSelector::new(seed.gender),
            image: ProfileImageInput::default(),
            visit_purpose: OptionSelector::new(seed.visit_purpose),
            answers,
            registrar,
            decoder,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// When the last step was accepted.
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn state(&self) -> OnboardingState {
        self.state
    }

    /// Current step, `None` once completed.
    pub fn current_step(&self) -> Option<OnboardingStep> {
        self.state.step()
    }

    pub fn answers(&self) -> &OnboardingAnswers {
        &self.answers
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_terminal()
    }

    /// Whether "Next" is enabled right now.
    pub fn can_advance(&self) -> bool {
        self.state.can_advance(&self.answers)
    }

    /// Handle one user event.
    ///
    /// Events addressed to a widget other than the current step's, and any
    /// event after completion, are ignored.
    pub async fn handle(&mut self, event: OnboardingEvent) -> StepOutcome {
        let Some(step) = self.state.step() else {
            tracing::debug!(flow_id = %self.id, ?event, "Ignoring event after completion");
            return StepOutcome::default();
        };

        let mut outcome = StepOutcome::default();
        let mut submit: Option<SubmitIntent> = None;

        match (step, event) {
            (OnboardingStep::Language, OnboardingEvent::LanguageSelected(choice)) => {
                if self.language.select(choice) {
                    self.answers = self.answers.with_language(choice);
                }
            }
            (OnboardingStep::Phone, OnboardingEvent::PhoneInput(raw)) => {
                let value = self.phone.input(&raw);
                self.answers = self.answers.with_phone(value);
            }
            (OnboardingStep::Phone, OnboardingEvent::KeyEnter) => {
                submit = Some(self.phone.key_enter());
            }
            (OnboardingStep::Nickname, OnboardingEvent::NicknameInput(raw)) => {
                let value = self.nickname.input(&raw);
                self.answers = self.answers.with_nickname(value);
            }
            (OnboardingStep::Nickname, OnboardingEvent::KeyEnter) => {
                submit = Some(self.nickname.key_enter());
            }
            (OnboardingStep::BirthDate, OnboardingEvent::BirthDateInput { field, raw }) => {
                let edit = self.birth_date.edit(field, &raw);
                outcome.focus_moved_to = edit.focus_moved_to;
                self.answers = self.answers.with_birth_date(edit.value);
            }
            (OnboardingStep::BirthDate, OnboardingEvent::BirthDateFocus(field)) => {
                self.birth_date.set_focus(field);
            }
            (OnboardingStep::BirthDate, OnboardingEvent::KeyEnter) => {
                submit = self.birth_date.key_enter();
            }
            (OnboardingStep::Gender, OnboardingEvent::GenderSelected(choice)) => {
                if self.gender.select(choice) {
                    self.answers = self.answers.with_gender(choice);
                }
            }
            (OnboardingStep::ProfileImage, OnboardingEvent::OpenImageSheet) => {
                self.image.open_sheet();
            }
            (OnboardingStep::ProfileImage, OnboardingEvent::ImageSheet(option)) => {
                match self.image.choose(option) {
                    ImageAction::Nothing => {}
                    ImageAction::PickFile => outcome.pick_file = true,
                    ImageAction::UseDefault => {
                        self.answers = self.answers.with_profile_image(None);
                    }
                }
            }
            (OnboardingStep::ProfileImage, OnboardingEvent::ImagePicked(path)) => {
                let ticket = self.image.begin_decode(&path);
                outcome.decode = Some(PendingDecode { ticket, path });
            }
            (OnboardingStep::ProfileImage, OnboardingEvent::ImageDecoded { ticket, result }) => {
                if let Some(image) = self.image.finish_decode(ticket, result) {
                    self.answers = self.answers.with_profile_image(Some(image));
                }
            }
            (OnboardingStep::VisitPurpose, OnboardingEvent::VisitPurposeSelected(choice)) => {
                if self.visit_purpose.select(choice) {
                    self.answers = self.answers.with_visit_purpose(choice);
                }
            }
            (_, OnboardingEvent::Next) => {
                submit = Some(SubmitIntent);
            }
            (step, event) => {
                tracing::debug!(flow_id = %self.id, %step, ?event, "Event does not apply to current step");
            }
        }

        if submit.is_some() {
            self.try_advance(&mut outcome).await;
        }

        outcome
    }

    /// Decode a picked file. The returned future owns everything it needs, so
    /// the host may spawn it and feed the result back through [`handle`].
    ///
    /// [`handle`]: OnboardingManager::handle
    pub fn decode_task(
        &self,
        pending: PendingDecode,
    ) -> impl Future<Output = OnboardingEvent> + Send + use<> {
        let decoder = Arc::clone(&self.decoder);
        async move {
            let result = decoder.decode(&pending.path).await;
            OnboardingEvent::ImageDecoded {
                ticket: pending.ticket,
                result,
            }
        }
    }

    /// Pick a file and wait for its decode in one go.
    pub async fn pick_image(&mut self, path: PathBuf) -> StepOutcome {
        let mut outcome = self.handle(OnboardingEvent::ImagePicked(path)).await;
        match outcome.decode.take() {
            Some(pending) => {
                let decoded = self.decode_task(pending).await;
                self.handle(decoded).await
            }
            None => outcome,
        }
    }

    async fn try_advance(&mut self, outcome: &mut StepOutcome) {
        let from = self.state;
        let next = match from.advance(&self.answers) {
            Ok(next) => next,
            // Stays disabled; nothing to report.
            Err(_) => return,
        };

        self.state = next;
        outcome.advanced = true;
        tracing::info!(flow_id = %self.id, %from, to = %next, "Onboarding advanced");

        if next.is_terminal() {
            let now = Utc::now();
            self.completed_at = Some(now);
            tracing::info!(
                flow_id = %self.id,
                elapsed_secs = (now - self.started_at).num_seconds(),
                "Onboarding completed"
            );
            outcome.completed = true;
            outcome.registration = Some(self.hand_off().await);
        }
    }

    /// Give the finished answers to the registrar. Runs once, on completion.
    async fn hand_off(&self) -> Result<RegistrationReceipt, RegistrationError> {
        let result = self.registrar.register(&self.answers).await;
        match &result {
            Ok(RegistrationReceipt::Registered(user)) => {
                tracing::info!(flow_id = %self.id, user_id = user.user.id, "Onboarding handed off");
            }
            Ok(RegistrationReceipt::Recorded) => {
                tracing::info!(flow_id = %self.id, "Onboarding handed off");
            }
            Err(e) => {
                tracing::warn!(flow_id = %self.id, "Registration after onboarding failed: {}", e);
            }
        }
        result
    }

    /// Snapshot of what the current step shows, or `None` once completed.
    pub fn view(&self) -> Option<StepView> {
        let step = self.state.step()?;
        let def = step.definition();

        let mut view = StepView {
            step_number: step.index() + 1,
            step_count: STEP_COUNT,
            step,
            prompt_lines: def.prompt().lines().collect(),
            widget: def.widget,
            value: None,
            helper: None,
            has_error: false,
            options: Vec::new(),
            focus: None,
            placeholder: placeholder(step),
            sheet_open: false,
            preview: None,
            caption: None,
            can_advance: self.can_advance(),
        };

        match def.widget {
            WidgetKind::LanguageSelector => view.options = self.language.options(),
            WidgetKind::GenderSelector => view.options = self.gender.options(),
            WidgetKind::VisitPurposeSelector => view.options = self.visit_purpose.options(),
            WidgetKind::PhoneInput | WidgetKind::NicknameInput => {
                let input = if def.widget == WidgetKind::PhoneInput {
                    &self.phone
                } else {
                    &self.nickname
                };
                view.value = Some(input.value().to_string());
                view.helper = Some(input.helper());
                view.has_error = input.error().is_some();
            }
            WidgetKind::BirthDateInput => {
                let date = self.birth_date.value();
                view.value = Some(format!("{}/{}/{}", date.year, date.month, date.day));
                view.focus = Some(self.birth_date.focus().placeholder());
                view.helper = Some(BIRTH_DATE_NOTE);
            }
            WidgetKind::ProfileImageInput => {
                view.sheet_open = self.image.is_sheet_open();
                view.caption = self.image.caption();
                view.preview = Some(match self.image.preview() {
                    Preview::Placeholder => "placeholder",
                    Preview::Default => "default",
                    Preview::Picked(_) => "picked",
                });
                if let Preview::Picked(image) = self.image.preview() {
                    view.value = Some(image.file_name.clone());
                }
            }
        }

        Some(view)
    }
}
