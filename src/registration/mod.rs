//! Registration hand-off.
//!
//! When the wizard completes, the collected answers go to a [`Registrar`].
//! The backend contract is a multipart `POST /auth/register`; see
//! [`HttpRegistrar`].

pub mod http;

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

use crate::error::RegistrationError;
use crate::onboarding::model::{Choice, OnboardingAnswers};

pub use http::HttpRegistrar;

/// Receives the completed onboarding answers.
#[async_trait]
pub trait Registrar: Send + Sync {
    async fn register(
        &self,
        answers: &OnboardingAnswers,
    ) -> Result<RegistrationReceipt, RegistrationError>;
}

/// What a registrar did with the answers.
#[derive(Debug)]
pub enum RegistrationReceipt {
    /// The backend created the account.
    Registered(RegisteredUser),
    /// The answers were accepted without talking to a backend.
    Recorded,
}

/// Successful backend registration.
#[derive(Debug)]
pub struct RegisteredUser {
    pub access_token: SecretString,
    pub token_type: String,
    pub user: UserSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserSummary {
    #[serde(deserialize_with = "int_or_string")]
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

/// The backend has been seen to send numeric ids as strings.
fn int_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Int(i64),
        Str(String),
    }

    match Id::deserialize(deserializer)? {
        Id::Int(n) => Ok(n),
        Id::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Text fields of the registration form, in submission order.
///
/// Fails if a selection step was somehow left empty.
pub fn form_fields(
    answers: &OnboardingAnswers,
) -> Result<Vec<(&'static str, String)>, RegistrationError> {
    let language = answers
        .language
        .ok_or(RegistrationError::MissingAnswer("language"))?;
    let gender = answers
        .gender
        .ok_or(RegistrationError::MissingAnswer("gender"))?;
    let visit_purpose = answers
        .visit_purpose
        .ok_or(RegistrationError::MissingAnswer("visit_purpose"))?;

    Ok(vec![
        ("language", language.id().to_string()),
        ("phone", answers.phone.clone()),
        ("nickname", answers.nickname.clone()),
        ("birth_year", answers.birth_date.year.clone()),
        ("birth_month", answers.birth_date.month.clone()),
        ("birth_day", answers.birth_date.day.clone()),
        ("gender", gender.id().to_string()),
        ("visit_purpose", visit_purpose.id().to_string()),
    ])
}

/// Registrar that only logs the hand-off. Used when no sign-in credential
/// is configured.
#[derive(Debug, Default)]
pub struct LogRegistrar;

#[async_trait]
impl Registrar for LogRegistrar {
    async fn register(
        &self,
        answers: &OnboardingAnswers,
    ) -> Result<RegistrationReceipt, RegistrationError> {
        let fields = form_fields(answers)?;
        let summary: Vec<String> = fields.iter().map(|(k, v)| format!("{k}={v}")).collect();
        tracing::info!(
            fields = %summary.join(", "),
            profile_image = answers.profile_image.as_ref().map(|i| i.file_name.as_str()),
            "Registration recorded (no credential configured)"
        );
        Ok(RegistrationReceipt::Recorded)
    }
}
