//! Multipart registration against the backend API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::AppConfig;
use crate::error::{ConfigError, RegistrationError};
use crate::onboarding::model::OnboardingAnswers;

use super::{form_fields, RegisteredUser, Registrar, RegistrationReceipt, UserSummary};

#[derive(Deserialize)]
struct RegisterResponse {
    access_token: String,
    #[serde(default = "bearer")]
    token_type: String,
    user: UserSummary,
}

fn bearer() -> String {
    "bearer".to_string()
}

/// Posts the answers to `{api_base_url}/auth/register` as `multipart/form-data`.
pub struct HttpRegistrar {
    client: reqwest::Client,
    api_base_url: String,
    credential: SecretString,
}

impl HttpRegistrar {
    pub fn new(
        api_base_url: impl Into<String>,
        credential: SecretString,
        timeout: Duration,
    ) -> Result<Self, RegistrationError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            credential,
        })
    }

    /// Build from config. The Google credential is required.
    pub fn from_config(config: &AppConfig) -> crate::error::Result<Self> {
        let credential = config
            .google_credential
            .clone()
            .ok_or_else(|| ConfigError::MissingEnvVar("MEDIDOC_GOOGLE_CREDENTIAL".to_string()))?;

        if !config.api_base_url.starts_with("http://")
            && !config.api_base_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                key: "MEDIDOC_API_BASE_URL".to_string(),
                message: format!("expected an http(s) URL, got {}", config.api_base_url),
            }
            .into());
        }

        Ok(Self::new(
            config.api_base_url.clone(),
            credential,
            config.request_timeout,
        )?)
    }

    pub fn endpoint(&self) -> String {
        format!("{}/auth/register", self.api_base_url)
    }

    fn build_form(&self, answers: &OnboardingAnswers) -> Result<Form, RegistrationError> {
        let mut form = Form::new().text("google_token", self.credential.expose_secret().to_string());
        for (name, value) in form_fields(answers)? {
            form = form.text(name, value);
        }

        if let Some(ref image) = answers.profile_image {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(&image.media_type)?;
            form = form.part("profile_image", part);
        }

        Ok(form)
    }
}

#[async_trait]
impl Registrar for HttpRegistrar {
    async fn register(
        &self,
        answers: &OnboardingAnswers,
    ) -> Result<RegistrationReceipt, RegistrationError> {
        let form = self.build_form(answers)?;

        let resp = self
            .client
            .post(self.endpoint())
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body: serde_json::Value = resp.json().await.unwrap_or_default();
            let detail = error_detail(&body)
                .unwrap_or_else(|| format!("Registration failed: {}", status.as_u16()));
            tracing::warn!(status = status.as_u16(), %detail, "Registration rejected");
            return Err(RegistrationError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        let text = resp.text().await?;
        let parsed: RegisterResponse = serde_json::from_str(&text)
            .map_err(|e| RegistrationError::InvalidResponse(e.to_string()))?;

        tracing::info!(user_id = parsed.user.id, "User registered");

        Ok(RegistrationReceipt::Registered(RegisteredUser {
            access_token: SecretString::from(parsed.access_token),
            token_type: parsed.token_type,
            user: parsed.user,
        }))
    }
}

/// Pull a human-readable message out of an error body's `detail` field.
fn error_detail(body: &serde_json::Value) -> Option<String> {
    body.get("detail")
        .and_then(|d| d.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_has_no_double_slash() {
        let registrar = HttpRegistrar::new(
            "http://localhost:9090/api/",
            SecretString::from("t".to_string()),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(registrar.endpoint(), "http://localhost:9090/api/auth/register");
    }

    #[test]
    fn from_config_requires_credential() {
        let err = HttpRegistrar::from_config(&AppConfig::default()).err().unwrap();
        assert!(err.to_string().contains("MEDIDOC_GOOGLE_CREDENTIAL"));
    }

    #[test]
    fn from_config_rejects_non_http_base() {
        let config = AppConfig {
            api_base_url: "ftp://backend".to_string(),
            google_credential: Some(SecretString::from("t".to_string())),
            ..AppConfig::default()
        };
        let err = HttpRegistrar::from_config(&config).err().unwrap();
        assert!(err.to_string().contains("MEDIDOC_API_BASE_URL"));
    }

    #[test]
    fn detail_is_read_when_present() {
        let body = serde_json::json!({"detail": "Nickname already taken"});
        assert_eq!(error_detail(&body).as_deref(), Some("Nickname already taken"));
        assert_eq!(error_detail(&serde_json::json!({})), None);
        assert_eq!(error_detail(&serde_json::json!({"detail": [{"loc": []}]})), None);
    }
}
