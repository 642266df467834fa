//! Error types for medidoc.

use std::path::PathBuf;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Onboarding error: {0}")]
    Onboarding(#[from] OnboardingError),

    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),

    #[error("Preview error: {0}")]
    Preview(#[from] PreviewError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors raised by the onboarding flow itself.
///
/// Input validation never produces one of these; a step that does not
/// validate simply keeps the advance action disabled.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error("Onboarding already completed")]
    AlreadyCompleted,

    #[error("Answers are incomplete: {step} does not validate")]
    Incomplete { step: String },
}

/// Errors from the external registration collaborator.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("Registration request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{detail}")]
    Rejected { status: u16, detail: String },

    #[error("Invalid response from backend: {0}")]
    InvalidResponse(String),

    #[error("Missing answer: {0}")]
    MissingAnswer(&'static str),
}

/// Errors from decoding a picked profile image into a preview.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image {path} is too large: {size} bytes > {max}")]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("{path} is not a supported image")]
    NotAnImage { path: PathBuf },
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
