//! Onboarding core for the medidoc medical document assistant.

pub mod config;
pub mod error;
pub mod onboarding;
pub mod registration;
