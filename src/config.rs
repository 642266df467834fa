//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

/// Default backend API base, matching the local development server.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:9090/api";

/// Default upper bound for a profile image read from disk (10 MiB).
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// Application configuration, built from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the backend API, without a trailing slash.
    pub api_base_url: String,
    /// Google ID token obtained at sign-in. Registration is skipped without it.
    pub google_credential: Option<SecretString>,
    /// Largest profile image accepted by the preview decoder.
    pub max_image_bytes: u64,
    /// Timeout for the registration request.
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            google_credential: None,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl AppConfig {
    /// Build config from environment variables.
    ///
    /// Unparseable numeric values fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = lookup("MEDIDOC_API_BASE_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.api_base_url);

        let google_credential = lookup("MEDIDOC_GOOGLE_CREDENTIAL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(SecretString::from);

        let max_image_bytes: u64 = lookup("MEDIDOC_MAX_IMAGE_BYTES")
            .and_then(|s| s.trim().parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_image_bytes);

        let request_timeout = lookup("MEDIDOC_REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|n| *n > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        Self {
            api_base_url,
            google_credential,
            max_image_bytes,
            request_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert!(config.google_credential.is_none());
        assert_eq!(config.max_image_bytes, DEFAULT_MAX_IMAGE_BYTES);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn values_are_read_and_trimmed() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("MEDIDOC_API_BASE_URL", " https://medidoc.example/api/ "),
            ("MEDIDOC_GOOGLE_CREDENTIAL", "id-token"),
            ("MEDIDOC_MAX_IMAGE_BYTES", "2048"),
            ("MEDIDOC_REQUEST_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(config.api_base_url, "https://medidoc.example/api");
        assert_eq!(
            config.google_credential.as_ref().map(|s| s.expose_secret()),
            Some("id-token")
        );
        assert_eq!(config.max_image_bytes, 2048);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn bad_numbers_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("MEDIDOC_MAX_IMAGE_BYTES", "lots"),
            ("MEDIDOC_REQUEST_TIMEOUT_SECS", "-1"),
            ("MEDIDOC_GOOGLE_CREDENTIAL", "   "),
        ]));
        assert_eq!(config.max_image_bytes, DEFAULT_MAX_IMAGE_BYTES);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.google_credential.is_none());
    }

    #[test]
    fn zero_values_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("MEDIDOC_MAX_IMAGE_BYTES", "0"),
            ("MEDIDOC_REQUEST_TIMEOUT_SECS", "0"),
        ]));
        assert_eq!(config.max_image_bytes, DEFAULT_MAX_IMAGE_BYTES);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
