//! API credential resolution.
//!
//! The override supplied with a request wins over the process environment.
//! Resolution happens once per request, before any completion client exists.

use std::fmt;

use crate::errors::AppError;

pub const API_KEY_ENV: &str = "DEEPSEEK_API_KEY";

/// A non-blank bearer token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` for blank input.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Picks the override if present, else the environment value.
/// Blank values count as absent.
pub fn resolve_api_key(
    override_key: Option<&str>,
    environment_key: Option<&str>,
) -> Result<ApiKey, AppError> {
    override_key
        .and_then(ApiKey::new)
        .or_else(|| environment_key.and_then(ApiKey::new))
        .ok_or(AppError::CredentialMissing)
}
