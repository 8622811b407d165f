//! Secrets resolved from the process environment.

use crate::error::HwError;

/// Review API OAuth token.
pub const PRACTICUM_TOKEN_VAR: &str = "TOKEN_YA_PRACT";
/// Telegram bot token.
pub const TELEGRAM_TOKEN_VAR: &str = "TOKEN_TELEGA";
/// Telegram chat that receives notifications.
pub const TELEGRAM_CHAT_ID_VAR: &str = "TOKEN_TELEGA_CHAT";

/// The three required secrets, each possibly absent.
#[derive(Clone, Default)]
pub struct Secrets {
    pub practicum_token: Option<String>,
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl Secrets {
    /// Read the secrets from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the secrets through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            practicum_token: lookup(PRACTICUM_TOKEN_VAR),
            telegram_token: lookup(TELEGRAM_TOKEN_VAR),
            telegram_chat_id: lookup(TELEGRAM_CHAT_ID_VAR),
        }
    }

    /// Names of the variables that are absent or empty.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (PRACTICUM_TOKEN_VAR, &self.practicum_token),
            (TELEGRAM_TOKEN_VAR, &self.telegram_token),
            (TELEGRAM_CHAT_ID_VAR, &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| !is_set(value))
        .map(|(name, _)| name)
        .collect()
    }

    /// Convert into credentials, failing on the first missing variable.
    pub fn into_credentials(self) -> Result<Credentials, HwError> {
        fn required(value: Option<String>, name: &str) -> Result<String, HwError> {
            match value {
                Some(v) if !v.is_empty() => Ok(v),
                _ => Err(HwError::Config(format!(
                    "missing required environment variable {name}"
                ))),
            }
        }

        Ok(Credentials {
            practicum_token: required(self.practicum_token, PRACTICUM_TOKEN_VAR)?,
            telegram_token: required(self.telegram_token, TELEGRAM_TOKEN_VAR)?,
            telegram_chat_id: required(self.telegram_chat_id, TELEGRAM_CHAT_ID_VAR)?,
        })
    }
}

// Secrets never reach logs.
impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("practicum_token", &mask(&self.practicum_token))
            .field("telegram_token", &mask(&self.telegram_token))
            .field("telegram_chat_id", &mask(&self.telegram_chat_id))
            .finish()
    }
}

/// Token gate: true iff all three secrets are present and non-empty.
pub fn check_tokens(secrets: &Secrets) -> bool {
    is_set(&secrets.practicum_token)
        && is_set(&secrets.telegram_token)
        && is_set(&secrets.telegram_chat_id)
}

/// Validated secrets, ready to hand to the API client and the notifier.
#[derive(Clone)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish_non_exhaustive()
    }
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

fn mask(value: &Option<String>) -> &'static str {
    if is_set(value) {
        "<set>"
    } else {
        "<missing>"
    }
}
