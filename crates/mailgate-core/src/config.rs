/// Configuration - loaded once from environment variables at startup
use crate::error::MailgateError;

/// Configuration for the subscription proxy (mailgate-lists)
#[derive(Debug, Clone)]
pub struct ListsConfig {
    /// Unisender classic API key
    pub api_key: String,
    /// Default contact list id for subscribe calls
    pub list_id: String,
    /// Allowed CORS origin(s)
    pub allowed_origins: String,
}

impl ListsConfig {
    pub fn from_env() -> Result<Self, MailgateError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary lookup. Lets tests avoid process-global env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MailgateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            api_key: required(&lookup, "UNISENDER_API_KEY")?,
            list_id: required(&lookup, "UNISENDER_LIST_ID")?,
            allowed_origins: allowed_origins(&lookup),
        };

        tracing::info!("Lists configuration loaded");
        Ok(config)
    }
}

/// Configuration for the transactional proxy (mailgate-send)
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// Unisender Go API key
    pub api_key: String,
    /// Default sender address; may be overridden per request
    pub from_email: String,
    /// Default sender display name
    pub from_name: String,
    /// Allowed CORS origin(s)
    pub allowed_origins: String,
}

impl MailerConfig {
    pub fn from_env() -> Result<Self, MailgateError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, MailgateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            api_key: required(&lookup, "UNISENDER_GO_API_KEY")?,
            from_email: lookup("UNISENDER_GO_FROM_EMAIL").unwrap_or_default(),
            from_name: lookup("UNISENDER_GO_FROM_NAME").unwrap_or_default(),
            allowed_origins: allowed_origins(&lookup),
        };

        tracing::info!("Mailer configuration loaded");
        Ok(config)
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, MailgateError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(MailgateError::Config(format!("{} not configured", key))),
    }
}

fn allowed_origins<F>(lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("ALLOWED_ORIGINS")
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "*".to_string())
}
