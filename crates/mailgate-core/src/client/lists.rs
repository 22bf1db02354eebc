/// Unisender classic API client - subscription list management
///
/// Both operations are form-encoded POSTs that return a JSON body. The
/// body is handed back verbatim; interpreting the `error`/`result`
/// shape is the operation handlers' job.
use super::ListApi;
use crate::error::MailgateError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.unisender.com/ru/api";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Subscription confirmation mode (vendor `double_optin` parameter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoubleOptin {
    /// 0: send a confirmation email before activating the contact
    Confirmation,
    /// 3: add with status "new" without sending email
    #[default]
    AddAsNew,
    /// 4: auto-detect based on contact existence
    Auto,
}

impl DoubleOptin {
    /// Map a caller-supplied mode; unknown values fall back to the default.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Confirmation,
            4 => Self::Auto,
            _ => Self::AddAsNew,
        }
    }

    fn code(self) -> &'static str {
        match self {
            Self::Confirmation => "0",
            Self::AddAsNew => "3",
            Self::Auto => "4",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubscribeContact {
    /// Normalized (trimmed, lower-cased) address
    pub email: String,
    pub name: Option<String>,
    /// Target list; falls back to the configured default
    pub list_id: Option<String>,
    /// Comma-separated tag string, passed through to the vendor
    pub tags: Option<String>,
    pub double_optin: DoubleOptin,
}

#[derive(Debug, Clone)]
pub struct UnsubscribeContact {
    pub email: String,
    pub list_id: Option<String>,
}

pub struct ListsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    default_list_id: String,
    timeout: Duration,
}

impl ListsClient {
    pub fn new(api_key: &str, default_list_id: &str) -> Result<Self, MailgateError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| MailgateError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.to_string(),
            default_list_id: default_list_id.to_string(),
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Point the client at a different endpoint (tests)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn subscribe_params(&self, contact: &SubscribeContact) -> Vec<(&'static str, String)> {
        let list_id = contact
            .list_id
            .clone()
            .unwrap_or_else(|| self.default_list_id.clone());

        let mut params = vec![
            ("format", "json".to_string()),
            ("api_key", self.api_key.clone()),
            ("list_ids", list_id),
            ("fields[email]", contact.email.clone()),
            ("double_optin", contact.double_optin.code().to_string()),
            ("overwrite", "1".to_string()),
        ];
        if let Some(name) = &contact.name {
            params.push(("fields[Name]", name.clone()));
        }
        if let Some(tags) = &contact.tags {
            params.push(("tags", tags.clone()));
        }
        params
    }

    fn unsubscribe_params(&self, contact: &UnsubscribeContact) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("format", "json".to_string()),
            ("api_key", self.api_key.clone()),
            ("contact_type", "email".to_string()),
            ("contact", contact.email.clone()),
        ];
        if let Some(list_id) = &contact.list_id {
            params.push(("list_ids", list_id.clone()));
        }
        params
    }

    async fn call(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<Value, MailgateError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .post(&url)
            .form(params)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| MailgateError::Transport(format!("{} request failed: {}", path, e)))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| MailgateError::Vendor(format!("Invalid response from {}: {}", path, e)))
    }
}

#[async_trait]
impl ListApi for ListsClient {
    async fn subscribe(&self, contact: &SubscribeContact) -> Result<Value, MailgateError> {
        self.call("/subscribe", &self.subscribe_params(contact)).await
    }

    async fn unsubscribe(&self, contact: &UnsubscribeContact) -> Result<Value, MailgateError> {
        self.call("/unsubscribe", &self.unsubscribe_params(contact))
            .await
    }
}
