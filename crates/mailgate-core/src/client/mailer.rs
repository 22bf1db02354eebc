/// Unisender Go API client - transactional sending
///
/// One JSON POST per send, authenticated with an API-key header.
/// Transport failures are folded into a vendor-shaped error payload so
/// callers inspect a single response shape regardless of whether the
/// vendor rejected the message or the wire did.
use super::MailerApi;
use crate::error::MailgateError;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://go1.unisender.ru/ru/transactional/api/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The vendor caps tag lists; anything beyond this is dropped.
pub const MAX_TAGS: usize = 4;

/// One transactional message: a single recipient plus message content.
/// Exactly one of `body_html` / `template_id` carries the content.
#[derive(Debug, Clone)]
pub struct SendMessage {
    pub to_email: String,
    pub to_name: Option<String>,
    pub subject: Option<String>,
    pub body_html: Option<String>,
    pub template_id: Option<String>,
    /// Per-recipient substitution variables (string map)
    pub substitutions: Option<Value>,
    pub tags: Vec<String>,
    /// Resolved sender; empty means the deployment never configured one
    pub from_email: String,
    pub from_name: Option<String>,
    pub track_links: bool,
    pub track_read: bool,
}

impl Default for SendMessage {
    fn default() -> Self {
        Self {
            to_email: String::new(),
            to_name: None,
            subject: None,
            body_html: None,
            template_id: None,
            substitutions: None,
            tags: vec![],
            from_email: String::new(),
            from_name: None,
            track_links: true,
            track_read: true,
        }
    }
}

impl SendMessage {
    /// Build the vendor wire payload. Fails only on a missing sender,
    /// which is a deployment defect rather than a caller mistake.
    pub fn payload(&self) -> Result<Value, MailgateError> {
        if self.from_email.is_empty() {
            return Err(MailgateError::Config(
                "Sender email not configured (UNISENDER_GO_FROM_EMAIL)".to_string(),
            ));
        }

        let mut recipient = json!({ "email": self.to_email });
        if let Some(name) = &self.to_name {
            recipient["name"] = json!(name);
        }
        if let Some(substitutions) = &self.substitutions {
            recipient["substitutions"] = substitutions.clone();
        }

        let mut message = json!({
            "recipients": [recipient],
            "from_email": self.from_email,
            "track_links": i32::from(self.track_links),
            "track_read": i32::from(self.track_read),
        });
        if let Some(from_name) = &self.from_name {
            message["from_name"] = json!(from_name);
        }
        if let Some(subject) = &self.subject {
            message["subject"] = json!(subject);
        }
        if let Some(html) = &self.body_html {
            message["body"] = json!({ "html": html });
        }
        if let Some(template_id) = &self.template_id {
            message["template_id"] = json!(template_id);
        }
        if !self.tags.is_empty() {
            let tags: Vec<&String> = self.tags.iter().take(MAX_TAGS).collect();
            message["tags"] = json!(tags);
        }

        Ok(json!({ "message": message }))
    }
}

pub struct MailerClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl MailerClient {
    pub fn new(api_key: &str) -> Result<Self, MailgateError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| MailgateError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.to_string(),
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Point the client at a different endpoint (tests)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Override the request timeout (tests)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl MailerApi for MailerClient {
    async fn send(&self, message: &SendMessage) -> Result<Value, MailgateError> {
        let payload = message.payload()?;
        let url = format!("{}/email/send.json", self.base_url);

        let response = match self
            .http
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Transport failure reaching mail service");
                return Ok(transport_failure(&e));
            }
        };

        // the vendor reports failures in the body, not the status line
        match response.json::<Value>().await {
            Ok(body) => Ok(body),
            Err(e) => {
                warn!(error = %e, "Unparseable response from mail service");
                Ok(json!({
                    "status": "error",
                    "message": format!("Invalid response from mail service: {}", e),
                }))
            }
        }
    }
}

/// Convert a transport-level failure into the vendor error shape.
/// Distinct causes keep distinct messages for operators.
fn transport_failure(error: &reqwest::Error) -> Value {
    let message = if error.is_timeout() {
        "Request to mail service timed out".to_string()
    } else if error.is_connect() {
        "Failed to connect to mail service".to_string()
    } else {
        format!("Request to mail service failed: {}", error)
    };
    json!({ "status": "error", "message": message })
}
