/// Mailgate Send - transactional email proxy Lambda
///
/// Routes `POST ?action=send|send-template|test` to the Unisender Go
/// API and answers CORS preflights. Everything else is a 400.
pub mod handlers;
pub mod template;

use lambda_http::{Body, Error, Request, Response};
use mailgate_core::client::{MailerApi, MailerClient};
use mailgate_core::config::MailerConfig;
use mailgate_core::{request, response};
use std::sync::Arc;
use tracing::warn;

/// Per-process state: immutable config plus the vendor client
pub struct MailerContext {
    pub config: MailerConfig,
    pub api: Arc<dyn MailerApi>,
}

impl MailerContext {
    pub fn new() -> Result<Self, Error> {
        let config = MailerConfig::from_env()?;
        let api = Arc::new(MailerClient::new(&config.api_key)?);
        Ok(Self { config, api })
    }

    /// Inject an alternate vendor API (tests)
    pub fn with_api(config: MailerConfig, api: Arc<dyn MailerApi>) -> Self {
        Self { config, api }
    }
}

/// Main Lambda handler - dispatches on (method, action)
pub async fn handler(ctx: Arc<MailerContext>, event: Request) -> Result<Response<Body>, Error> {
    let origin = ctx.config.allowed_origins.clone();
    let method = event.method().as_str().to_string();

    // Preflight short-circuits before any action routing
    if method == "OPTIONS" {
        return Ok(response::preflight(&origin));
    }

    let action = request::action(&event);

    if method == "POST" {
        let body = match request::parse_body(&event) {
            Ok(body) => body,
            Err(_) => {
                warn!("Rejected request with malformed JSON body");
                return Ok(response::error(&origin, "Invalid JSON"));
            }
        };

        match action.as_str() {
            "send" => return handlers::send(&ctx, &body).await,
            "send-template" => return handlers::send_template(&ctx, &body).await,
            "test" => return handlers::test_send(&ctx, &body).await,
            _ => {}
        }
    }

    warn!(method = %method, action = %action, "Unknown action/method combination");
    Ok(response::error(
        &origin,
        &format!("Unknown action: {}", action),
    ))
}
