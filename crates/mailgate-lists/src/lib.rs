/// Mailgate Lists - newsletter subscription proxy Lambda
///
/// Routes `POST ?action=subscribe|unsubscribe` to the Unisender classic
/// API and answers CORS preflights. Everything else is a 400.
pub mod handlers;

use lambda_http::{Body, Error, Request, Response};
use mailgate_core::client::{ListApi, ListsClient};
use mailgate_core::config::ListsConfig;
use mailgate_core::{request, response};
use std::sync::Arc;
use tracing::warn;

/// Per-process state: immutable config plus the vendor client
pub struct ListsContext {
    pub config: ListsConfig,
    pub api: Arc<dyn ListApi>,
}

impl ListsContext {
    pub fn new() -> Result<Self, Error> {
        let config = ListsConfig::from_env()?;
        let api = Arc::new(ListsClient::new(&config.api_key, &config.list_id)?);
        Ok(Self { config, api })
    }

    /// Inject an alternate vendor API (tests)
    pub fn with_api(config: ListsConfig, api: Arc<dyn ListApi>) -> Self {
        Self { config, api }
    }
}

/// Main Lambda handler - dispatches on (method, action)
pub async fn handler(ctx: Arc<ListsContext>, event: Request) -> Result<Response<Body>, Error> {
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
            "subscribe" => return handlers::subscribe(&ctx, &body).await,
            "unsubscribe" => return handlers::unsubscribe(&ctx, &body).await,
            _ => {}
        }
    }

    warn!(method = %method, action = %action, "Unknown action/method combination");
    Ok(response::error(
        &origin,
        &format!("Unknown action: {}", action),
    ))
}
