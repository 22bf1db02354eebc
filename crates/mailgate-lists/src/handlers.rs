/// Subscription operation handlers
///
/// Each operation validates its fields, makes exactly one vendor call,
/// and normalizes the vendor body into `{success: ...}` / `{error: ...}`.
use crate::ListsContext;
use lambda_http::http::StatusCode;
use lambda_http::{Body, Error, Response};
use mailgate_core::client::{DoubleOptin, SubscribeContact, UnsubscribeContact};
use mailgate_core::{request, response, validation};
use serde_json::{Value, json};
use tracing::{info, warn};

/// POST ?action=subscribe
pub async fn subscribe(ctx: &ListsContext, body: &Value) -> Result<Response<Body>, Error> {
    let origin = &ctx.config.allowed_origins;

    let email =
        validation::normalize_email(body.get("email").and_then(Value::as_str).unwrap_or(""));
    if email.is_empty() {
        return Ok(response::error(origin, "Email is required"));
    }
    if !validation::is_valid_contact_email(&email) {
        return Ok(response::error(origin, "Invalid email format"));
    }

    let contact = SubscribeContact {
        email,
        name: request::optional_str(body, "name"),
        list_id: request::optional_str(body, "list_id"),
        tags: request::optional_str(body, "tags"),
        double_optin: body
            .get("double_optin")
            .and_then(Value::as_i64)
            .map(DoubleOptin::from_code)
            .unwrap_or_default(),
    };

    let result = ctx.api.subscribe(&contact).await?;

    if let Some(error) = result.get("error") {
        let message = error.as_str().unwrap_or("Subscribe failed");
        warn!(code = ?result.get("code"), "Vendor rejected subscribe");
        return Ok(response::error_with_code(origin, message, result.get("code")));
    }

    let person_id = result
        .pointer("/result/person_id")
        .cloned()
        .unwrap_or(Value::Null);
    info!(person_id = %person_id, "Contact subscribed");
    Ok(response::json(
        origin,
        StatusCode::OK,
        &json!({ "success": true, "person_id": person_id }),
    ))
}

/// POST ?action=unsubscribe
pub async fn unsubscribe(ctx: &ListsContext, body: &Value) -> Result<Response<Body>, Error> {
    let origin = &ctx.config.allowed_origins;

    let email =
        validation::normalize_email(body.get("email").and_then(Value::as_str).unwrap_or(""));
    if email.is_empty() {
        return Ok(response::error(origin, "Email is required"));
    }

    let contact = UnsubscribeContact {
        email,
        list_id: request::optional_str(body, "list_id"),
    };

    let result = ctx.api.unsubscribe(&contact).await?;

    if let Some(error) = result.get("error") {
        let message = error.as_str().unwrap_or("Unsubscribe failed");

        // unsubscribing an absent contact is idempotent, not a failure
        if message.to_lowercase().contains("not found") {
            info!("Contact already unsubscribed");
            return Ok(response::json(
                origin,
                StatusCode::OK,
                &json!({ "success": true, "message": "Already unsubscribed" }),
            ));
        }

        warn!(code = ?result.get("code"), "Vendor rejected unsubscribe");
        return Ok(response::error_with_code(origin, message, result.get("code")));
    }

    info!("Contact unsubscribed");
    Ok(response::json(
        origin,
        StatusCode::OK,
        &json!({ "success": true }),
    ))
}
