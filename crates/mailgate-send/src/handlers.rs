/// Transactional operation handlers
///
/// Each operation validates its fields, makes exactly one vendor call,
/// and normalizes the vendor body into `{success: ...}` / `{error: ...}`.
/// A missing sender address is the one failure that escapes the HTTP
/// contract: it is a deployment defect, surfaced as an invocation error.
use crate::MailerContext;
use crate::template;
use lambda_http::http::StatusCode;
use lambda_http::{Body, Error, Response};
use mailgate_core::client::SendMessage;
use mailgate_core::client::mailer::MAX_TAGS;
use mailgate_core::{request, response, validation};
use serde_json::{Value, json};
use tracing::{info, warn};

/// POST ?action=send
pub async fn send(ctx: &MailerContext, body: &Value) -> Result<Response<Body>, Error> {
    let origin = &ctx.config.allowed_origins;

    let to_email = match recipient(body) {
        Ok(email) => email,
        Err(message) => return Ok(response::error(origin, message)),
    };

    let subject = match request::optional_str(body, "subject") {
        Some(subject) => subject,
        None => return Ok(response::error(origin, "Subject is required")),
    };

    let body_html = request::optional_str(body, "body_html");
    let template_id = request::optional_str(body, "template_id");
    if body_html.is_none() && template_id.is_none() {
        return Ok(response::error(
            origin,
            "Either body_html or template_id is required",
        ));
    }

    let (from_email, from_name) = resolve_sender(ctx, body);
    let message = SendMessage {
        to_email,
        to_name: request::optional_str(body, "to_name"),
        subject: Some(subject),
        body_html,
        template_id,
        substitutions: substitutions(body),
        tags: tags(body),
        from_email,
        from_name,
        ..Default::default()
    };

    dispatch(ctx, message).await
}

/// POST ?action=send-template
pub async fn send_template(ctx: &MailerContext, body: &Value) -> Result<Response<Body>, Error> {
    let origin = &ctx.config.allowed_origins;

    let to_email = match recipient(body) {
        Ok(email) => email,
        Err(message) => return Ok(response::error(origin, message)),
    };

    let template_id = match request::optional_str(body, "template_id") {
        Some(template_id) => template_id,
        None => return Ok(response::error(origin, "template_id is required")),
    };

    let subject = request::optional_str(body, "subject")
        .unwrap_or_else(|| "Notification".to_string());

    let (from_email, from_name) = resolve_sender(ctx, body);
    let message = SendMessage {
        to_email,
        to_name: request::optional_str(body, "to_name"),
        subject: Some(subject),
        template_id: Some(template_id),
        substitutions: substitutions(body),
        from_email,
        from_name,
        ..Default::default()
    };

    dispatch(ctx, message).await
}

/// POST ?action=test
///
/// Sends the built-in template with `sender_email` and `timestamp`
/// substitutions to a caller-supplied address.
pub async fn test_send(ctx: &MailerContext, body: &Value) -> Result<Response<Body>, Error> {
    let origin = &ctx.config.allowed_origins;

    let to_email = match recipient(body) {
        Ok(email) => email,
        Err(message) => return Ok(response::error(origin, message)),
    };

    let (from_email, from_name) = resolve_sender(ctx, body);
    let message = SendMessage {
        to_email,
        subject: Some(template::TEST_SUBJECT.to_string()),
        body_html: Some(template::TEST_HTML.to_string()),
        substitutions: Some(json!({
            "sender_email": from_email,
            "timestamp": template::human_timestamp(),
        })),
        from_email,
        from_name,
        ..Default::default()
    };

    dispatch(ctx, message).await
}

/// Make the vendor call and translate the uniform response shape
async fn dispatch(ctx: &MailerContext, message: SendMessage) -> Result<Response<Body>, Error> {
    let origin = &ctx.config.allowed_origins;

    let result = ctx.api.send(&message).await?;

    if let Some(error_body) = failure_of(&result) {
        warn!(error = %error_body["error"], "Vendor rejected send");
        return Ok(response::json(origin, StatusCode::BAD_REQUEST, &error_body));
    }

    let mut ok = json!({
        "success": true,
        "job_id": result.get("job_id").cloned().unwrap_or(Value::Null),
    });
    if let Some(emails) = result.get("emails") {
        ok["emails"] = emails.clone();
    }

    info!(job_id = %ok["job_id"], "Message accepted by vendor");
    Ok(response::json(origin, StatusCode::OK, &ok))
}

/// Extract the vendor failure, if any: an explicit error status, or a
/// non-empty per-recipient rejection map.
fn failure_of(result: &Value) -> Option<Value> {
    if result.get("status").and_then(Value::as_str) == Some("error") {
        let message = result
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Send failed");
        let mut body = json!({ "error": message });
        if let Some(code) = result.get("code") {
            body["code"] = code.clone();
        }
        return Some(body);
    }

    if let Some(failed) = result.get("failed_emails") {
        let rejected = failed.as_object().is_some_and(|m| !m.is_empty())
            || failed.as_array().is_some_and(|a| !a.is_empty());
        if rejected {
            return Some(json!({
                "error": "Some recipients were rejected",
                "failed_emails": failed.clone(),
            }));
        }
    }

    None
}

fn recipient(body: &Value) -> Result<String, &'static str> {
    let email =
        validation::normalize_email(body.get("to_email").and_then(Value::as_str).unwrap_or(""));
    if email.is_empty() {
        return Err("Recipient email is required");
    }
    if !validation::is_valid_recipient_email(&email) {
        return Err("Invalid recipient email");
    }
    Ok(email)
}

/// Per-request overrides win; config supplies the defaults. An empty
/// resolved sender is caught by the client as a configuration error.
fn resolve_sender(ctx: &MailerContext, body: &Value) -> (String, Option<String>) {
    let from_email = request::optional_str(body, "from_email")
        .unwrap_or_else(|| ctx.config.from_email.clone());
    let from_name = request::optional_str(body, "from_name").or_else(|| {
        (!ctx.config.from_name.is_empty()).then(|| ctx.config.from_name.clone())
    });
    (from_email, from_name)
}

fn substitutions(body: &Value) -> Option<Value> {
    body.get("substitutions").filter(|v| v.is_object()).cloned()
}

fn tags(body: &Value) -> Vec<String> {
    body.get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .take(MAX_TAGS)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
