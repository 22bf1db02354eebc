/// Inbound event helpers: action routing parameter and JSON body
use crate::error::MailgateError;
use lambda_http::Request;
use serde_json::{Value, json};

/// Extract the `action` query parameter, percent-decoded. Missing
/// query strings and missing parameters both yield an empty string.
pub fn action(event: &Request) -> String {
    event
        .uri()
        .query()
        .and_then(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "action")
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or_default()
}

/// Parse the request body as a JSON object. An empty body is treated
/// as `{}`; anything unparseable is a validation error.
pub fn parse_body(event: &Request) -> Result<Value, MailgateError> {
    let raw = event.body().as_ref();
    if raw.is_empty() {
        return Ok(json!({}));
    }
    serde_json::from_slice(raw)
        .map_err(|_| MailgateError::Validation("Invalid JSON".to_string()))
}

/// Field accessor: trimmed string, `None` when absent or blank
pub fn optional_str(body: &Value, field: &str) -> Option<String> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_http::Body;
    use lambda_http::http::Request as HttpRequest;

    fn request(uri: &str, body: &str) -> Request {
        HttpRequest::builder()
            .method("POST")
            .uri(uri)
            .body(Body::from(body))
            .unwrap()
    }

    #[test]
    fn test_action_from_query() {
        let event = request("https://gw.example/hook?action=subscribe", "{}");
        assert_eq!(action(&event), "subscribe");
    }

    #[test]
    fn test_action_percent_decoded() {
        let event = request("https://gw.example/hook?action=send%2Dtemplate", "{}");
        assert_eq!(action(&event), "send-template");
    }

    #[test]
    fn test_action_missing() {
        let event = request("https://gw.example/hook", "{}");
        assert_eq!(action(&event), "");
    }

    #[test]
    fn test_parse_body_empty_is_object() {
        let event = HttpRequest::builder()
            .method("POST")
            .uri("https://gw.example/hook")
            .body(Body::Empty)
            .unwrap();
        let body = parse_body(&event).unwrap();
        assert!(body.as_object().unwrap().is_empty());
    }

    #[test]
    fn test_parse_body_malformed() {
        let event = request("https://gw.example/hook", "{not json");
        let err = parse_body(&event).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Invalid JSON");
    }

    #[test]
    fn test_optional_str_trims_and_drops_blank() {
        let body = json!({"name": "  Ada  ", "tags": "", "list_id": 7});
        assert_eq!(optional_str(&body, "name").as_deref(), Some("Ada"));
        assert_eq!(optional_str(&body, "tags"), None);
        // non-string values are ignored rather than coerced
        assert_eq!(optional_str(&body, "list_id"), None);
        assert_eq!(optional_str(&body, "missing"), None);
    }
}
