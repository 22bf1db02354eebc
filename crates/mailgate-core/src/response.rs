/// CORS response envelope shared by both Lambda handlers
///
/// Every outward response carries the access-control headers; JSON
/// bodies additionally carry `Content-Type: application/json`.
use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use serde_json::{Value, json};

const ALLOW_METHODS: &str = "POST, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type";

/// JSON response with CORS headers
pub fn json(origin: &str, status: StatusCode, body: &Value) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("Access-Control-Allow-Origin", origin)
        .header("Access-Control-Allow-Methods", ALLOW_METHODS)
        .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// 400 response with an error message
pub fn error(origin: &str, message: &str) -> Response<Body> {
    json(origin, StatusCode::BAD_REQUEST, &json!({ "error": message }))
}

/// 400 response forwarding a vendor error message and code
pub fn error_with_code(origin: &str, message: &str, code: Option<&Value>) -> Response<Body> {
    let mut body = json!({ "error": message });
    if let Some(code) = code {
        body["code"] = code.clone();
    }
    json(origin, StatusCode::BAD_REQUEST, &body)
}

/// 204 preflight response: CORS headers, empty body, no content type
pub fn preflight(origin: &str) -> Response<Body> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Access-Control-Allow-Origin", origin)
        .header("Access-Control-Allow-Methods", ALLOW_METHODS)
        .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
        .body(Body::Empty)
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_response_headers() {
        let resp = json("*", StatusCode::OK, &json!({"success": true}));
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
        assert_eq!(resp.headers()["Access-Control-Allow-Methods"], "POST, OPTIONS");
        assert_eq!(resp.headers()["Access-Control-Allow-Headers"], "Content-Type");
        assert_eq!(resp.headers()["Content-Type"], "application/json");

        let body: Value = serde_json::from_slice(resp.body().as_ref()).unwrap();
        assert_eq!(body["success"], true);
    }

    #[test]
    fn test_error_response() {
        let resp = error("https://acme.example", "Email is required");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers()["Access-Control-Allow-Origin"],
            "https://acme.example"
        );

        let body: Value = serde_json::from_slice(resp.body().as_ref()).unwrap();
        assert_eq!(body["error"], "Email is required");
        assert!(body.get("code").is_none());
    }

    #[test]
    fn test_error_with_vendor_code() {
        let code = json!(208);
        let resp = error_with_code("*", "Subscribe failed", Some(&code));
        let body: Value = serde_json::from_slice(resp.body().as_ref()).unwrap();
        assert_eq!(body["error"], "Subscribe failed");
        assert_eq!(body["code"], 208);
    }

    #[test]
    fn test_preflight_is_empty_204() {
        let resp = preflight("*");
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
        assert!(resp.headers().get("Content-Type").is_none());
        assert!(matches!(resp.body(), Body::Empty));
    }
}
