/// Subscription flow tests: dispatch contract plus an end-to-end
/// handler-to-vendor round trip against a mock Unisender endpoint.
use async_trait::async_trait;
use lambda_http::http::{Request as HttpRequest, StatusCode};
use lambda_http::{Body, Request, Response};
use mailgate_core::MailgateError;
use mailgate_core::client::{ListApi, ListsClient, SubscribeContact, UnsubscribeContact};
use mailgate_core::config::ListsConfig;
use mailgate_lists::{ListsContext, handler};
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct StubListApi {
    response: Value,
}

#[async_trait]
impl ListApi for StubListApi {
    async fn subscribe(&self, _contact: &SubscribeContact) -> Result<Value, MailgateError> {
        Ok(self.response.clone())
    }

    async fn unsubscribe(&self, _contact: &UnsubscribeContact) -> Result<Value, MailgateError> {
        Ok(self.response.clone())
    }
}

fn test_config() -> ListsConfig {
    ListsConfig {
        api_key: "key-123".to_string(),
        list_id: "42".to_string(),
        allowed_origins: "*".to_string(),
    }
}

fn stub_context(response: Value) -> Arc<ListsContext> {
    Arc::new(ListsContext::with_api(
        test_config(),
        Arc::new(StubListApi { response }),
    ))
}

fn request(http_method: &str, uri: &str, body: &str) -> Request {
    HttpRequest::builder()
        .method(http_method)
        .uri(uri)
        .body(Body::from(body))
        .unwrap()
}

fn body_json(resp: &Response<Body>) -> Value {
    serde_json::from_slice(resp.body().as_ref()).unwrap()
}

#[tokio::test]
async fn test_options_preflight_always_204() {
    let ctx = stub_context(json!({}));

    // action and body are irrelevant for preflight
    let resp = handler(ctx, request("OPTIONS", "/hook?action=nonsense", "garbage"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
    assert_eq!(
        resp.headers()["Access-Control-Allow-Methods"],
        "POST, OPTIONS"
    );
    assert!(matches!(resp.body(), Body::Empty));
}

#[tokio::test]
async fn test_malformed_json_is_rejected_before_routing() {
    let ctx = stub_context(json!({"result": {"person_id": 1}}));

    let resp = handler(ctx, request("POST", "/hook?action=subscribe", "{broken"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(&resp)["error"], "Invalid JSON");
}

#[tokio::test]
async fn test_unknown_action_echoes_the_action() {
    let ctx = stub_context(json!({}));

    let resp = handler(ctx, request("POST", "/hook?action=frobnicate", "{}"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(&resp)["error"], "Unknown action: frobnicate");
}

#[tokio::test]
async fn test_no_action_outside_post() {
    let ctx = stub_context(json!({}));

    // a valid action on the wrong method is still unknown
    let resp = handler(ctx, request("GET", "/hook?action=subscribe", ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(&resp)["error"], "Unknown action: subscribe");
}

#[tokio::test]
async fn test_missing_action_parameter() {
    let ctx = stub_context(json!({}));

    let resp = handler(ctx, request("POST", "/hook", "{}")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(&resp)["error"], "Unknown action: ");
}

#[tokio::test]
async fn test_subscribe_routes_and_normalizes() {
    let ctx = stub_context(json!({"result": {"person_id": 42}}));

    let resp = handler(
        ctx,
        request(
            "POST",
            "/hook?action=subscribe",
            r#"{"email": "A@Example.com"}"#,
        ),
    )
    .await
    .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(&resp);
    assert_eq!(body["success"], true);
    assert_eq!(body["person_id"], 42);
}

#[tokio::test]
async fn test_unsubscribe_not_found_maps_to_success() {
    let ctx = stub_context(json!({"error": "Email not found", "code": 204}));

    let resp = handler(
        ctx,
        request(
            "POST",
            "/hook?action=unsubscribe",
            r#"{"email": "gone@example.com"}"#,
        ),
    )
    .await
    .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(&resp);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Already unsubscribed");
}

#[tokio::test]
async fn test_end_to_end_subscribe_lowercases_before_vendor() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/subscribe"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"result": {"person_id": 42}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config();
    let client = ListsClient::new(&config.api_key, &config.list_id)
        .unwrap()
        .with_base_url(&server.uri());
    let ctx = Arc::new(ListsContext::with_api(config, Arc::new(client)));

    let resp = handler(
        ctx,
        request(
            "POST",
            "/hook?action=subscribe",
            r#"{"email": "A@Example.com"}"#,
        ),
    )
    .await
    .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(&resp)["person_id"], 42);

    let requests = server.received_requests().await.unwrap();
    let form: Vec<(String, String)> = url::form_urlencoded::parse(&requests[0].body)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert!(
        form.contains(&("fields[email]".to_string(), "a@example.com".to_string())),
        "vendor must receive the lower-cased address: {:?}",
        form
    );
}
