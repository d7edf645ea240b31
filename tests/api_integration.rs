//! HTTP API integration tests
//!
//! These tests drive the axum router directly with `oneshot`, without
//! binding a socket.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use ara_nlg_service::config::{
    ApiConfig, CatalogConfig, GeneratorConfig, ServerConfig, Settings, TelemetryConfig,
};
use ara_nlg_service::server::{create_app, AppState};
use ara_nlg_service::template::TemplateCatalog;

fn test_settings(api_key: Option<&str>) -> Settings {
    Settings {
        server: ServerConfig::default(),
        api: ApiConfig {
            key: api_key.map(str::to_string),
        },
        catalog: CatalogConfig::default(),
        generator: GeneratorConfig {
            seed: Some(5),
            ..GeneratorConfig::default()
        },
        telemetry: TelemetryConfig::default(),
    }
}

fn test_catalog() -> TemplateCatalog {
    TemplateCatalog::from_value(json!({
        "utter_greet": [
            {"text": "Hey {name}"},
            {"text": "Slack hey {name}", "channel": "slack"}
        ],
        "utter_discord_only": [
            {"text": "Discord only", "channel": "discord"}
        ],
        "utter_goodbye": {
            "en": [{"text": "Goodbye {name}"}, {"text": "Bye {name}"}]
        }
    }))
    .unwrap()
}

fn test_app(api_key: Option<&str>) -> Router {
    create_app(AppState::new(test_settings(api_key), test_catalog()))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn nlg_renders_language_variants() {
    let (status, body) = send(
        test_app(None),
        post_json(
            "/api/v1/nlg",
            json!({
                "template": "utter_goodbye",
                "arguments": {"language": "en"},
                "tracker": {"sender_id": "u1", "slots": {"name": "Ada"}},
                "channel": {"name": "web"}
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"responses": [{"text": "Goodbye Ada"}, {"text": "Bye Ada"}]})
    );
}

#[tokio::test]
async fn nlg_without_language_is_bad_request() {
    let (status, body) = send(
        test_app(None),
        post_json(
            "/api/v1/nlg",
            json!({"template": "utter_goodbye", "tracker": {"slots": {"name": "Ada"}}}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MISSING_LANGUAGE");
}

#[tokio::test]
async fn nlg_unknown_template_is_empty() {
    let (status, body) = send(
        test_app(None),
        post_json(
            "/api/v1/nlg",
            json!({"response": "utter_unknown", "arguments": {"language": "en"}}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"responses": []}));
}

#[tokio::test]
async fn nlg_random_prefers_channel_variant() {
    let (status, body) = send(
        test_app(None),
        post_json(
            "/api/v1/nlg/random",
            json!({
                "template": "utter_greet",
                "tracker": {"slots": {"name": "Ada"}},
                "arguments": {"name": "Bob"},
                "channel": {"name": "slack"}
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"response": {"text": "Slack hey Bob", "channel": "slack"}})
    );
}

#[tokio::test]
async fn nlg_random_without_eligible_variant_is_null() {
    let (status, body) = send(
        test_app(None),
        post_json(
            "/api/v1/nlg/random",
            json!({"template": "utter_discord_only", "channel": {"name": "slack"}}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"response": null}));
}

#[tokio::test]
async fn api_key_is_enforced_when_configured() {
    let request = post_json(
        "/api/v1/nlg/random",
        json!({"template": "utter_greet", "channel": {"name": "web"}}),
    );
    let (status, body) = send(test_app(Some("secret")), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let mut request = post_json(
        "/api/v1/nlg/random",
        json!({"template": "utter_greet", "channel": {"name": "web"}}),
    );
    request
        .headers_mut()
        .insert("X-API-Key", "secret".parse().unwrap());
    let (status, body) = send(test_app(Some("secret")), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["text"], "Hey {name}");
}

#[tokio::test]
async fn templates_can_be_listed_and_fetched() {
    let list = Request::builder()
        .uri("/api/v1/templates")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(test_app(None), list).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["templates"][0]["id"], "utter_discord_only");
    assert_eq!(body["templates"][1]["id"], "utter_goodbye");
    assert_eq!(body["templates"][1]["scheme"], "language");
    assert_eq!(body["templates"][1]["variants"], 2);
    assert_eq!(body["templates"][2]["scheme"], "channel");

    let get = Request::builder()
        .uri("/api/v1/templates/utter_goodbye")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(test_app(None), get).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["en"][0]["text"], "Goodbye {name}");

    let missing = Request::builder()
        .uri("/api/v1/templates/utter_nope")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(test_app(None), missing).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn health_reports_catalog_size() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(test_app(None), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["catalog"]["responses"], 3);
    assert_eq!(body["catalog"]["unresolved_policy"], "keep");
}

#[tokio::test]
async fn metrics_endpoint_exposes_render_counters() {
    let _ = send(
        test_app(None),
        post_json("/api/v1/nlg/random", json!({"template": "utter_greet"})),
    )
    .await;

    let response = test_app(None)
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("nlg_render_total"));
}
