// (C) Coralbits SL 2025
// This file is part of Techlabs Pages and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use std::sync::Arc;

use ctor::ctor;
use poem::{
    http::{header::AUTHORIZATION, Method, StatusCode, Uri},
    Endpoint, Request, Response,
};
use serde_json::{json, Value};

use crate::config::{Config, ConfigManager};
use crate::page::{Page, PageResource};
use crate::server::build_app;
use crate::store::MemoryStore;
use crate::utils::setup_logging;

#[ctor]
fn setup_logging_() {
    setup_logging(true);
}

async fn fixture() -> (Arc<ConfigManager>, impl Endpoint) {
    let store = MemoryStore::new("memory", "https://example.com/uploads");
    store
        .insert(
            Page::new(5)
                .with_title("<b>Hello &amp; World</b>")
                .with_content("<p>Body &#38; text</p>"),
        )
        .await;
    store
        .insert(Page::new(9).with_title("Pictured").with_thumbnail("9.png"))
        .await;

    let mut config = Config::empty();
    config.auth.tokens = vec!["secret".to_string()];
    let config = Arc::new(ConfigManager::with_config(config));

    let app = build_app("tech-labs/v1", config.clone(), PageResource::new(Arc::new(store)));
    (config, app)
}

fn get(path: &'static str) -> Request {
    Request::builder().uri(Uri::from_static(path)).finish()
}

fn get_authenticated(path: &'static str) -> Request {
    Request::builder()
        .uri(Uri::from_static(path))
        .header(AUTHORIZATION, "Bearer secret")
        .finish()
}

async fn json_body(response: Response) -> Value {
    response.into_body().into_json::<Value>().await.unwrap()
}

#[tokio::test]
async fn test_get_existing_page() {
    let (_config, app) = fixture().await;
    let response = app.get_response(get("/tech-labs/v1/pages/5")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"id": 5, "title": "Hello World", "content": "Body text", "future_image": null})
    );

    let response = app.get_response(get("/tech-labs/v1/pages/9")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["future_image"], "https://example.com/uploads/9.png");
}

#[tokio::test]
async fn test_get_missing_page_is_empty() {
    let (_config, app) = fixture().await;
    let response = app.get_response(get("/tech-labs/v1/pages/999999")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));

    let response = app
        .get_response(get("/tech-labs/v1/pages/123456789012345678901234567890"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn test_non_numeric_id_has_no_route() {
    let (_config, app) = fixture().await;
    let response = app.get_response(get("/tech-labs/v1/pages/abc")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["code"], "rest_no_route");
}

#[tokio::test]
async fn test_read_gate_closed() {
    let (config, app) = fixture().await;
    config.set_close_json_pages(true).await;

    let response = app.get_response(get("/tech-labs/v1/pages/5")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        json_body(response).await,
        json!({
            "code": "rest_forbidden",
            "message": "You cannot view the page resource.",
            "data": {"status": 401},
        })
    );

    let response = app
        .get_response(get_authenticated("/tech-labs/v1/pages/5"))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["code"], "rest_forbidden");
    assert_eq!(body["data"]["status"], 403);

    // the gate is read per request
    config.set_close_json_pages(false).await;
    let response = app.get_response(get("/tech-labs/v1/pages/5")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_read_gate_open_for_authenticated() {
    let (_config, app) = fixture().await;
    let response = app
        .get_response(get_authenticated("/tech-labs/v1/pages/5"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["id"], 5);
}

#[tokio::test]
async fn test_options_returns_schema() {
    let (config, app) = fixture().await;
    // the schema stays readable while the gate is closed
    config.set_close_json_pages(true).await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri(Uri::from_static("/tech-labs/v1/pages/5"))
        .finish();
    let response = app.get_response(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let schema = json_body(response).await;
    assert_eq!(schema["$schema"], "http://json-schema.org/draft-04/schema#");
    assert_eq!(schema["title"], "page");
    assert_eq!(schema["properties"]["id"]["type"], "integer");
    assert_eq!(schema["properties"]["future_image"]["type"], "array");
}

#[tokio::test]
async fn test_trailing_slash() {
    let (_config, app) = fixture().await;
    let response = app.get_response(get("/tech-labs/v1/pages/5/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["title"], "Hello World");
}

#[tokio::test]
async fn test_unknown_namespace() {
    let (_config, app) = fixture().await;
    let response = app.get_response(get("/wp/v2/pages/5")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
