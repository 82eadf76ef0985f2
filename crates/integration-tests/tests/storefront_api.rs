//! Public content endpoints.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::{StatusCode, header};
use serde_json::json;

use kynship_core::settings::keys;
use kynship_integration_tests::{TestStores, json_body, send, storefront_app};

#[tokio::test]
async fn test_site_view_from_defaults() {
    let stores = TestStores::new();
    stores.load().await;
    let app = storefront_app(&stores);

    let response = send(&app, "GET", "/api/site", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["header"]["name"], "kynship");
    assert!(body["header"]["logo"].is_null());
    assert!(body["intro_video"].is_null());
}

#[tokio::test]
async fn test_site_view_follows_stored_settings() {
    let stores = TestStores::new();
    stores.backend.seed_setting(keys::SITE_LOGO, json!("/brand.png"));
    stores.backend.seed_setting(keys::INSTAGRAM_URL, json!(""));
    stores.backend.seed_setting(keys::INTRO_VIDEO_ENABLED, json!(true));
    stores
        .backend
        .seed_setting(keys::INTRO_VIDEO_URL, json!("https://youtu.be/abc123"));
    stores.load().await;
    let app = storefront_app(&stores);

    let body = json_body(send(&app, "GET", "/api/site", None, None).await).await;

    assert_eq!(body["header"]["logo"]["src"], "/brand.png");
    assert_eq!(body["intro_video"]["youtube_id"], "abc123");
    let networks: Vec<_> = body["footer"]["social"]
        .as_array()
        .unwrap()
        .iter()
        .map(|link| link["network"].as_str().unwrap().to_string())
        .collect();
    assert!(!networks.contains(&"instagram".to_string()));
}

#[tokio::test]
async fn test_home_view_merges_stored_hero() {
    let stores = TestStores::new();
    stores
        .backend
        .seed_page("home", json!({"hero": {"title": "X"}}), true);
    stores.load().await;
    let app = storefront_app(&stores);

    let body = json_body(send(&app, "GET", "/api/home", None, None).await).await;

    assert_eq!(body["hero"]["title"], "X");
    assert_eq!(body["stats"][0]["value"], 15);
    assert_eq!(body["stats"][1]["value"], 5000);
    assert_eq!(body["stats"][1]["suffix"], "+");
}

#[tokio::test]
async fn test_page_content_is_tagged() {
    let stores = TestStores::new();
    stores.load().await;
    let app = storefront_app(&stores);

    let body = json_body(send(&app, "GET", "/api/pages/faq", None, None).await).await;

    assert_eq!(body["page"], "faq");
    assert_eq!(body["hero"]["title"], "الأسئلة الشائعة");
}

#[tokio::test]
async fn test_unknown_page_is_not_found() {
    let app = storefront_app(&TestStores::new());

    let response = send(&app, "GET", "/api/pages/blog", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_security_headers() {
    let app = storefront_app(&TestStores::new());

    let response = send(&app, "GET", "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
    assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
}

#[tokio::test]
async fn test_writes_are_not_routed() {
    let stores = TestStores::new();
    let app = storefront_app(&stores);

    let response = send(&app, "PUT", "/api/pages/home", None, Some(json!({}))).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(stores.backend.page_upserts(), 0);
}
