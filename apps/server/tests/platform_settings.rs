mod common;

use axum::http::{header, Method, Request};
use axum::body::Body;
use common::{json_body, spawn_app};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn healthz_works_without_identity() {
    let app = spawn_app().await;
    let response = app.send(Method::GET, "/api/v1/healthz", None, None).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn platform_settings_require_identity() {
    let app = spawn_app().await;
    let response = app
        .send(Method::GET, "/api/v1/platform-settings", None, None)
        .await;
    assert_eq!(response.status(), 401);
    let body = json_body(response).await;
    assert_eq!(body["code"], 401);
}

#[tokio::test]
async fn bearer_header_is_accepted() {
    let app = spawn_app().await;
    let request = Request::builder()
        .uri("/api/v1/platform-settings")
        .header(
            header::AUTHORIZATION,
            format!("Bearer {}", app.token_for("alice")),
        )
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn listing_returns_seeded_catalog_and_own_profiles() {
    let app = spawn_app().await;

    let created = app
        .send(
            Method::POST,
            "/api/v1/platform-settings",
            Some("alice"),
            Some(json!({
                "platformName": "Contra",
                "platformFeePercentage": 0,
                "platformToLocalBank": { "amount": 2, "currency": "dollars" }
            })),
        )
        .await;
    assert_eq!(created.status(), 200);
    let created = json_body(created).await;
    assert_eq!(created["isCustom"], true);
    assert_eq!(created["ownerScope"]["kind"], "user");
    assert_eq!(created["ownerScope"]["userId"], "alice");

    let listing = json_body(
        app.send(Method::GET, "/api/v1/platform-settings", Some("alice"), None)
            .await,
    )
    .await;
    assert_eq!(listing["wellKnown"].as_array().unwrap().len(), 5);
    assert_eq!(listing["custom"].as_array().unwrap().len(), 1);
    assert_eq!(listing["custom"][0]["platformName"], "Contra");

    let bobs_listing = json_body(
        app.send(Method::GET, "/api/v1/platform-settings", Some("bob"), None)
            .await,
    )
    .await;
    assert!(bobs_listing["custom"].as_array().unwrap().is_empty());
    assert_eq!(bobs_listing["wellKnown"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn user_profile_shadows_well_known_for_that_user_only() {
    let app = spawn_app().await;

    let response = app
        .send(
            Method::POST,
            "/api/v1/platform-settings",
            Some("alice"),
            Some(json!({ "platformName": "Fiverr", "platformFeePercentage": 5 })),
        )
        .await;
    assert_eq!(response.status(), 200);

    let alices = json_body(
        app.send(
            Method::GET,
            "/api/v1/platform-settings/effective/Fiverr",
            Some("alice"),
            None,
        )
        .await,
    )
    .await;
    assert_eq!(alices["isCustom"], true);
    assert_eq!(alices["platformFeePercentage"], 5.0);

    let bobs = json_body(
        app.send(
            Method::GET,
            "/api/v1/platform-settings/effective/Fiverr",
            Some("bob"),
            None,
        )
        .await,
    )
    .await;
    assert_eq!(bobs["isCustom"], false);
    assert_eq!(bobs["platformFeePercentage"], 20.0);

    let missing = app
        .send(
            Method::GET,
            "/api/v1/platform-settings/effective/Nowhere",
            Some("bob"),
            None,
        )
        .await;
    assert_eq!(missing.status(), 404);
}

#[tokio::test]
async fn invalid_profile_is_rejected_with_field_reason() {
    let app = spawn_app().await;
    let response = app
        .send(
            Method::POST,
            "/api/v1/platform-settings",
            Some("alice"),
            Some(json!({ "platformName": "Greedy", "platformFeePercentage": 150 })),
        )
        .await;
    assert_eq!(response.status(), 400);
    let body = json_body(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("platformFeePercentage"));
}

#[tokio::test]
async fn deleting_well_known_is_forbidden() {
    let app = spawn_app().await;
    let fiverr = json_body(
        app.send(
            Method::GET,
            "/api/v1/platform-settings/effective/Fiverr",
            Some("alice"),
            None,
        )
        .await,
    )
    .await;
    let id = fiverr["id"].as_str().unwrap();

    let response = app
        .send(
            Method::DELETE,
            &format!("/api/v1/platform-settings/{}", id),
            Some("alice"),
            None,
        )
        .await;
    assert_eq!(response.status(), 400);
    let body = json_body(response).await;
    assert_eq!(body["message"], "cannot delete well-known platform settings");
}

#[tokio::test]
async fn custom_profiles_are_private_to_their_owner() {
    let app = spawn_app().await;
    let created = json_body(
        app.send(
            Method::POST,
            "/api/v1/platform-settings",
            Some("alice"),
            Some(json!({ "platformName": "Malt", "platformFeePercentage": 10 })),
        )
        .await,
    )
    .await;
    let uri = format!("/api/v1/platform-settings/{}", created["id"].as_str().unwrap());

    let peek = app.send(Method::GET, &uri, Some("bob"), None).await;
    assert_eq!(peek.status(), 404);
    let steal = app.send(Method::DELETE, &uri, Some("bob"), None).await;
    assert_eq!(steal.status(), 404);

    let own = app.send(Method::GET, &uri, Some("alice"), None).await;
    assert_eq!(own.status(), 200);
    let deleted = app.send(Method::DELETE, &uri, Some("alice"), None).await;
    assert_eq!(deleted.status(), 200);
    assert!(json_body(deleted).await["message"].is_string());

    let gone = app.send(Method::GET, &uri, Some("alice"), None).await;
    assert_eq!(gone.status(), 404);
}

#[tokio::test]
async fn quote_applies_the_effective_fee_chain() {
    let app = spawn_app().await;
    let response = app
        .send(
            Method::POST,
            "/api/v1/platform-settings/quote",
            Some("alice"),
            Some(json!({
                "platformName": "Fiverr",
                "amount": 100,
                "currency": "dollars"
            })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = json_body(response).await;
    assert_eq!(body["breakdown"]["net"], 76.0);
    assert_eq!(body["breakdown"]["totalFees"], 24.0);
    assert_eq!(body["formatted"]["net"], "$76");
    assert!(body["breakdown"].get("caution").is_none());
}

#[tokio::test]
async fn quote_beyond_decimal_range_is_a_bad_request() {
    let app = spawn_app().await;
    let response = app
        .send(
            Method::POST,
            "/api/v1/platform-settings/quote",
            Some("alice"),
            Some(json!({
                "platformName": "Fiverr",
                "amount": 7e28,
                "currency": "dollars"
            })),
        )
        .await;
    assert_eq!(response.status(), 400);
    assert_eq!(json_body(response).await["code"], 400);
}

#[tokio::test]
async fn malformed_profile_body_is_rejected_with_error_body() {
    let app = spawn_app().await;
    let response = app
        .send(
            Method::POST,
            "/api/v1/platform-settings",
            Some("alice"),
            Some(json!({
                "platformName": "Contra",
                "platformFeePercentage": 0,
                "platformToLocalBank": { "amount": 2, "currency": "yen" }
            })),
        )
        .await;
    assert_eq!(response.status(), 400);
    let body = json_body(response).await;
    assert_eq!(body["code"], 400);
    assert!(body["message"].is_string());
}
