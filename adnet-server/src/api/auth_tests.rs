use axum::http::{header, HeaderValue, StatusCode};
use serde_json::{json, Value};

use adnet_types::AuthConfig;

use crate::state::AppState;
use crate::test_helpers::{
    aa_record, api_key, test_app_state, test_server, DASHBOARD_KEY, PROCESSING_KEY,
};

#[tokio::test]
async fn test_list_requires_key() {
    let server = test_server(test_app_state());
    server.get("/ads").await.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_rejects_unknown_key() {
    let server = test_server(test_app_state());
    let (name, value) = api_key("not-a-real-key");
    server.get("/ads").add_header(name, value).await.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_rejects_processing_key() {
    let server = test_server(test_app_state());
    let (name, value) = api_key(PROCESSING_KEY);
    server.get("/ads").add_header(name, value).await.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_rejects_dashboard_key() {
    let state = test_app_state();
    let server = test_server(state.clone());
    let (name, value) = api_key(DASHBOARD_KEY);

    server
        .put("/ads")
        .add_header(name, value)
        .json(&json!({ "AA": aa_record() }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
    assert!(state.service().list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_without_key_is_unauthorized() {
    let server = test_server(test_app_state());
    server.put("/ads").json(&json!({})).await.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_dashboard_bearer_key_lists_raw_records() {
    let state = test_app_state();
    let server = test_server(state.clone());
    let (name, value) = api_key(PROCESSING_KEY);
    server
        .put("/ads")
        .add_header(name, value)
        .json(&json!({ "CN": {
            "banner": ["Facebook", "AdMob"],
            "interstitial": ["Facebook"],
            "rewarded": ["Facebook"]
        }}))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = server
        .get("/ads")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {DASHBOARD_KEY}")).unwrap(),
        )
        .await;
    response.assert_status_ok();

    // Raw records: the CN filter is not applied on the listing path.
    let body: Value = response.json();
    assert_eq!(body["CN"]["banner"], json!(["Facebook", "AdMob"]));
}

#[tokio::test]
async fn test_public_route_ignores_keys() {
    let server = test_server(test_app_state());
    let (name, value) = api_key("not-a-real-key");
    server.get("/ads/US").add_header(name, value).await.assert_status_ok();
}

#[tokio::test]
async fn test_role_without_keys_rejects_everyone() {
    let state = AppState::new(
        adnet_core::PriorityService::new(adnet_core::PriorityStore::in_memory()),
        AuthConfig { dashboard_keys: Vec::new(), processing_keys: vec![PROCESSING_KEY.into()] },
        None,
    );
    let server = test_server(state);

    let (name, value) = api_key(PROCESSING_KEY);
    server.get("/ads").add_header(name, value).await.assert_status(StatusCode::FORBIDDEN);
    server.get("/ads").await.assert_status(StatusCode::UNAUTHORIZED);
}
