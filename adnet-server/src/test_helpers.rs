//! Test helpers for adnet-server unit tests.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;

use adnet_core::store::test_backend::{FailOn, FaultyBackend};
use adnet_core::{PriorityService, PriorityStore};
use adnet_types::{AuthConfig, PriorityRecord};

use crate::router::build_router;
use crate::state::AppState;

pub const DASHBOARD_KEY: &str = "dash-test-key";
pub const PROCESSING_KEY: &str = "proc-test-key";

pub fn test_auth() -> AuthConfig {
    AuthConfig {
        dashboard_keys: vec![DASHBOARD_KEY.to_string()],
        processing_keys: vec![PROCESSING_KEY.to_string()],
    }
}

/// `AppState` over an in-memory store with one key per role.
pub fn test_app_state() -> AppState {
    AppState::new(PriorityService::new(PriorityStore::in_memory()), test_auth(), None)
}

/// `AppState` whose store fails as described by `fail_on`.
pub fn faulty_app_state(fail_on: FailOn) -> (AppState, Arc<FaultyBackend>) {
    let backend = Arc::new(FaultyBackend::new(fail_on));
    let store = PriorityStore::new(backend.clone(), Duration::from_millis(200));
    (AppState::new(PriorityService::new(store), test_auth(), None), backend)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state)).expect("failed to start test server")
}

pub fn api_key(key: &'static str) -> (HeaderName, HeaderValue) {
    (HeaderName::from_static("x-api-key"), HeaderValue::from_static(key))
}

pub fn aa_record() -> PriorityRecord {
    PriorityRecord::from_lists(
        ["AdMob", "AppLovin", "Unity Ads"],
        ["AdMob", "Vungle", "Chartboost"],
        ["Unity Ads", "IronSource", "AdColony"],
    )
}
