//! Shared server state.

use std::sync::Arc;

use adnet_core::PriorityService;
use adnet_types::AuthConfig;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    service: PriorityService,
    auth: Arc<AuthConfig>,
    metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(service: PriorityService, auth: AuthConfig, metrics: Option<PrometheusHandle>) -> Self {
        Self { inner: Arc::new(AppStateInner { service, auth: Arc::new(auth), metrics }) }
    }

    pub fn service(&self) -> &PriorityService {
        &self.inner.service
    }

    pub fn auth(&self) -> Arc<AuthConfig> {
        self.inner.auth.clone()
    }

    pub fn metrics(&self) -> Option<&PrometheusHandle> {
        self.inner.metrics.as_ref()
    }
}
