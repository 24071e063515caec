use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use std::fmt;
use std::sync::Arc;
use subtle::ConstantTimeEq;

use adnet_types::AuthConfig;

/// Caller roles for the internal endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Reads every stored record (`GET /ads`)
    Dashboard,
    /// Bulk-replaces records (`PUT /ads`)
    Processing,
}

impl Role {
    fn keys(self, auth: &AuthConfig) -> &[String] {
        match self {
            Self::Dashboard => &auth.dashboard_keys,
            Self::Processing => &auth.processing_keys,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dashboard => write!(f, "dashboard"),
            Self::Processing => write!(f, "processing"),
        }
    }
}

/// Middleware state: the role a route requires plus the configured keys.
#[derive(Clone)]
pub struct RoleGuard {
    role: Role,
    auth: Arc<AuthConfig>,
}

impl RoleGuard {
    pub fn new(role: Role, auth: Arc<AuthConfig>) -> Self {
        Self { role, auth }
    }
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

fn holds_role(key: &str, role: Role, auth: &AuthConfig) -> bool {
    role.keys(auth).iter().any(|known| constant_time_compare(key, known))
}

fn extract_api_key(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer ").or(Some(s)))
        .or_else(|| headers.get("x-api-key").and_then(|h| h.to_str().ok()))
        .filter(|k| !k.is_empty())
}

/// 401 for a missing or unknown key, 403 for a known key without the role.
pub async fn require_role(
    State(guard): State<RoleGuard>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(key) = extract_api_key(request.headers()) else {
        tracing::debug!("Rejected {} {}: no API key", request.method(), request.uri().path());
        return Err(StatusCode::UNAUTHORIZED);
    };

    if holds_role(key, guard.role, &guard.auth) {
        return Ok(next.run(request).await);
    }

    let known = [Role::Dashboard, Role::Processing]
        .into_iter()
        .any(|role| holds_role(key, role, &guard.auth));

    if known {
        tracing::warn!(
            "Rejected {} {}: key lacks {} role",
            request.method(),
            request.uri().path(),
            guard.role
        );
        Err(StatusCode::FORBIDDEN)
    } else {
        tracing::warn!("Rejected {} {}: unknown API key", request.method(), request.uri().path());
        Err(StatusCode::UNAUTHORIZED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn auth() -> AuthConfig {
        AuthConfig {
            dashboard_keys: vec!["dash-key".to_string()],
            processing_keys: vec!["proc-key".to_string()],
        }
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc", "abc"));
        assert!(!constant_time_compare("abc", "abd"));
        assert!(!constant_time_compare("abc", "abcd"));
    }

    #[test]
    fn test_holds_role() {
        let auth = auth();
        assert!(holds_role("dash-key", Role::Dashboard, &auth));
        assert!(!holds_role("dash-key", Role::Processing, &auth));
        assert!(holds_role("proc-key", Role::Processing, &auth));
        assert!(!holds_role("", Role::Dashboard, &auth));
    }

    #[test]
    fn test_extract_api_key_sources() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_api_key(&headers), None);

        headers.insert("x-api-key", HeaderValue::from_static("from-header"));
        assert_eq!(extract_api_key(&headers), Some("from-header"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-bearer"));
        assert_eq!(extract_api_key(&headers), Some("from-bearer"));
    }

    #[test]
    fn test_empty_bearer_is_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_api_key(&headers), None);
    }
}
