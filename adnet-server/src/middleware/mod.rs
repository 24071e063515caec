pub mod auth;
pub mod cors;

pub use auth::{require_role, Role, RoleGuard};
pub use cors::cors_layer;
