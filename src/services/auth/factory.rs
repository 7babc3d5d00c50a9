//! Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{AccessJwtError, AuthService};

pub fn build_auth_service(config: &Config) -> Result<Arc<AuthService>, AccessJwtError> {
    let auth = AuthService::new(config.jwt_secret.expose(), config.jwt_leeway_seconds)?;

    Ok(Arc::new(auth))
}
