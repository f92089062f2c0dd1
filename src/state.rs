//! Shared application state
//!
//! Estado compartido que se pasa a través del router de Axum.

use sqlx::PgPool;

use crate::config::EnvironmentConfig;
use crate::middleware::RateLimitState;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitState,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            jwt: JwtConfig::from(&config),
            rate_limit: RateLimitState::from_config(&config),
            pool,
            config,
        }
    }
}
