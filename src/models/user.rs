//! Modelo de User

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Usuario de la API - el hash nunca sale en las respuestas
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
