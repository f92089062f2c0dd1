//! Modelo de Vehicle
//!
//! Mapea exactamente a la tabla vehicles. `current_odometer` es una caché
//! que sólo escribe el libro de repostajes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub license_plate: String,
    pub initial_odometer: i32,
    pub current_odometer: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
