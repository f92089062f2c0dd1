//! Rutas HTTP
//!
//! Un router por recurso, anidado bajo `/api` en `crate::build_router`.

pub mod auth_routes;
pub mod fuel_price_routes;
pub mod fuel_statistics_routes;
pub mod gas_station_routes;
pub mod health_routes;
pub mod refueling_routes;
pub mod utility_routes;
pub mod vehicle_routes;

use axum::Json;
use serde_json::{json, Value};

/// Cuerpo de respuesta de los DELETE
pub(crate) fn deleted(message: &str) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": message
    }))
}
