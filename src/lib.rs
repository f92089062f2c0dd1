//! Forge Ledger
//!
//! API REST para llevar el libro de repostajes de varios vehículos junto con
//! gasolineras, precios de combustible, estadísticas de consumo y pagos de
//! servicios.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{middleware::from_fn_with_state, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::{auth_middleware, cors_layer, rate_limit_middleware};
use crate::state::AppState;

/// Router completo de la aplicación.
///
/// `/health` y `/api/auth/{login,register}` son públicas; el resto de `/api`
/// exige token.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/vehicles", routes::vehicle_routes::create_vehicle_router())
        .nest("/refuelings", routes::refueling_routes::create_refueling_router())
        .nest("/gas-stations", routes::gas_station_routes::create_gas_station_router())
        .nest("/fuel-prices", routes::fuel_price_routes::create_fuel_price_router())
        .nest("/fuel-statistics", routes::fuel_statistics_routes::create_fuel_statistics_router())
        .nest("/utility-companies", routes::utility_routes::create_utility_company_router())
        .nest("/utility-payments", routes::utility_routes::create_utility_payment_router())
        .nest("/recurring-payments", routes::utility_routes::create_recurring_payment_router())
        .nest("/payment-templates", routes::utility_routes::create_payment_template_router())
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let api = Router::new()
        .nest("/auth", routes::auth_routes::create_auth_router(state.clone()))
        .merge(protected);

    Router::new()
        .merge(routes::health_routes::create_health_router())
        .nest("/api", api)
        .layer(from_fn_with_state(state.clone(), rate_limit_middleware))
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
