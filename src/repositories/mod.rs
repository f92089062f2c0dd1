//! Repositorios
//!
//! Acceso a PostgreSQL por entidad. Los listados filtran con parámetros
//! opcionales (`$n IS NULL OR ...`) para mantener una única consulta.

pub mod fuel_price_repository;
pub mod fuel_statistics_repository;
pub mod gas_station_repository;
pub mod payment_template_repository;
pub mod recurring_payment_repository;
pub mod refueling_repository;
pub mod user_repository;
pub mod utility_repository;
pub mod vehicle_repository;
