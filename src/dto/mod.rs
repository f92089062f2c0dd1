//! DTOs de la API
//!
//! Requests, responses y filtros de cada recurso.

pub mod api_dto;
pub mod auth_dto;
pub mod fuel_price_dto;
pub mod fuel_statistics_dto;
pub mod gas_station_dto;
pub mod refueling_dto;
pub mod utility_dto;
pub mod vehicle_dto;
