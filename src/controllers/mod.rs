//! Controllers
//!
//! Validan el request, aplican las reglas de negocio y delegan en los
//! repositorios. Un controller por recurso.

pub mod auth_controller;
pub mod fuel_price_controller;
pub mod fuel_statistics_controller;
pub mod gas_station_controller;
pub mod payment_template_controller;
pub mod recurring_payment_controller;
pub mod refueling_controller;
pub mod utility_controller;
pub mod vehicle_controller;
