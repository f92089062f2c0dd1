//! Services module
//!
//! Lógica de negocio que no cabe en un único repositorio: el libro de
//! repostajes, las estadísticas por periodo y la autenticación.

pub mod auth_service;
pub mod ledger;
pub mod statistics_service;
