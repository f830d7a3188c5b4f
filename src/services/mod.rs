//! Services module
//!
//! Este módulo contiene la lógica de negocio del motor: el ledger de
//! odómetro, el scheduler de mantenimiento, la calculadora de consumo y
//! la capa de vehículos. Todas las operaciones reciben snapshots
//! consistentes del caller y devuelven resultados o rechazos tipados.

pub mod authorization_service;
pub mod fuel_economy_service;
pub mod maintenance_scheduler;
pub mod odometer_ledger;
pub mod vehicle_service;

pub use fuel_economy_service::average_consumption;
pub use maintenance_scheduler::{classify_status, derive_interval, derive_next_due};
pub use odometer_ledger::{last_known_mileage, validate_new_reading};
