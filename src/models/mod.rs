//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de dominio del garage y los
//! DTOs de comandos ya parseados que el caller entrega al motor.

pub mod fuel_log;
pub mod maintenance_log;
pub mod vehicle;
