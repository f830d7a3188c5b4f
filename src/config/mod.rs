//! Configuración del proyecto
//!
//! Este módulo contiene la configuración externa que el motor recibe
//! inyectada: catálogo de tipos de servicio y umbrales de scheduling.

pub mod maintenance;

pub use maintenance::{MaintenanceConfig, DEFAULT_MAINTENANCE_CONFIG, MAINTENANCE_ODOMETER_SLACK_KM};
