//! Configuración de mantenimiento
//!
//! Catálogo de tipos de servicio con sus intervalos por defecto (en km)
//! y umbral de aviso "due soon". Se inyecta como value object de solo
//! lectura en el scheduler: nunca se consulta como global escondido,
//! lo que permite tests deterministas con catálogos arbitrarios.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Tipo de servicio centinela cuyo intervalo lo aporta el caller
pub const CUSTOM_SERVICE_TYPE: &str = "Custom";

/// Margen de plausibilidad: una entrada de mantenimiento no puede superar
/// el odómetro actual del vehículo en más de esta distancia
pub const MAINTENANCE_ODOMETER_SLACK_KM: i64 = 50_000;

/// Catálogo de tipos de servicio y configuración de scheduling
#[derive(Debug, Clone)]
pub struct MaintenanceConfig {
    /// Nombre del servicio -> intervalo por defecto en km (None = sin intervalo estándar)
    pub service_intervals: HashMap<String, Option<i64>>,
    /// Distancia antes de `next_due_km` a partir de la cual se avisa "due-soon"
    pub due_soon_threshold: i64,
}

impl MaintenanceConfig {
    pub fn new(service_intervals: HashMap<String, Option<i64>>, due_soon_threshold: i64) -> Self {
        Self {
            service_intervals,
            due_soon_threshold,
        }
    }

    /// Tipos de servicio válidos según el catálogo
    pub fn service_types(&self) -> Vec<&str> {
        self.service_intervals.keys().map(|k| k.as_str()).collect()
    }

    /// Verifica si un tipo de servicio existe en el catálogo
    pub fn is_valid_service_type(&self, service_type: &str) -> bool {
        self.service_intervals.contains_key(service_type)
    }

    /// Intervalo por defecto para un tipo de servicio
    pub fn default_interval(&self, service_type: &str) -> Option<i64> {
        self.service_intervals.get(service_type).copied().flatten()
    }
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        DEFAULT_MAINTENANCE_CONFIG.clone()
    }
}

lazy_static! {
    /// Catálogo por defecto del proceso
    pub static ref DEFAULT_MAINTENANCE_CONFIG: MaintenanceConfig = {
        let mut intervals: HashMap<String, Option<i64>> = HashMap::new();
        intervals.insert("Oil Change".to_string(), Some(8_000));
        intervals.insert("Brake Service".to_string(), Some(20_000));
        intervals.insert("Tire Rotation".to_string(), Some(10_000));
        intervals.insert("Air Filter".to_string(), Some(15_000));
        intervals.insert("Cabin Filter".to_string(), Some(15_000));
        intervals.insert("Spark Plugs".to_string(), Some(30_000));
        intervals.insert("Timing Belt".to_string(), Some(90_000));
        intervals.insert("Inspection".to_string(), Some(15_000));
        intervals.insert("Coolant Service".to_string(), Some(40_000));
        intervals.insert("Transmission Service".to_string(), Some(60_000));
        intervals.insert(CUSTOM_SERVICE_TYPE.to_string(), None);

        MaintenanceConfig::new(intervals, 500)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let config = MaintenanceConfig::default();
        assert_eq!(config.default_interval("Oil Change"), Some(8_000));
        assert_eq!(config.default_interval("Timing Belt"), Some(90_000));
        assert_eq!(config.default_interval("Custom"), None);
        assert_eq!(config.due_soon_threshold, 500);
    }

    #[test]
    fn test_service_type_membership() {
        let config = MaintenanceConfig::default();
        assert!(config.is_valid_service_type("Brake Service"));
        assert!(config.is_valid_service_type("Custom"));
        assert!(!config.is_valid_service_type("Flux Capacitor"));
    }

    #[test]
    fn test_unknown_type_has_no_interval() {
        let config = MaintenanceConfig::default();
        assert_eq!(config.default_interval("Flux Capacitor"), None);
    }
}
