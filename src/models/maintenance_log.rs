//! Modelo de MaintenanceLog
//!
//! Registro de servicio de mantenimiento. `interval_km` y `next_due_km`
//! son campos derivados por el scheduler en cada create/update; el status
//! de urgencia NO se persiste, se recalcula en cada lectura porque depende
//! del odómetro del vehículo en el momento de la query.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceLog {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub service_type: String,
    pub custom_description: Option<String>,
    pub date_performed: NaiveDate,
    pub odometer_km: i64,
    pub cost: Option<Decimal>,
    pub currency: String,
    pub interval_km: Option<i64>,
    pub next_due_km: Option<i64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Clasificación de urgencia de una entrada de mantenimiento
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MaintenanceStatus {
    #[serde(rename = "ok")]
    Ok,
    #[serde(rename = "due-soon")]
    DueSoon,
    #[serde(rename = "overdue")]
    Overdue,
    #[serde(rename = "no-interval")]
    NoInterval,
}

impl MaintenanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceStatus::Ok => "ok",
            MaintenanceStatus::DueSoon => "due-soon",
            MaintenanceStatus::Overdue => "overdue",
            MaintenanceStatus::NoInterval => "no-interval",
        }
    }
}

/// Request para crear un registro de mantenimiento
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMaintenanceLogRequest {
    pub service_type: String,

    #[validate(length(max = 255))]
    pub custom_description: Option<String>,

    pub date_performed: NaiveDate,

    #[validate(range(min = 1))]
    pub odometer_km: i64,

    #[validate(custom = "crate::utils::validation::validate_non_negative_decimal")]
    pub cost: Option<Decimal>,

    /// Código de 3 letras; por defecto EUR
    pub currency: Option<String>,

    /// Solo se respeta para `service_type == "Custom"`
    #[validate(range(min = 100, max = 999_999))]
    pub interval_km: Option<i64>,

    #[validate(length(max = 5000))]
    pub notes: Option<String>,
}

/// Request para actualizar un registro de mantenimiento
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMaintenanceLogRequest {
    pub service_type: Option<String>,

    #[validate(length(max = 255))]
    pub custom_description: Option<String>,

    pub date_performed: Option<NaiveDate>,

    #[validate(range(min = 1))]
    pub odometer_km: Option<i64>,

    #[validate(custom = "crate::utils::validation::validate_non_negative_decimal")]
    pub cost: Option<Decimal>,

    pub currency: Option<String>,

    #[validate(range(min = 100, max = 999_999))]
    pub interval_km: Option<i64>,

    #[validate(length(max = 5000))]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_with_dashes() {
        assert_eq!(
            serde_json::to_value(MaintenanceStatus::DueSoon).unwrap(),
            "due-soon"
        );
        assert_eq!(
            serde_json::to_value(MaintenanceStatus::NoInterval).unwrap(),
            "no-interval"
        );
        assert_eq!(MaintenanceStatus::Overdue.as_str(), "overdue");
    }
}
