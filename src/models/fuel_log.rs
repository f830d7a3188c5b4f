//! Modelo de FuelLog
//!
//! Registro de repostaje de un vehículo. Las queries de histórico y de
//! "último registro" ordenan por `(date desc, created_at desc)`; el
//! repositorio debe respetar ese contrato.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelLog {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub date: DateTime<Utc>,
    pub odometer_km: Decimal,
    pub fuel_price_per_unit: Decimal,
    pub fuel_amount: Decimal,
    pub total_cost: Decimal,
    pub is_full_tank: bool,
    pub created_at: DateTime<Utc>,
}

/// Request para crear un registro de combustible
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFuelLogRequest {
    /// Fecha del repostaje; si falta se usa el momento actual
    pub date: Option<DateTime<Utc>>,

    #[validate(custom = "crate::utils::validation::validate_non_negative_decimal")]
    pub odometer_km: Decimal,

    #[validate(custom = "crate::utils::validation::validate_positive_decimal")]
    pub fuel_price_per_unit: Decimal,

    #[validate(custom = "crate::utils::validation::validate_positive_decimal")]
    pub fuel_amount: Decimal,

    #[validate(custom = "crate::utils::validation::validate_non_negative_decimal")]
    pub total_cost: Decimal,

    pub is_full_tank: bool,
}

/// Request para actualizar un registro de combustible
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateFuelLogRequest {
    pub date: Option<DateTime<Utc>>,

    #[validate(custom = "crate::utils::validation::validate_non_negative_decimal")]
    pub odometer_km: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_positive_decimal")]
    pub fuel_price_per_unit: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_positive_decimal")]
    pub fuel_amount: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_non_negative_decimal")]
    pub total_cost: Option<Decimal>,

    pub is_full_tank: Option<bool>,
}
