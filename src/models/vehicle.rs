//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD
//! operations. El odómetro es el puntero de "último kilometraje conocido"
//! del vehículo y solo avanza (salvo corrección administrativa, que no se
//! modela aquí).

use chrono::{DateTime, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

/// Unidad del odómetro
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OdometerUnit {
    Miles,
    Kilometers,
}

impl Default for OdometerUnit {
    fn default() -> Self {
        OdometerUnit::Kilometers
    }
}

/// Unidad del depósito de combustible
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FuelUnit {
    #[serde(rename = "L")]
    Liters,
    #[serde(rename = "gal")]
    Gallons,
}

/// Vehicle principal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: Option<String>,
    pub odometer: i64,
    pub odometer_unit: OdometerUnit,
    pub oil_change_interval: Option<i64>,
    pub service_interval: Option<i64>,
    pub last_service_date: Option<NaiveDate>,
    pub fuel_tank_size: Option<Decimal>,
    pub fuel_unit: Option<FuelUnit>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Vehicle {
    /// Nombre a mostrar: el nombre libre, o "{year} {make} {model}"
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => format!("{} {} {}", self.year, self.make, self.model),
        }
    }

    /// Vehículo activo (no retirado por soft delete)
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Política coarse: cualquier vehículo con intervalo de aceite
    /// configurado se marca como pendiente de cambio de aceite
    pub fn needs_oil_change(&self) -> bool {
        self.oil_change_interval.is_some()
    }

    /// Política: último servicio hace más de 6 meses
    pub fn needs_service(&self) -> bool {
        let (Some(_interval), Some(last_service)) = (self.service_interval, self.last_service_date)
        else {
            return false;
        };

        let today = Utc::now().date_naive();
        last_service
            .checked_add_months(Months::new(6))
            .map_or(false, |deadline| deadline < today)
    }
}

/// Request para crear un nuevo vehículo
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(max = 255))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub make: String,

    #[validate(length(min = 1, max = 255))]
    pub model: String,

    #[validate(custom = "crate::utils::validation::validate_year")]
    pub year: i32,

    #[validate(length(max = 255))]
    pub license_plate: Option<String>,

    #[validate(range(min = 0))]
    pub odometer: Option<i64>,

    pub odometer_unit: Option<OdometerUnit>,

    #[validate(range(min = 0))]
    pub oil_change_interval: Option<i64>,

    #[validate(range(min = 0))]
    pub service_interval: Option<i64>,

    pub last_service_date: Option<NaiveDate>,

    #[validate(custom = "crate::utils::validation::validate_non_negative_decimal")]
    pub fuel_tank_size: Option<Decimal>,

    pub fuel_unit: Option<FuelUnit>,
}

/// Request para actualizar un vehículo existente
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(max = 255))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub model: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_year")]
    pub year: Option<i32>,

    #[validate(length(max = 255))]
    pub license_plate: Option<String>,

    #[validate(range(min = 0))]
    pub odometer: Option<i64>,

    pub odometer_unit: Option<OdometerUnit>,

    #[validate(range(min = 0))]
    pub oil_change_interval: Option<i64>,

    #[validate(range(min = 0))]
    pub service_interval: Option<i64>,

    pub last_service_date: Option<NaiveDate>,

    #[validate(custom = "crate::utils::validation::validate_non_negative_decimal")]
    pub fuel_tank_size: Option<Decimal>,

    pub fuel_unit: Option<FuelUnit>,
}

/// Filtros para búsqueda de vehículos
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleFilters {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
}

/// Estadísticas agregadas de la flota de un usuario
#[derive(Debug, Clone, Serialize)]
pub struct VehicleStatistics {
    pub total_vehicles: usize,
    pub total_mileage: i64,
    pub vehicles_needing_service: usize,
    pub vehicles_needing_oil_change: usize,
    pub makes_breakdown: HashMap<String, usize>,
    pub average_year: Option<i64>,
}

impl VehicleStatistics {
    /// Agregación sobre el set completo de vehículos de un usuario
    pub fn from_vehicles(vehicles: &[Vehicle]) -> Self {
        let mut makes_breakdown: HashMap<String, usize> = HashMap::new();
        for vehicle in vehicles {
            *makes_breakdown.entry(vehicle.make.clone()).or_insert(0) += 1;
        }

        let average_year = if vehicles.is_empty() {
            None
        } else {
            let sum: i64 = vehicles.iter().map(|v| i64::from(v.year)).sum();
            Some((sum as f64 / vehicles.len() as f64).round() as i64)
        };

        Self {
            total_vehicles: vehicles.len(),
            total_mileage: vehicles.iter().map(|v| v.odometer).sum(),
            vehicles_needing_service: vehicles.iter().filter(|v| v.needs_service()).count(),
            vehicles_needing_oil_change: vehicles.iter().filter(|v| v.needs_oil_change()).count(),
            makes_breakdown,
            average_year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(make: &str, year: i32, odometer: i64) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: None,
            make: make.to_string(),
            model: "Test".to_string(),
            year,
            license_plate: None,
            odometer,
            odometer_unit: OdometerUnit::Kilometers,
            oil_change_interval: None,
            service_interval: None,
            last_service_date: None,
            fuel_tank_size: None,
            fuel_unit: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_display_name_falls_back_to_year_make_model() {
        let mut v = vehicle("Toyota", 2018, 0);
        assert_eq!(v.display_name(), "2018 Toyota Test");

        v.name = Some("Daily driver".to_string());
        assert_eq!(v.display_name(), "Daily driver");
    }

    #[test]
    fn test_needs_service_policy() {
        let mut v = vehicle("Honda", 2020, 50_000);
        assert!(!v.needs_service());

        v.service_interval = Some(15_000);
        v.last_service_date = Utc::now()
            .date_naive()
            .checked_sub_months(Months::new(7));
        assert!(v.needs_service());

        v.last_service_date = Utc::now()
            .date_naive()
            .checked_sub_months(Months::new(2));
        assert!(!v.needs_service());
    }

    #[test]
    fn test_needs_oil_change_is_interval_presence() {
        let mut v = vehicle("Honda", 2020, 50_000);
        assert!(!v.needs_oil_change());
        v.oil_change_interval = Some(8_000);
        assert!(v.needs_oil_change());
    }

    #[test]
    fn test_statistics_empty_set() {
        let stats = VehicleStatistics::from_vehicles(&[]);
        assert_eq!(stats.total_vehicles, 0);
        assert_eq!(stats.total_mileage, 0);
        assert_eq!(stats.vehicles_needing_service, 0);
        assert_eq!(stats.vehicles_needing_oil_change, 0);
        assert!(stats.makes_breakdown.is_empty());
        assert_eq!(stats.average_year, None);
    }

    #[test]
    fn test_statistics_aggregation() {
        let vehicles = vec![
            vehicle("Toyota", 2015, 120_000),
            vehicle("Toyota", 2020, 30_000),
            vehicle("Honda", 2018, 60_000),
        ];
        let stats = VehicleStatistics::from_vehicles(&vehicles);
        assert_eq!(stats.total_vehicles, 3);
        assert_eq!(stats.total_mileage, 210_000);
        assert_eq!(stats.makes_breakdown["Toyota"], 2);
        assert_eq!(stats.makes_breakdown["Honda"], 1);
        // (2015 + 2020 + 2018) / 3 = 2017.67 -> 2018
        assert_eq!(stats.average_year, Some(2018));
    }
}
