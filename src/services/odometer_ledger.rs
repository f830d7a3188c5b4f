//! Ledger de odómetro
//!
//! Garantiza que el timeline de repostajes es estrictamente creciente
//! respecto al último kilometraje conocido, y mantiene el campo
//! `odometer` del vehículo sincronizado con la última lectura observada.
//!
//! Creación y edición son asimétricas: la creación valida contra el
//! último kilometraje conocido y avanza el odómetro incondicionalmente;
//! la edición no revalida contra los logs hermanos y solo sube el
//! odómetro del vehículo si la nueva lectura lo supera.

use chrono::Utc;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::models::fuel_log::{CreateFuelLogRequest, FuelLog, UpdateFuelLogRequest};
use crate::models::vehicle::Vehicle;
use crate::repositories::GarageRepository;
use crate::services::authorization_service::ensure_owner;
use crate::utils::errors::{validation_error, AppError, AppResult};

/// Último kilometraje conocido: la lectura del repostaje más reciente si
/// existe, si no el odómetro almacenado del vehículo
pub fn last_known_mileage(vehicle: &Vehicle, latest: Option<&FuelLog>) -> Decimal {
    match latest {
        Some(log) => log.odometer_km,
        None => Decimal::from(vehicle.odometer),
    }
}

/// Rechaza con `OdometerRegression` toda lectura que no supere
/// estrictamente el último kilometraje conocido
pub fn validate_new_reading(
    vehicle: &Vehicle,
    latest: Option<&FuelLog>,
    candidate_odometer_km: Decimal,
) -> AppResult<()> {
    let last_known = last_known_mileage(vehicle, latest);
    if candidate_odometer_km <= last_known {
        return Err(AppError::OdometerRegression {
            last_known: last_known.normalize().to_string(),
        });
    }
    Ok(())
}

fn odometer_pointer(reading: Decimal) -> AppResult<i64> {
    // El puntero del vehículo es entero; la lectura decimal se trunca
    reading
        .trunc()
        .to_i64()
        .ok_or_else(|| validation_error("odometer_km", "reading out of range"))
}

pub struct OdometerLedger<'a> {
    repo: &'a dyn GarageRepository,
}

impl<'a> OdometerLedger<'a> {
    pub fn new(repo: &'a dyn GarageRepository) -> Self {
        Self { repo }
    }

    async fn owned_vehicle(&self, vehicle_id: Uuid, user_id: Uuid, op: &str) -> AppResult<Vehicle> {
        let vehicle = self
            .repo
            .find_vehicle(vehicle_id)
            .await?
            .ok_or(AppError::VehicleNotFound(vehicle_id))?;
        ensure_owner(&vehicle, user_id, op)?;
        Ok(vehicle)
    }

    /// Histórico completo de repostajes, ordenado `(date desc, created_at desc)`
    pub async fn fuel_history(&self, vehicle_id: Uuid, user_id: Uuid) -> AppResult<Vec<FuelLog>> {
        self.owned_vehicle(vehicle_id, user_id, "list fuel logs").await?;
        self.repo.fuel_logs_for_vehicle(vehicle_id).await
    }

    /// Repostaje más reciente del vehículo
    pub async fn latest_fuel_log(
        &self,
        vehicle_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<FuelLog>> {
        self.owned_vehicle(vehicle_id, user_id, "read latest fuel log")
            .await?;
        self.repo.latest_fuel_log(vehicle_id).await
    }

    /// Registra un repostaje y avanza el odómetro del vehículo
    ///
    /// Insert del log y avance del puntero son una única transacción
    /// lógica del repositorio: o entran ambos o ninguno.
    pub async fn record_fuel_log(
        &self,
        vehicle_id: Uuid,
        user_id: Uuid,
        request: CreateFuelLogRequest,
    ) -> AppResult<FuelLog> {
        request.validate()?;

        let vehicle = self
            .owned_vehicle(vehicle_id, user_id, "create fuel log")
            .await?;
        let latest = self.repo.latest_fuel_log(vehicle_id).await?;

        validate_new_reading(&vehicle, latest.as_ref(), request.odometer_km)?;

        let now = Utc::now();
        let log = FuelLog {
            id: Uuid::new_v4(),
            vehicle_id,
            date: request.date.unwrap_or(now),
            odometer_km: request.odometer_km,
            fuel_price_per_unit: request.fuel_price_per_unit,
            fuel_amount: request.fuel_amount,
            total_cost: request.total_cost,
            is_full_tank: request.is_full_tank,
            created_at: now,
        };

        let new_odometer = odometer_pointer(log.odometer_km)?;
        let inserted = self.repo.insert_fuel_log(log, new_odometer).await?;

        info!(
            vehicle_id = %vehicle_id,
            odometer_km = %inserted.odometer_km,
            "⛽ repostaje registrado, odómetro avanzado a {}",
            new_odometer
        );
        Ok(inserted)
    }

    /// Edita un repostaje existente
    ///
    /// No se revalida la monotonía contra los logs hermanos; el odómetro
    /// del vehículo solo sube si la nueva lectura lo supera, nunca baja.
    pub async fn update_fuel_log(
        &self,
        vehicle_id: Uuid,
        log_id: Uuid,
        user_id: Uuid,
        request: UpdateFuelLogRequest,
    ) -> AppResult<FuelLog> {
        request.validate()?;

        let vehicle = self
            .owned_vehicle(vehicle_id, user_id, "update fuel log")
            .await?;
        let mut log = self
            .repo
            .find_fuel_log(vehicle_id, log_id)
            .await?
            .ok_or(AppError::LogNotFound(log_id))?;

        if let Some(date) = request.date {
            log.date = date;
        }
        if let Some(odometer_km) = request.odometer_km {
            log.odometer_km = odometer_km;
        }
        if let Some(price) = request.fuel_price_per_unit {
            log.fuel_price_per_unit = price;
        }
        if let Some(amount) = request.fuel_amount {
            log.fuel_amount = amount;
        }
        if let Some(total) = request.total_cost {
            log.total_cost = total;
        }
        if let Some(full) = request.is_full_tank {
            log.is_full_tank = full;
        }

        let new_odometer = match request.odometer_km {
            Some(reading) if reading > Decimal::from(vehicle.odometer) => {
                Some(odometer_pointer(reading)?)
            }
            _ => None,
        };

        if let Some(odometer) = new_odometer {
            debug!(vehicle_id = %vehicle_id, "odómetro del vehículo sube a {}", odometer);
        }

        self.repo.update_fuel_log(log, new_odometer).await
    }

    /// Borra un repostaje; el odómetro del vehículo no se reajusta
    pub async fn delete_fuel_log(
        &self,
        vehicle_id: Uuid,
        log_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<()> {
        self.owned_vehicle(vehicle_id, user_id, "delete fuel log")
            .await?;
        self.repo.delete_fuel_log(vehicle_id, log_id).await?;
        info!(vehicle_id = %vehicle_id, log_id = %log_id, "repostaje eliminado");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::OdometerUnit;

    fn vehicle(odometer: i64) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: None,
            make: "Seat".to_string(),
            model: "Ibiza".to_string(),
            year: 2017,
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

    fn fuel_log(vehicle_id: Uuid, odometer_km: i64) -> FuelLog {
        FuelLog {
            id: Uuid::new_v4(),
            vehicle_id,
            date: Utc::now(),
            odometer_km: Decimal::from(odometer_km),
            fuel_price_per_unit: Decimal::new(165, 2),
            fuel_amount: Decimal::from(40),
            total_cost: Decimal::new(6600, 2),
            is_full_tank: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_last_known_mileage_prefers_latest_log() {
        let v = vehicle(10_000);
        let log = fuel_log(v.id, 12_500);

        assert_eq!(last_known_mileage(&v, None), Decimal::from(10_000));
        assert_eq!(last_known_mileage(&v, Some(&log)), Decimal::from(12_500));
    }

    #[test]
    fn test_reading_must_exceed_last_known() {
        let v = vehicle(10_000);

        // Sin logs previos: se compara contra el odómetro del vehículo
        assert!(validate_new_reading(&v, None, Decimal::from(10_001)).is_ok());
        assert!(validate_new_reading(&v, None, Decimal::from(10_000)).is_err());
        assert!(validate_new_reading(&v, None, Decimal::from(9_999)).is_err());

        // Con log previo: se compara contra su lectura
        let log = fuel_log(v.id, 12_500);
        assert!(validate_new_reading(&v, Some(&log), Decimal::from(12_501)).is_ok());
        let err = validate_new_reading(&v, Some(&log), Decimal::from(12_500)).unwrap_err();
        assert_eq!(err.code(), "ODOMETER_REGRESSION");
        assert!(err.to_string().contains("12500"));
    }

    #[test]
    fn test_odometer_pointer_truncates_decimals() {
        assert_eq!(odometer_pointer(Decimal::new(125_507, 1)).unwrap(), 12_550);
        assert_eq!(odometer_pointer(Decimal::from(9_000)).unwrap(), 9_000);
    }
}
