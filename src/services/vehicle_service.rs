//! Servicio de vehículos
//!
//! CRUD de vehículos (con retiro lógico), materialización de perfiles
//! para lectura (consumo medio + status de cada entrada de
//! mantenimiento), estadísticas agregadas y búsqueda.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::config::MaintenanceConfig;
use crate::models::maintenance_log::{MaintenanceLog, MaintenanceStatus};
use crate::models::vehicle::{
    CreateVehicleRequest, UpdateVehicleRequest, Vehicle, VehicleFilters, VehicleStatistics,
};
use crate::repositories::GarageRepository;
use crate::services::authorization_service::ensure_owner;
use crate::services::fuel_economy_service::average_consumption;
use crate::services::maintenance_scheduler::classify_status;
use crate::utils::errors::{AppError, AppResult};

/// Entrada de mantenimiento materializada para lectura, con el status
/// recalculado contra el odómetro actual
#[derive(Debug, Clone, Serialize)]
pub struct MaintenanceLogView {
    #[serde(flatten)]
    pub log: MaintenanceLog,
    pub status: MaintenanceStatus,
}

/// Vehículo materializado para lectura
#[derive(Debug, Clone, Serialize)]
pub struct VehicleProfile {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub average_fuel_consumption: Option<Decimal>,
    pub maintenance_logs: Vec<MaintenanceLogView>,
}

pub struct VehicleService<'a> {
    repo: &'a dyn GarageRepository,
    config: &'a MaintenanceConfig,
}

impl<'a> VehicleService<'a> {
    pub fn new(repo: &'a dyn GarageRepository, config: &'a MaintenanceConfig) -> Self {
        Self { repo, config }
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

    /// Registra un vehículo nuevo para el usuario
    pub async fn create_vehicle(
        &self,
        user_id: Uuid,
        request: CreateVehicleRequest,
    ) -> AppResult<Vehicle> {
        request.validate()?;

        let now = Utc::now();
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            user_id,
            name: request.name,
            make: request.make,
            model: request.model,
            year: request.year,
            license_plate: request.license_plate,
            odometer: request.odometer.unwrap_or(0),
            odometer_unit: request.odometer_unit.unwrap_or_default(),
            oil_change_interval: request.oil_change_interval,
            service_interval: request.service_interval,
            last_service_date: request.last_service_date,
            fuel_tank_size: request.fuel_tank_size,
            fuel_unit: request.fuel_unit,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let inserted = self.repo.insert_vehicle(vehicle).await?;
        info!(vehicle_id = %inserted.id, "🚗 vehículo registrado: {}", inserted.display_name());
        Ok(inserted)
    }

    pub async fn get_vehicle(&self, vehicle_id: Uuid, user_id: Uuid) -> AppResult<Vehicle> {
        self.owned_vehicle(vehicle_id, user_id, "read vehicle").await
    }

    /// Vehículos activos del usuario, más reciente primero
    pub async fn my_vehicles(&self, user_id: Uuid) -> AppResult<Vec<Vehicle>> {
        self.repo.vehicles_for_user(user_id).await
    }

    /// Actualización parcial: solo se tocan los campos aportados
    pub async fn update_vehicle(
        &self,
        vehicle_id: Uuid,
        user_id: Uuid,
        request: UpdateVehicleRequest,
    ) -> AppResult<Vehicle> {
        request.validate()?;

        let current = self
            .owned_vehicle(vehicle_id, user_id, "update vehicle")
            .await?;

        let vehicle = Vehicle {
            id: current.id,
            user_id: current.user_id,
            name: request.name.or(current.name),
            make: request.make.unwrap_or(current.make),
            model: request.model.unwrap_or(current.model),
            year: request.year.unwrap_or(current.year),
            license_plate: request.license_plate.or(current.license_plate),
            odometer: request.odometer.unwrap_or(current.odometer),
            odometer_unit: request.odometer_unit.unwrap_or(current.odometer_unit),
            oil_change_interval: request.oil_change_interval.or(current.oil_change_interval),
            service_interval: request.service_interval.or(current.service_interval),
            last_service_date: request.last_service_date.or(current.last_service_date),
            fuel_tank_size: request.fuel_tank_size.or(current.fuel_tank_size),
            fuel_unit: request.fuel_unit.or(current.fuel_unit),
            created_at: current.created_at,
            updated_at: Utc::now(),
            deleted_at: current.deleted_at,
        };

        self.repo.update_vehicle(vehicle).await
    }

    /// Retiro lógico: se conserva para el histórico
    pub async fn delete_vehicle(&self, vehicle_id: Uuid, user_id: Uuid) -> AppResult<()> {
        self.owned_vehicle(vehicle_id, user_id, "delete vehicle")
            .await?;
        self.repo.soft_delete_vehicle(vehicle_id).await?;
        info!(vehicle_id = %vehicle_id, "vehículo retirado");
        Ok(())
    }

    /// Materializa el vehículo para display: consumo medio recalculado
    /// del histórico de repostajes y status de cada entrada de
    /// mantenimiento contra el odómetro actual
    pub async fn vehicle_profile(
        &self,
        vehicle_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<VehicleProfile> {
        let vehicle = self
            .owned_vehicle(vehicle_id, user_id, "read vehicle profile")
            .await?;

        let fuel_logs = self.repo.fuel_logs_for_vehicle(vehicle_id).await?;
        let maintenance_logs = self.repo.maintenance_logs_for_vehicle(vehicle_id).await?;

        let threshold = self.config.due_soon_threshold;
        let odometer = vehicle.odometer;
        let maintenance_views = maintenance_logs
            .into_iter()
            .map(|log| {
                let status = classify_status(&log, odometer, threshold);
                MaintenanceLogView { log, status }
            })
            .collect();

        Ok(VehicleProfile {
            average_fuel_consumption: average_consumption(&fuel_logs),
            vehicle,
            maintenance_logs: maintenance_views,
        })
    }

    /// Estadísticas agregadas de la flota del usuario
    pub async fn statistics(&self, user_id: Uuid) -> AppResult<VehicleStatistics> {
        let vehicles = self.repo.vehicles_for_user(user_id).await?;
        Ok(VehicleStatistics::from_vehicles(&vehicles))
    }

    /// Búsqueda por make/model/año sobre la flota del usuario
    pub async fn search_vehicles(
        &self,
        user_id: Uuid,
        filters: &VehicleFilters,
    ) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.repo.vehicles_for_user(user_id).await?;
        Ok(filter_vehicles(vehicles, filters))
    }
}

/// Filtro en memoria sobre un snapshot de vehículos
pub fn filter_vehicles(vehicles: Vec<Vehicle>, filters: &VehicleFilters) -> Vec<Vehicle> {
    vehicles
        .into_iter()
        .filter(|v| {
            if let Some(make) = &filters.make {
                if !v.make.to_lowercase().contains(&make.to_lowercase()) {
                    return false;
                }
            }
            if let Some(model) = &filters.model {
                if !v.model.to_lowercase().contains(&model.to_lowercase()) {
                    return false;
                }
            }
            if let Some(year) = filters.year {
                if v.year != year {
                    return false;
                }
            }
            if let (Some(from), Some(to)) = (filters.year_from, filters.year_to) {
                if v.year < from || v.year > to {
                    return false;
                }
            }
            true
        })
        .collect()
}
