//! Repositorio en memoria
//!
//! Implementación de [`GarageRepository`] sobre HashMaps detrás de un
//! Mutex. Respeta los contratos de ordenación y el soft delete; el Mutex
//! hace atómica la pareja insert-de-log + avance-de-odómetro.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::models::fuel_log::FuelLog;
use crate::models::maintenance_log::MaintenanceLog;
use crate::models::vehicle::Vehicle;
use crate::repositories::garage_repository::GarageRepository;
use crate::utils::errors::{AppError, AppResult};

#[derive(Default)]
struct Store {
    vehicles: HashMap<Uuid, Vehicle>,
    fuel_logs: HashMap<Uuid, FuelLog>,
    maintenance_logs: HashMap<Uuid, MaintenanceLog>,
}

#[derive(Default)]
pub struct MemoryRepository {
    store: Mutex<Store>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, Store>> {
        self.store
            .lock()
            .map_err(|_| AppError::Repository("store lock poisoned".to_string()))
    }
}

#[async_trait]
impl GarageRepository for MemoryRepository {
    async fn insert_vehicle(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        let mut store = self.lock()?;
        store.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn find_vehicle(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let store = self.lock()?;
        Ok(store.vehicles.get(&id).filter(|v| v.is_active()).cloned())
    }

    async fn vehicles_for_user(&self, user_id: Uuid) -> AppResult<Vec<Vehicle>> {
        let store = self.lock()?;
        let mut vehicles: Vec<Vehicle> = store
            .vehicles
            .values()
            .filter(|v| v.user_id == user_id && v.is_active())
            .cloned()
            .collect();
        vehicles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(vehicles)
    }

    async fn update_vehicle(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        let mut store = self.lock()?;
        if !store.vehicles.contains_key(&vehicle.id) {
            return Err(AppError::VehicleNotFound(vehicle.id));
        }
        store.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn soft_delete_vehicle(&self, id: Uuid) -> AppResult<()> {
        let mut store = self.lock()?;
        let vehicle = store
            .vehicles
            .get_mut(&id)
            .ok_or(AppError::VehicleNotFound(id))?;
        vehicle.deleted_at = Some(chrono::Utc::now());
        Ok(())
    }

    async fn fuel_logs_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vec<FuelLog>> {
        let store = self.lock()?;
        let mut logs: Vec<FuelLog> = store
            .fuel_logs
            .values()
            .filter(|l| l.vehicle_id == vehicle_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(logs)
    }

    async fn latest_fuel_log(&self, vehicle_id: Uuid) -> AppResult<Option<FuelLog>> {
        Ok(self.fuel_logs_for_vehicle(vehicle_id).await?.into_iter().next())
    }

    async fn find_fuel_log(&self, vehicle_id: Uuid, id: Uuid) -> AppResult<Option<FuelLog>> {
        let store = self.lock()?;
        Ok(store
            .fuel_logs
            .get(&id)
            .filter(|l| l.vehicle_id == vehicle_id)
            .cloned())
    }

    async fn insert_fuel_log(&self, log: FuelLog, new_vehicle_odometer: i64) -> AppResult<FuelLog> {
        let mut store = self.lock()?;
        let vehicle = store
            .vehicles
            .get_mut(&log.vehicle_id)
            .ok_or(AppError::VehicleNotFound(log.vehicle_id))?;
        vehicle.odometer = new_vehicle_odometer;
        vehicle.updated_at = chrono::Utc::now();
        store.fuel_logs.insert(log.id, log.clone());
        Ok(log)
    }

    async fn update_fuel_log(
        &self,
        log: FuelLog,
        new_vehicle_odometer: Option<i64>,
    ) -> AppResult<FuelLog> {
        let mut store = self.lock()?;
        if !store.fuel_logs.contains_key(&log.id) {
            return Err(AppError::LogNotFound(log.id));
        }
        if let Some(odometer) = new_vehicle_odometer {
            let vehicle = store
                .vehicles
                .get_mut(&log.vehicle_id)
                .ok_or(AppError::VehicleNotFound(log.vehicle_id))?;
            vehicle.odometer = odometer;
            vehicle.updated_at = chrono::Utc::now();
        }
        store.fuel_logs.insert(log.id, log.clone());
        Ok(log)
    }

    async fn delete_fuel_log(&self, vehicle_id: Uuid, id: Uuid) -> AppResult<()> {
        let mut store = self.lock()?;
        match store.fuel_logs.get(&id) {
            Some(log) if log.vehicle_id == vehicle_id => {
                store.fuel_logs.remove(&id);
                Ok(())
            }
            _ => Err(AppError::LogNotFound(id)),
        }
    }

    async fn maintenance_logs_for_vehicle(
        &self,
        vehicle_id: Uuid,
    ) -> AppResult<Vec<MaintenanceLog>> {
        let store = self.lock()?;
        let mut logs: Vec<MaintenanceLog> = store
            .maintenance_logs
            .values()
            .filter(|l| l.vehicle_id == vehicle_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| {
            b.date_performed
                .cmp(&a.date_performed)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(logs)
    }

    async fn latest_maintenance_by_odometer(
        &self,
        vehicle_id: Uuid,
        exclude: Option<Uuid>,
    ) -> AppResult<Option<MaintenanceLog>> {
        let store = self.lock()?;
        Ok(store
            .maintenance_logs
            .values()
            .filter(|l| l.vehicle_id == vehicle_id && Some(l.id) != exclude)
            .max_by_key(|l| l.odometer_km)
            .cloned())
    }

    async fn find_maintenance_log(
        &self,
        vehicle_id: Uuid,
        id: Uuid,
    ) -> AppResult<Option<MaintenanceLog>> {
        let store = self.lock()?;
        Ok(store
            .maintenance_logs
            .get(&id)
            .filter(|l| l.vehicle_id == vehicle_id)
            .cloned())
    }

    async fn insert_maintenance_log(&self, log: MaintenanceLog) -> AppResult<MaintenanceLog> {
        let mut store = self.lock()?;
        store.maintenance_logs.insert(log.id, log.clone());
        Ok(log)
    }

    async fn update_maintenance_log(&self, log: MaintenanceLog) -> AppResult<MaintenanceLog> {
        let mut store = self.lock()?;
        if !store.maintenance_logs.contains_key(&log.id) {
            return Err(AppError::LogNotFound(log.id));
        }
        store.maintenance_logs.insert(log.id, log.clone());
        Ok(log)
    }

    async fn delete_maintenance_log(&self, vehicle_id: Uuid, id: Uuid) -> AppResult<()> {
        let mut store = self.lock()?;
        match store.maintenance_logs.get(&id) {
            Some(log) if log.vehicle_id == vehicle_id => {
                store.maintenance_logs.remove(&id);
                Ok(())
            }
            _ => Err(AppError::LogNotFound(id)),
        }
    }
}
