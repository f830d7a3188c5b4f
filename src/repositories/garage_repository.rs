//! Contrato de acceso a datos
//!
//! El motor no sabe cómo se persisten los registros (relacional,
//! documento, memoria): opera contra este trait. El implementador es
//! responsable de los contratos de ordenación y de la atomicidad de la
//! pareja "insert de log + avance de odómetro".

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::fuel_log::FuelLog;
use crate::models::maintenance_log::MaintenanceLog;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppResult;

#[async_trait]
pub trait GarageRepository: Send + Sync {
    // ---- Vehicles ----

    async fn insert_vehicle(&self, vehicle: Vehicle) -> AppResult<Vehicle>;

    /// Busca un vehículo activo; los retirados por soft delete no aparecen
    async fn find_vehicle(&self, id: Uuid) -> AppResult<Option<Vehicle>>;

    /// Vehículos activos de un usuario, ordenados por `created_at desc`
    async fn vehicles_for_user(&self, user_id: Uuid) -> AppResult<Vec<Vehicle>>;

    async fn update_vehicle(&self, vehicle: Vehicle) -> AppResult<Vehicle>;

    /// Retiro lógico: el vehículo se conserva para el histórico
    async fn soft_delete_vehicle(&self, id: Uuid) -> AppResult<()>;

    // ---- Fuel logs ----

    /// Histórico ordenado por `(date desc, created_at desc)`
    async fn fuel_logs_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vec<FuelLog>>;

    /// Registro más reciente según `(date desc, created_at desc)`
    async fn latest_fuel_log(&self, vehicle_id: Uuid) -> AppResult<Option<FuelLog>>;

    async fn find_fuel_log(&self, vehicle_id: Uuid, id: Uuid) -> AppResult<Option<FuelLog>>;

    /// Inserta el log y fija `vehicle.odometer = new_vehicle_odometer`.
    /// Ambas escrituras forman una única transacción lógica: o entran las
    /// dos o no entra ninguna. Sin esa garantía, dos repostajes
    /// concurrentes podrían pasar el check de regresión contra un
    /// kilometraje obsoleto.
    async fn insert_fuel_log(&self, log: FuelLog, new_vehicle_odometer: i64) -> AppResult<FuelLog>;

    /// Reescribe el log; si `new_vehicle_odometer` viene, sube el puntero
    /// del vehículo dentro de la misma transacción
    async fn update_fuel_log(
        &self,
        log: FuelLog,
        new_vehicle_odometer: Option<i64>,
    ) -> AppResult<FuelLog>;

    /// Borra el log. El odómetro del vehículo no se reajusta.
    async fn delete_fuel_log(&self, vehicle_id: Uuid, id: Uuid) -> AppResult<()>;

    // ---- Maintenance logs ----

    /// Histórico ordenado por `(date_performed desc, created_at desc)`
    async fn maintenance_logs_for_vehicle(&self, vehicle_id: Uuid)
        -> AppResult<Vec<MaintenanceLog>>;

    /// Entrada con mayor `odometer_km`, opcionalmente excluyendo una
    /// (para validar updates contra las hermanas, no contra sí misma)
    async fn latest_maintenance_by_odometer(
        &self,
        vehicle_id: Uuid,
        exclude: Option<Uuid>,
    ) -> AppResult<Option<MaintenanceLog>>;

    async fn find_maintenance_log(
        &self,
        vehicle_id: Uuid,
        id: Uuid,
    ) -> AppResult<Option<MaintenanceLog>>;

    async fn insert_maintenance_log(&self, log: MaintenanceLog) -> AppResult<MaintenanceLog>;

    async fn update_maintenance_log(&self, log: MaintenanceLog) -> AppResult<MaintenanceLog>;

    async fn delete_maintenance_log(&self, vehicle_id: Uuid, id: Uuid) -> AppResult<()>;
}
