//! Scheduler de mantenimiento
//!
//! Deriva `interval_km` y `next_due_km` de cada entrada a partir del
//! catálogo de tipos de servicio, valida los invariantes de escritura y
//! clasifica la urgencia de una entrada respecto al odómetro actual del
//! vehículo. Las derivaciones corren en CADA create y CADA update: para
//! tipos no-Custom nunca se confía en el `interval_km`/`next_due_km`
//! aportado por el caller.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::config::maintenance::{CUSTOM_SERVICE_TYPE, MAINTENANCE_ODOMETER_SLACK_KM};
use crate::config::MaintenanceConfig;
use crate::models::maintenance_log::{
    CreateMaintenanceLogRequest, MaintenanceLog, MaintenanceStatus, UpdateMaintenanceLogRequest,
};
use crate::models::vehicle::Vehicle;
use crate::repositories::GarageRepository;
use crate::services::authorization_service::ensure_owner;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{normalize_currency, validate_not_future};

/// Intervalo efectivo de una entrada
///
/// Para tipos del catálogo el intervalo del catálogo manda (aunque sea
/// None), ignorando lo que aporte el caller. Para `Custom` se toma el
/// valor del caller tal cual.
pub fn derive_interval(
    service_type: &str,
    config: &MaintenanceConfig,
    provided_interval_km: Option<i64>,
) -> Option<i64> {
    if service_type == CUSTOM_SERVICE_TYPE {
        provided_interval_km
    } else {
        config.default_interval(service_type)
    }
}

/// Próximo vencimiento: `odometer + interval` cuando hay intervalo y la
/// lectura es positiva
pub fn derive_next_due(odometer_km: i64, interval_km: Option<i64>) -> Option<i64> {
    interval_km
        .filter(|_| odometer_km > 0)
        .map(|interval| odometer_km + interval)
}

/// Clasificación pura de urgencia respecto al odómetro actual
///
/// No se persiste nunca: depende del odómetro en el momento de la query.
pub fn classify_status(
    log: &MaintenanceLog,
    vehicle_current_odometer: i64,
    due_soon_threshold: i64,
) -> MaintenanceStatus {
    let Some(next_due) = log.next_due_km else {
        return MaintenanceStatus::NoInterval;
    };

    if vehicle_current_odometer >= next_due {
        MaintenanceStatus::Overdue
    } else if vehicle_current_odometer >= next_due - due_soon_threshold {
        MaintenanceStatus::DueSoon
    } else {
        MaintenanceStatus::Ok
    }
}

pub struct MaintenanceScheduler<'a> {
    repo: &'a dyn GarageRepository,
    config: &'a MaintenanceConfig,
}

impl<'a> MaintenanceScheduler<'a> {
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

    /// Invariantes de escritura, comunes a create y update
    ///
    /// `exclude` permite validar una edición contra las entradas hermanas
    /// sin que la entrada choque contra su propia lectura.
    async fn validate_entry(
        &self,
        vehicle: &Vehicle,
        service_type: &str,
        custom_description: Option<&str>,
        date_performed: chrono::NaiveDate,
        odometer_km: i64,
        exclude: Option<Uuid>,
    ) -> AppResult<()> {
        if !self.config.is_valid_service_type(service_type) {
            return Err(AppError::InvalidServiceType(service_type.to_string()));
        }

        if service_type == CUSTOM_SERVICE_TYPE
            && custom_description.map_or(true, |d| d.trim().is_empty())
        {
            return Err(AppError::MissingCustomDescription);
        }

        if validate_not_future(&date_performed).is_err() {
            return Err(AppError::FutureServiceDate(date_performed));
        }

        // La lectura debe superar la entrada previa (por odometer_km desc)
        if let Some(previous) = self
            .repo
            .latest_maintenance_by_odometer(vehicle.id, exclude)
            .await?
        {
            if odometer_km <= previous.odometer_km {
                return Err(AppError::OdometerRegression {
                    last_known: previous.odometer_km.to_string(),
                });
            }
        }

        // Cap de plausibilidad, no regla dura de monotonía: el puntero del
        // vehículo no tiene por qué reflejar aún este servicio
        if odometer_km > vehicle.odometer + MAINTENANCE_ODOMETER_SLACK_KM {
            return Err(AppError::OdometerImplausible {
                reading: odometer_km,
                current: vehicle.odometer,
            });
        }

        Ok(())
    }

    /// Histórico ordenado `(date_performed desc, created_at desc)`
    pub async fn maintenance_history(
        &self,
        vehicle_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Vec<MaintenanceLog>> {
        self.owned_vehicle(vehicle_id, user_id, "list maintenance logs")
            .await?;
        self.repo.maintenance_logs_for_vehicle(vehicle_id).await
    }

    /// Registra una entrada de mantenimiento con sus campos derivados
    pub async fn record_maintenance_log(
        &self,
        vehicle_id: Uuid,
        user_id: Uuid,
        request: CreateMaintenanceLogRequest,
    ) -> AppResult<MaintenanceLog> {
        request.validate()?;

        let vehicle = self
            .owned_vehicle(vehicle_id, user_id, "create maintenance log")
            .await?;

        self.validate_entry(
            &vehicle,
            &request.service_type,
            request.custom_description.as_deref(),
            request.date_performed,
            request.odometer_km,
            None,
        )
        .await?;

        let currency = normalize_currency(request.currency.as_deref())
            .map_err(single_field_error("currency"))?;
        let interval_km = derive_interval(&request.service_type, self.config, request.interval_km);
        let next_due_km = derive_next_due(request.odometer_km, interval_km);

        let log = MaintenanceLog {
            id: Uuid::new_v4(),
            vehicle_id,
            service_type: request.service_type,
            custom_description: request.custom_description,
            date_performed: request.date_performed,
            odometer_km: request.odometer_km,
            cost: request.cost,
            currency,
            interval_km,
            next_due_km,
            notes: request.notes,
            created_at: Utc::now(),
        };

        let inserted = self.repo.insert_maintenance_log(log).await?;
        info!(
            vehicle_id = %vehicle_id,
            service_type = %inserted.service_type,
            next_due_km = ?inserted.next_due_km,
            "🔧 servicio registrado"
        );
        Ok(inserted)
    }

    /// Edita una entrada recalculando siempre los campos derivados
    pub async fn update_maintenance_log(
        &self,
        vehicle_id: Uuid,
        log_id: Uuid,
        user_id: Uuid,
        request: UpdateMaintenanceLogRequest,
    ) -> AppResult<MaintenanceLog> {
        request.validate()?;

        let vehicle = self
            .owned_vehicle(vehicle_id, user_id, "update maintenance log")
            .await?;
        let mut log = self
            .repo
            .find_maintenance_log(vehicle_id, log_id)
            .await?
            .ok_or(AppError::LogNotFound(log_id))?;

        if let Some(service_type) = request.service_type {
            log.service_type = service_type;
        }
        if let Some(description) = request.custom_description {
            log.custom_description = Some(description);
        }
        if let Some(date) = request.date_performed {
            log.date_performed = date;
        }
        if let Some(odometer_km) = request.odometer_km {
            log.odometer_km = odometer_km;
        }
        if let Some(cost) = request.cost {
            log.cost = Some(cost);
        }
        if let Some(currency) = request.currency {
            log.currency = normalize_currency(Some(&currency))
                .map_err(single_field_error("currency"))?;
        }
        if let Some(notes) = request.notes {
            log.notes = Some(notes);
        }

        self.validate_entry(
            &vehicle,
            &log.service_type,
            log.custom_description.as_deref(),
            log.date_performed,
            log.odometer_km,
            Some(log_id),
        )
        .await?;

        // Recalcular SIEMPRE desde el (posiblemente nuevo) tipo/odómetro
        let caller_interval = request.interval_km.or(log.interval_km);
        log.interval_km = derive_interval(&log.service_type, self.config, caller_interval);
        log.next_due_km = derive_next_due(log.odometer_km, log.interval_km);

        self.repo.update_maintenance_log(log).await
    }

    /// Borra una entrada de mantenimiento
    pub async fn delete_maintenance_log(
        &self,
        vehicle_id: Uuid,
        log_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<()> {
        self.owned_vehicle(vehicle_id, user_id, "delete maintenance log")
            .await?;
        self.repo.delete_maintenance_log(vehicle_id, log_id).await
    }
}

fn single_field_error(
    field: &'static str,
) -> impl FnOnce(validator::ValidationError) -> AppError {
    move |error| {
        let mut errors = validator::ValidationErrors::new();
        errors.add(field, error);
        AppError::Validation(errors)
    }
}
