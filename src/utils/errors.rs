//! Sistema de manejo de errores
//!
//! Este módulo define todos los rechazos tipados del motor de dominio.
//! Cada variante es un fallo determinista de validación de entrada: se
//! devuelve como resultado estructurado al caller inmediato, nunca se
//! reintenta y nunca produce escrituras parciales.

use chrono::NaiveDate;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Errores principales del motor
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Odometer reading must be greater than the last known mileage ({last_known})")]
    OdometerRegression { last_known: String },

    #[error("The odometer reading ({reading}) seems unusually high compared to the vehicle's current odometer ({current})")]
    OdometerImplausible { reading: i64, current: i64 },

    #[error("A description is required for custom service types")]
    MissingCustomDescription,

    #[error("Service date cannot be in the future ({0})")]
    FutureServiceDate(NaiveDate),

    #[error("Invalid service type selected: {0}")]
    InvalidServiceType(String),

    #[error("Vehicle with id '{0}' not found")]
    VehicleNotFound(Uuid),

    #[error("Log with id '{0}' not found")]
    LogNotFound(Uuid),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Repository error: {0}")]
    Repository(String),
}

impl AppError {
    /// Código estable del rechazo, pensado para el caller que lo expone
    pub fn code(&self) -> &'static str {
        match self {
            AppError::OdometerRegression { .. } => "ODOMETER_REGRESSION",
            AppError::OdometerImplausible { .. } => "ODOMETER_IMPLAUSIBLE",
            AppError::MissingCustomDescription => "MISSING_CUSTOM_DESCRIPTION",
            AppError::FutureServiceDate(_) => "FUTURE_SERVICE_DATE",
            AppError::InvalidServiceType(_) => "INVALID_SERVICE_TYPE",
            AppError::VehicleNotFound(_) => "VEHICLE_NOT_FOUND",
            AppError::LogNotFound(_) => "LOG_NOT_FOUND",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Repository(_) => "REPOSITORY_ERROR",
        }
    }

    /// Título corto legible del rechazo
    pub fn title(&self) -> &'static str {
        match self {
            AppError::OdometerRegression { .. } => "Odometer Regression",
            AppError::OdometerImplausible { .. } => "Implausible Odometer Reading",
            AppError::MissingCustomDescription => "Missing Custom Description",
            AppError::FutureServiceDate(_) => "Invalid Service Date",
            AppError::InvalidServiceType(_) => "Invalid Service Type",
            AppError::VehicleNotFound(_) => "Vehicle Not Found",
            AppError::LogNotFound(_) => "Log Not Found",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Validation(_) => "Validation Error",
            AppError::Repository(_) => "Repository Error",
        }
    }
}

/// Respuesta de error estructurada para el caller
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub code: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let details = match err {
            AppError::Validation(e) => Some(json!(e)),
            AppError::OdometerRegression { last_known } => {
                Some(json!({ "last_known_mileage": last_known }))
            }
            AppError::OdometerImplausible { reading, current } => {
                Some(json!({ "reading": reading, "current_odometer": current }))
            }
            _ => None,
        };

        Self {
            error: err.title().to_string(),
            message: err.to_string(),
            details,
            code: err.code().to_string(),
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.add_param("field".into(), &field);
    error.add_param("message".into(), &message);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de vehículo no encontrado
pub fn vehicle_not_found(id: Uuid) -> AppError {
    AppError::VehicleNotFound(id)
}

/// Función helper para crear errores de acceso no autorizado
pub fn unauthorized_error(operation: &str) -> AppError {
    AppError::Unauthorized(format!("Caller does not own this vehicle ({})", operation))
}
