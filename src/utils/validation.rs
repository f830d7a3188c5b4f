//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! compartidas entre los DTOs (vía `validator`) y los servicios.

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use validator::ValidationError;

/// Moneda por defecto cuando el caller no la indica
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Normalizar un código de moneda a 3 letras mayúsculas
///
/// Sin valor devuelve la moneda por defecto. Valores con longitud distinta
/// de 3 o con caracteres no alfabéticos se rechazan.
pub fn normalize_currency(value: Option<&str>) -> Result<String, ValidationError> {
    let raw = match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_uppercase(),
        _ => return Ok(DEFAULT_CURRENCY.to_string()),
    };

    if raw.len() != 3 || !raw.chars().all(|c| c.is_ascii_alphabetic()) {
        let mut error = ValidationError::new("currency");
        error.add_param("value".into(), &raw);
        error.add_param("format".into(), &"3-letter uppercase code (e.g. EUR, USD)".to_string());
        return Err(error);
    }

    Ok(raw)
}

/// Validar formato de moneda (para DTOs donde el valor viene sin normalizar)
pub fn validate_currency(value: &str) -> Result<(), ValidationError> {
    normalize_currency(Some(value)).map(|_| ())
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un decimal sea estrictamente positivo
pub fn validate_positive_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un decimal sea no negativo
pub fn validate_non_negative_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + serde::Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar año de fabricación (1900 hasta el año próximo)
pub fn validate_year(value: i32) -> Result<(), ValidationError> {
    let max_year = Utc::now().year() + 1;
    if value < 1900 || value > max_year {
        let mut error = ValidationError::new("year");
        error.add_param("min".into(), &1900);
        error.add_param("max".into(), &max_year);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que una fecha no esté en el futuro
pub fn validate_not_future(value: &NaiveDate) -> Result<(), ValidationError> {
    let today = Utc::now().date_naive();
    if *value > today {
        let mut error = ValidationError::new("not_future");
        error.add_param("value".into(), &value.to_string());
        error.add_param("today".into(), &today.to_string());
        return Err(error);
    }
    Ok(())
}
