//! Servicio de autorización
//!
//! Predicado único de propiedad `(vehicle, user) -> bool`. El caller ya
//! autenticó al usuario; el motor aun así rechaza con `Unauthorized` si
//! la identidad no coincide, para que el invariante sea verificable en
//! tests sin la capa de auth.

use tracing::warn;
use uuid::Uuid;

use crate::models::vehicle::Vehicle;
use crate::utils::errors::{unauthorized_error, AppResult};

/// Verifica si un usuario es propietario del vehículo
pub fn owns_vehicle(vehicle: &Vehicle, user_id: Uuid) -> bool {
    vehicle.user_id == user_id
}

/// Igual que [`owns_vehicle`] pero mapeando el fallo a `Unauthorized`
pub fn ensure_owner(vehicle: &Vehicle, user_id: Uuid, operation: &str) -> AppResult<()> {
    if owns_vehicle(vehicle, user_id) {
        Ok(())
    } else {
        warn!(
            vehicle_id = %vehicle.id,
            user_id = %user_id,
            operation,
            "rechazado acceso a vehículo ajeno"
        );
        Err(unauthorized_error(operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::OdometerUnit;
    use chrono::Utc;

    fn vehicle(user_id: Uuid) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            user_id,
            name: None,
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2019,
            license_plate: None,
            odometer: 42_000,
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
    fn test_ownership_predicate() {
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let v = vehicle(owner);

        assert!(owns_vehicle(&v, owner));
        assert!(!owns_vehicle(&v, intruder));
        assert!(ensure_owner(&v, owner, "create fuel log").is_ok());

        let err = ensure_owner(&v, intruder, "create fuel log").unwrap_err();
        assert_eq!(err.code(), "UNAUTHORIZED");
    }
}
