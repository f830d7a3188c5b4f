//! Calculadora de consumo de combustible
//!
//! Estadística derivada de solo lectura, recalculada bajo demanda: nunca
//! se persiste, así no queda obsoleta cuando se editan o borran logs.

use rust_decimal::Decimal;

use crate::models::fuel_log::FuelLog;

/// Consumo medio en volumen por 100 unidades de distancia
///
/// Se muestrea entre repostajes marcados "depósito lleno": el combustible
/// consumido entre dos llenos es el `fuel_amount` del lleno posterior.
/// Con menos de dos llenos (o sin distancia acumulada) no hay
/// estadística, lo cual no es un error. Opera sobre los valores crudos
/// almacenados; no convierte unidades.
pub fn average_consumption(fuel_logs: &[FuelLog]) -> Option<Decimal> {
    let mut full_tanks: Vec<&FuelLog> = fuel_logs.iter().filter(|l| l.is_full_tank).collect();
    if full_tanks.len() < 2 {
        return None;
    }

    full_tanks.sort_by(|a, b| a.odometer_km.cmp(&b.odometer_km));

    let mut total_fuel = Decimal::ZERO;
    let mut total_distance = Decimal::ZERO;

    for pair in full_tanks.windows(2) {
        let distance = pair[1].odometer_km - pair[0].odometer_km;
        // Lecturas duplicadas o desordenadas no acumulan ni fallan
        if distance > Decimal::ZERO {
            total_distance += distance;
            total_fuel += pair[1].fuel_amount;
        }
    }

    if total_distance <= Decimal::ZERO {
        return None;
    }

    Some((total_fuel / total_distance * Decimal::from(100)).round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn log(odometer_km: i64, fuel_amount: i64, is_full_tank: bool) -> FuelLog {
        FuelLog {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            date: Utc::now(),
            odometer_km: Decimal::from(odometer_km),
            fuel_price_per_unit: Decimal::new(170, 2),
            fuel_amount: Decimal::from(fuel_amount),
            total_cost: Decimal::from(fuel_amount) * Decimal::new(170, 2),
            is_full_tank,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_undefined_below_two_full_tanks() {
        assert_eq!(average_consumption(&[]), None);
        assert_eq!(average_consumption(&[log(10_000, 40, true)]), None);
        // Los repostajes parciales no cuentan como muestra
        assert_eq!(
            average_consumption(&[log(10_000, 40, true), log(10_200, 15, false)]),
            None
        );
    }

    #[test]
    fn test_two_full_tanks() {
        // 40 L entre 10000 y 10500 km -> (40/500)*100 = 8.00
        let logs = vec![log(10_000, 38, true), log(10_500, 40, true)];
        assert_eq!(average_consumption(&logs), Some(Decimal::new(800, 2)));
    }

    #[test]
    fn test_fuel_attributed_to_later_fill_up() {
        // Tramo 1: 42 L / 600 km, tramo 2: 36 L / 400 km
        // (42 + 36) / 1000 * 100 = 7.80
        let logs = vec![
            log(20_000, 40, true),
            log(20_600, 42, true),
            log(21_000, 36, true),
        ];
        assert_eq!(average_consumption(&logs), Some(Decimal::new(780, 2)));
    }

    #[test]
    fn test_sorts_by_odometer_before_pairing() {
        let logs = vec![log(10_500, 40, true), log(10_000, 38, true)];
        assert_eq!(average_consumption(&logs), Some(Decimal::new(800, 2)));
    }

    #[test]
    fn test_skips_non_positive_distances() {
        // Lectura duplicada: el par (10500, 10500) se ignora
        let logs = vec![
            log(10_000, 38, true),
            log(10_500, 40, true),
            log(10_500, 5, true),
        ];
        assert_eq!(average_consumption(&logs), Some(Decimal::new(800, 2)));
    }

    #[test]
    fn test_undefined_when_no_distance_accumulates() {
        let logs = vec![log(10_000, 40, true), log(10_000, 41, true)];
        assert_eq!(average_consumption(&logs), None);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        // 40 L / 601 km -> 6.6555... -> 6.66
        let logs = vec![log(10_000, 38, true), log(10_601, 40, true)];
        assert_eq!(average_consumption(&logs), Some(Decimal::new(666, 2)));
    }
}
