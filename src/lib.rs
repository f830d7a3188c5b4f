//! Motor de dominio para el seguimiento de vehículos
//!
//! Este crate contiene la lógica de negocio del garage: validación de
//! lecturas de odómetro entre los streams de combustible y mantenimiento,
//! derivación del estado de scheduling (`interval_km` / `next_due_km`) y
//! cálculo de consumo medio de combustible.
//!
//! El transporte HTTP, la autenticación y la persistencia quedan fuera:
//! el caller entrega comandos ya parseados junto con snapshots consistentes
//! y una implementación de [`repositories::GarageRepository`].

pub mod config;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;
