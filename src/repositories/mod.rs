//! Repositorios
//!
//! Contrato de acceso a datos del motor (el colaborador externo) y una
//! implementación en memoria usada por los tests de integración.

pub mod garage_repository;
pub mod memory_repository;

pub use garage_repository::GarageRepository;
pub use memory_repository::MemoryRepository;
