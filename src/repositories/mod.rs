pub mod seed;
pub mod vehicle_repository;

pub use vehicle_repository::{InMemoryVehicleStore, VehicleStore};
