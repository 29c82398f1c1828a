//! Datos iniciales de la flota

use crate::models::vehicle::Vehicle;

const SEED_VEHICLES: &str = include_str!("../../data/seed_vehicles.json");

/// Los ocho vehículos con los que arranca el store
pub fn seed_vehicles() -> Result<Vec<Vehicle>, serde_json::Error> {
    serde_json::from_str(SEED_VEHICLES)
}
