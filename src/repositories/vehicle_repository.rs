//! Store de vehículos en memoria
//!
//! Mantiene la lista canónica de vehículos. Cada operación espera la latencia
//! configurada antes de tocar el estado y devuelve copias, nunca referencias
//! a la lista interna.

use async_trait::async_trait;
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::LatencyConfig;
use crate::models::vehicle::{Vehicle, VehiclePatch};
use crate::utils::errors::StoreError;

/// Operaciones del store de vehículos
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Todos los registros
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, StoreError>;

    /// Un registro por id
    async fn get_vehicle(&self, id: &str) -> Result<Vehicle, StoreError>;

    /// Merge parcial sobre el registro indicado
    async fn update_vehicle(&self, id: &str, patch: VehiclePatch) -> Result<Vehicle, StoreError>;
}

pub struct InMemoryVehicleStore {
    vehicles: RwLock<Vec<Vehicle>>,
    latency: LatencyConfig,
}

impl InMemoryVehicleStore {
    /// Crear store con una lista inicial. Rechaza ids duplicados.
    pub fn new(vehicles: Vec<Vehicle>, latency: LatencyConfig) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        for vehicle in &vehicles {
            if !seen.insert(vehicle.id.as_str()) {
                return Err(StoreError::DuplicateId(vehicle.id.clone()));
            }
        }

        info!("🚗 Store de vehículos inicializado con {} registros", vehicles.len());
        Ok(Self {
            vehicles: RwLock::new(vehicles),
            latency,
        })
    }

    pub fn latency(&self) -> LatencyConfig {
        self.latency
    }

    async fn simulate_latency(duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

#[async_trait]
impl VehicleStore for InMemoryVehicleStore {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, StoreError> {
        Self::simulate_latency(self.latency.list).await;

        let vehicles = self.vehicles.read().await;
        debug!("📋 Listando {} vehículos", vehicles.len());
        Ok(vehicles.clone())
    }

    async fn get_vehicle(&self, id: &str) -> Result<Vehicle, StoreError> {
        Self::simulate_latency(self.latency.get).await;

        let vehicles = self.vehicles.read().await;
        match vehicles.iter().find(|v| v.id == id) {
            Some(vehicle) => {
                debug!("🔍 Vehículo encontrado: {}", id);
                Ok(vehicle.clone())
            }
            None => {
                warn!("❌ Vehículo no encontrado: {}", id);
                Err(StoreError::NotFound(id.to_string()))
            }
        }
    }

    async fn update_vehicle(&self, id: &str, patch: VehiclePatch) -> Result<Vehicle, StoreError> {
        Self::simulate_latency(self.latency.update).await;

        let mut vehicles = self.vehicles.write().await;
        let Some(vehicle) = vehicles.iter_mut().find(|v| v.id == id) else {
            warn!("❌ No se puede actualizar, vehículo no encontrado: {}", id);
            return Err(StoreError::NotFound(id.to_string()));
        };

        vehicle.apply_patch(patch);
        info!("💾 Vehículo {} actualizado", id);
        Ok(vehicle.clone())
    }
}
