//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum: el handle del store, la sesión del
//! dashboard y la configuración.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::environment::EnvironmentConfig;
use crate::controllers::fleet_dashboard::{save_failure, FleetDashboard};
use crate::models::vehicle::Vehicle;
use crate::repositories::VehicleStore;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub store: Arc<dyn VehicleStore>,
    pub dashboard: Arc<RwLock<FleetDashboard>>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, store: Arc<dyn VehicleStore>) -> Self {
        Self {
            config,
            store,
            dashboard: Arc::new(RwLock::new(FleetDashboard::new())),
        }
    }

    /// Cargar la lista del dashboard desde el store.
    ///
    /// El lock no se mantiene durante la latencia del store.
    pub async fn load_dashboard(&self) {
        self.dashboard.write().await.begin_load();
        log::info!("🔄 Cargando vehículos desde el store...");

        let result = self.store.list_vehicles().await;
        self.dashboard.write().await.finish_load(result);
    }

    /// Guardar el panel de detalle abierto.
    ///
    /// Guardados concurrentes del mismo vehículo no se serializan: la última
    /// respuesta en llegar es la que queda.
    pub async fn save_detail(&self) -> AppResult<Vehicle> {
        let (id, patch) = self.dashboard.write().await.begin_save()?;
        log::info!("💾 Guardando vehículo {}...", id);

        let result = self.store.update_vehicle(&id, patch).await;
        self.dashboard
            .write()
            .await
            .complete_save(&id, result)
            .map_err(save_failure)
    }
}
