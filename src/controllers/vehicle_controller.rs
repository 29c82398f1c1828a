use std::sync::Arc;

use crate::dto::vehicle_dto::ApiResponse;
use crate::models::vehicle::{Vehicle, VehiclePatch};
use crate::repositories::VehicleStore;
use crate::utils::errors::{bad_request_error, AppError};

pub struct VehicleController {
    store: Arc<dyn VehicleStore>,
}

impl VehicleController {
    pub fn new(store: Arc<dyn VehicleStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = self.store.list_vehicles().await?;
        Ok(vehicles)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Vehicle, AppError> {
        let vehicle = self.store.get_vehicle(id).await?;
        Ok(vehicle)
    }

    pub async fn update(
        &self,
        id: &str,
        patch: VehiclePatch,
    ) -> Result<ApiResponse<Vehicle>, AppError> {
        // Un parche vacío no cambia nada
        if patch.is_empty() {
            return Err(bad_request_error("The update must name at least one field"));
        }

        let vehicle = self.store.update_vehicle(id, patch).await?;

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehicle updated successfully".to_string(),
        ))
    }
}
