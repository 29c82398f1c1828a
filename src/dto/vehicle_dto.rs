use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::models::dashboard::{SortField, StatusFilter};
use crate::models::vehicle::{Telemetry, Vehicle, VehicleStatus};
use crate::utils::errors::{validation_error, AppError, AppResult};
use crate::utils::formatting::{coerce_number, parse_datetime_local};

// Formulario de alta de vehículo (todos los campos llegan como texto)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddVehicleForm {
    #[validate(length(min = 1))]
    pub id: String,

    #[validate(length(min = 1))]
    pub vehicle_name: String,

    #[validate(length(min = 1))]
    pub model: String,

    #[serde(default = "default_status")]
    pub status: VehicleStatus,

    // Valor de un input datetime-local, p.ej. "2025-11-20T08:15"
    #[validate(length(min = 1))]
    pub last_seen: String,

    #[validate(length(min = 1))]
    pub location: String,

    #[validate(length(min = 1))]
    pub speed: String,

    #[validate(length(min = 1))]
    pub battery: String,

    // Una entrada por línea
    #[serde(default)]
    pub activity: String,
}

fn default_status() -> VehicleStatus {
    VehicleStatus::Online
}

impl AddVehicleForm {
    /// Construir el registro con los campos derivados
    pub fn into_vehicle(self) -> AppResult<Vehicle> {
        self.validate()?;

        let last_seen = parse_datetime_local(&self.last_seen).map_err(|e| {
            let mut errors = ValidationErrors::new();
            errors.add("lastSeen", e);
            AppError::Validation(errors)
        })?;

        let speed = coerce_number(&self.speed)
            .ok_or_else(|| validation_error("speed", "must be a number"))?;
        let battery = coerce_number(&self.battery)
            .ok_or_else(|| validation_error("battery", "must be a number"))?;

        Ok(Vehicle {
            id: self.id,
            vehicle_name: self.vehicle_name,
            model: self.model,
            status: self.status,
            last_seen,
            location: self.location,
            telemetry: Telemetry { speed, battery },
            activity: self.activity.split('\n').map(str::to_string).collect(),
        })
    }
}

// Request para cambiar el término de búsqueda
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub term: String,
}

// Request para cambiar el filtro de estado
#[derive(Debug, Deserialize)]
pub struct StatusFilterRequest {
    pub status: StatusFilter,
}

// Request para ordenar por una columna
#[derive(Debug, Deserialize)]
pub struct SortRequest {
    pub field: SortField,
}

// Request para modificar los valores en edición del panel
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailDraftRequest {
    pub vehicle_name: Option<String>,
    pub status: Option<VehicleStatus>,
}

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}
