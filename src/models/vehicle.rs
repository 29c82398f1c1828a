//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle, su telemetría y el parche parcial
//! que usa la operación de actualización del store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Estado del vehículo - sólo dos valores posibles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Online,
    Offline,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Online => "online",
            VehicleStatus::Offline => "offline",
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Telemetría: velocidad en km/h y batería en porcentaje
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Telemetry {
    pub speed: f64,
    pub battery: f64,
}

/// Vehicle principal - el único registro que maneja el sistema
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub vehicle_name: String,
    pub model: String,
    pub status: VehicleStatus,
    pub last_seen: DateTime<Utc>,
    pub location: String,
    pub telemetry: Telemetry,
    #[serde(default)]
    pub activity: Vec<String>,
}

/// Actualización parcial de un vehículo.
///
/// Merge superficial: sólo se reemplazan los campos presentes. `telemetry`
/// y `activity` se sustituyen completos si vienen incluidos. El `id` no
/// forma parte del parche, es inmutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VehicleStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telemetry: Option<Telemetry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<Vec<String>>,
}

impl VehiclePatch {
    /// Parche con los dos campos editables desde el panel de detalle
    pub fn name_and_status(vehicle_name: String, status: VehicleStatus) -> Self {
        Self {
            vehicle_name: Some(vehicle_name),
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Vehicle {
    /// Aplicar un parche parcial sobre este registro
    pub fn apply_patch(&mut self, patch: VehiclePatch) {
        let VehiclePatch {
            vehicle_name,
            model,
            status,
            last_seen,
            location,
            telemetry,
            activity,
        } = patch;

        if let Some(vehicle_name) = vehicle_name {
            self.vehicle_name = vehicle_name;
        }
        if let Some(model) = model {
            self.model = model;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(last_seen) = last_seen {
            self.last_seen = last_seen;
        }
        if let Some(location) = location {
            self.location = location;
        }
        if let Some(telemetry) = telemetry {
            self.telemetry = telemetry;
        }
        if let Some(activity) = activity {
            self.activity = activity;
        }
    }

    pub fn is_online(&self) -> bool {
        self.status == VehicleStatus::Online
    }
}
