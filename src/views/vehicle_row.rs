//! Renderizado de filas y panel de detalle
//!
//! Mapeos puramente de presentación: estado -> clase del badge, fecha ->
//! texto legible, telemetría -> texto con unidades.

use serde::Serialize;

use crate::controllers::detail_panel::DetailPanel;
use crate::models::dashboard::PanelMode;
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::utils::formatting::{display_datetime, iso_timestamp};

/// Clase CSS del badge de estado
pub fn status_class(status: VehicleStatus) -> &'static str {
    match status {
        VehicleStatus::Online => "status-online",
        VehicleStatus::Offline => "status-offline",
    }
}

/// Una fila de la tabla
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRowView {
    pub id: String,
    pub vehicle_name: String,
    pub model: String,
    pub status: VehicleStatus,
    pub status_class: &'static str,
    pub last_seen: String,
    pub last_seen_display: String,
    pub location: String,
    pub selected: bool,
}

impl VehicleRowView {
    pub fn render(vehicle: &Vehicle, selected: bool) -> Self {
        Self {
            id: vehicle.id.clone(),
            vehicle_name: vehicle.vehicle_name.clone(),
            model: vehicle.model.clone(),
            status: vehicle.status,
            status_class: status_class(vehicle.status),
            last_seen: iso_timestamp(&vehicle.last_seen),
            last_seen_display: display_datetime(&vehicle.last_seen),
            location: vehicle.location.clone(),
            selected,
        }
    }
}

/// Vista completa del panel de detalle
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetailPanelView {
    pub id: String,
    pub vehicle_name: String,
    pub model: String,
    pub status: VehicleStatus,
    pub status_class: &'static str,
    pub last_seen_display: String,
    pub location: String,
    pub speed_display: String,
    pub battery_display: String,
    pub activity: Vec<String>,
    pub mode: PanelMode,
    pub edited_name: String,
    pub edited_status: VehicleStatus,
    pub save_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DetailPanelView {
    pub fn render(panel: &DetailPanel) -> Self {
        let vehicle = panel.vehicle();
        Self {
            id: vehicle.id.clone(),
            vehicle_name: vehicle.vehicle_name.clone(),
            model: vehicle.model.clone(),
            status: vehicle.status,
            status_class: status_class(vehicle.status),
            last_seen_display: display_datetime(&vehicle.last_seen),
            location: vehicle.location.clone(),
            speed_display: format!("{} km/h", vehicle.telemetry.speed),
            battery_display: format!("{}%", vehicle.telemetry.battery),
            activity: vehicle.activity.clone(),
            mode: panel.mode(),
            edited_name: panel.edited_name().to_string(),
            edited_status: panel.edited_status(),
            save_label: if panel.mode() == PanelMode::Saving {
                "Saving..."
            } else {
                "Save"
            },
            error: panel.last_error().map(str::to_string),
        }
    }
}
