//! Tipos del estado de la vista del dashboard
//!
//! Filtros, orden y modos del panel de detalle que se intercambian con el cliente.

use serde::{Deserialize, Serialize};

use super::vehicle::{Vehicle, VehicleStatus};

/// Tamaño fijo de página del listado
pub const PAGE_SIZE: usize = 5;

/// Filtro por estado
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Online,
    Offline,
}

impl StatusFilter {
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Online => vehicle.status == VehicleStatus::Online,
            StatusFilter::Offline => vehicle.status == VehicleStatus::Offline,
        }
    }
}

/// Columnas ordenables
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    VehicleName,
    LastSeen,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Modo del panel de detalle
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PanelMode {
    #[default]
    Viewing,
    Editing,
    Saving,
}

impl PanelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelMode::Viewing => "viewing",
            PanelMode::Editing => "editing",
            PanelMode::Saving => "saving",
        }
    }
}
