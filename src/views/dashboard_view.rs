//! Vista derivada del dashboard
//!
//! Se recalcula entera desde el estado del controlador en cada petición.

use serde::Serialize;

use super::vehicle_row::{DetailPanelView, VehicleRowView};
use crate::controllers::fleet_dashboard::FleetDashboard;
use crate::models::dashboard::{SortField, SortOrder, StatusFilter};
use crate::models::vehicle::Vehicle;

pub const EMPTY_MESSAGE: &str = "No vehicles found";

/// Barra de estadísticas
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatsView {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
    pub showing: usize,
}

impl StatsView {
    pub fn compute(vehicles: &[Vehicle], showing: usize) -> Self {
        let online = vehicles.iter().filter(|v| v.is_online()).count();
        Self {
            total: vehicles.len(),
            online,
            offline: vehicles.len() - online,
            showing,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationView {
    pub current_page: usize,
    pub total_pages: usize,
    pub label: String,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Columna ordenada y su dirección (indicador de flecha)
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SortView {
    pub field: SortField,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub loading: bool,
    pub stats: StatsView,
    pub search_term: String,
    pub status_filter: StatusFilter,
    pub sort: Option<SortView>,
    pub rows: Vec<VehicleRowView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
    pub pagination: PaginationView,
    pub detail: Option<DetailPanelView>,
    pub add_form_open: bool,
}

impl DashboardView {
    pub fn build(dashboard: &FleetDashboard) -> Self {
        let filtered = dashboard.filtered_and_sorted();
        let total_pages = dashboard.total_pages();
        let selected_id = dashboard.selected_vehicle().map(|v| v.id.as_str());

        let rows: Vec<VehicleRowView> = dashboard
            .page_items()
            .into_iter()
            .map(|v| VehicleRowView::render(v, selected_id == Some(v.id.as_str())))
            .collect();

        Self {
            loading: dashboard.is_loading(),
            stats: StatsView::compute(dashboard.vehicles(), filtered.len()),
            search_term: dashboard.search_term().to_string(),
            status_filter: dashboard.status_filter(),
            sort: dashboard.sort_field().map(|field| SortView {
                field,
                order: dashboard.sort_order(),
            }),
            empty_message: rows.is_empty().then_some(EMPTY_MESSAGE),
            rows,
            pagination: PaginationView {
                current_page: dashboard.current_page(),
                total_pages,
                label: format!("Page {} of {}", dashboard.current_page(), total_pages.max(1)),
                has_previous: dashboard.has_previous_page(),
                has_next: dashboard.has_next_page(),
            },
            detail: dashboard.detail().map(DetailPanelView::render),
            add_form_open: dashboard.is_add_form_open(),
        }
    }
}
