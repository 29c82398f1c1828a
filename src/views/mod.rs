//! Vistas
//!
//! Modelos de presentación que se envían al navegador.

pub mod dashboard_view;
pub mod vehicle_row;

pub use dashboard_view::DashboardView;
pub use vehicle_row::{DetailPanelView, VehicleRowView};
