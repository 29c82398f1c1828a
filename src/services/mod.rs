//! Servicios
//!
//! Este módulo contiene los servicios auxiliares del dashboard.

pub mod csv_export;

pub use csv_export::{export_vehicles_csv, EXPORT_FILENAME};
