pub mod detail_panel;
pub mod fleet_dashboard;
pub mod vehicle_controller;
