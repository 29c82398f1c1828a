//! Modelos del sistema
//!
//! Este módulo contiene el registro Vehicle y los tipos de estado
//! de la vista del dashboard.

pub mod dashboard;
pub mod vehicle;

pub use dashboard::*;
pub use vehicle::*;
