//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores y formato de fechas.

pub mod errors;
pub mod formatting;
