//! Configuración del proyecto
//!
//! Este módulo contiene la configuración del servidor y de la latencia
//! simulada del store.

pub mod environment;

pub use environment::*;
