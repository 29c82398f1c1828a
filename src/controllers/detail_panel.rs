//! Panel de detalle de un vehículo
//!
//! Máquina de estados `viewing -> editing -> saving -> viewing`. Sólo el
//! nombre y el estado son editables.

use crate::models::dashboard::PanelMode;
use crate::models::vehicle::{Vehicle, VehiclePatch, VehicleStatus};
use crate::utils::errors::{PanelError, StoreError};

/// Mensaje mostrado al usuario cuando falla el guardado
pub const SAVE_FAILED_MESSAGE: &str = "Failed to update vehicle. Please try again.";

#[derive(Debug, Clone)]
pub struct DetailPanel {
    vehicle: Vehicle,
    mode: PanelMode,
    edited_name: String,
    edited_status: VehicleStatus,
    last_error: Option<String>,
}

impl DetailPanel {
    pub fn open(vehicle: Vehicle) -> Self {
        Self {
            edited_name: vehicle.vehicle_name.clone(),
            edited_status: vehicle.status,
            vehicle,
            mode: PanelMode::Viewing,
            last_error: None,
        }
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn mode(&self) -> PanelMode {
        self.mode
    }

    pub fn edited_name(&self) -> &str {
        &self.edited_name
    }

    pub fn edited_status(&self) -> VehicleStatus {
        self.edited_status
    }

    /// Último error de guardado, si el último intento falló
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn begin_edit(&mut self) -> Result<(), PanelError> {
        self.expect_mode(PanelMode::Viewing, "edit")?;
        self.reset_drafts();
        self.mode = PanelMode::Editing;
        Ok(())
    }

    /// Cambiar los valores en edición
    pub fn set_draft(
        &mut self,
        vehicle_name: Option<String>,
        status: Option<VehicleStatus>,
    ) -> Result<(), PanelError> {
        self.expect_mode(PanelMode::Editing, "change the draft")?;
        if let Some(vehicle_name) = vehicle_name {
            self.edited_name = vehicle_name;
        }
        if let Some(status) = status {
            self.edited_status = status;
        }
        Ok(())
    }

    /// Descartar la edición y volver a los valores originales
    pub fn cancel(&mut self) -> Result<(), PanelError> {
        self.expect_mode(PanelMode::Editing, "cancel")?;
        self.reset_drafts();
        self.last_error = None;
        self.mode = PanelMode::Viewing;
        Ok(())
    }

    /// Pasar a `saving` y devolver el parche a enviar al store
    pub fn begin_save(&mut self) -> Result<VehiclePatch, PanelError> {
        self.expect_mode(PanelMode::Editing, "save")?;
        self.mode = PanelMode::Saving;
        self.last_error = None;
        Ok(VehiclePatch::name_and_status(
            self.edited_name.clone(),
            self.edited_status,
        ))
    }

    /// Resolver un guardado en curso.
    ///
    /// Éxito: vuelve a `viewing` con el registro actualizado. Error: vuelve a
    /// `editing` conservando lo escrito para reintentar.
    pub fn finish_save(&mut self, result: &Result<Vehicle, StoreError>) {
        if self.mode != PanelMode::Saving {
            return;
        }

        match result {
            Ok(updated) => {
                self.vehicle = updated.clone();
                self.mode = PanelMode::Viewing;
                self.reset_drafts();
            }
            Err(_) => {
                self.last_error = Some(SAVE_FAILED_MESSAGE.to_string());
                self.mode = PanelMode::Editing;
            }
        }
    }

    /// Reemplazar el registro mostrado
    pub fn refresh(&mut self, vehicle: Vehicle) {
        self.vehicle = vehicle;
        if self.mode == PanelMode::Viewing {
            self.reset_drafts();
        }
    }

    fn reset_drafts(&mut self) {
        self.edited_name = self.vehicle.vehicle_name.clone();
        self.edited_status = self.vehicle.status;
    }

    fn expect_mode(&self, expected: PanelMode, action: &'static str) -> Result<(), PanelError> {
        if self.mode == expected {
            Ok(())
        } else {
            Err(PanelError::InvalidTransition {
                action,
                mode: self.mode.as_str(),
            })
        }
    }
}
