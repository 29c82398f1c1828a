//! Exportación CSV de la flota
//!
//! Exporta la lista completa del dashboard (incluidas las altas locales),
//! sin filtrar ni paginar. El escritor de `csv` sólo entrecomilla los campos
//! que lo necesitan y escapa comillas internas.

use tracing::info;

use crate::models::vehicle::Vehicle;
use crate::utils::formatting::{display_datetime, iso_timestamp};

/// Nombre del fichero descargado
pub const EXPORT_FILENAME: &str = "vehicles.csv";

pub const EXPORT_HEADERS: [&str; 7] = [
    "ID",
    "Vehicle Name",
    "Model",
    "Status",
    "Last Seen",
    "Date & Time",
    "Location",
];

/// Serializar vehículos a CSV
pub fn export_vehicles_csv<'a, I>(vehicles: I) -> Result<Vec<u8>, csv::Error>
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(EXPORT_HEADERS)?;

    let mut count = 0usize;
    for vehicle in vehicles {
        wtr.write_record([
            vehicle.id.as_str(),
            vehicle.vehicle_name.as_str(),
            vehicle.model.as_str(),
            vehicle.status.as_str(),
            iso_timestamp(&vehicle.last_seen).as_str(),
            display_datetime(&vehicle.last_seen).as_str(),
            vehicle.location.as_str(),
        ])?;
        count += 1;
    }

    let bytes = wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    info!("📤 CSV exportado con {} vehículos", count);
    Ok(bytes)
}
