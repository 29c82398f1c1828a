//! Utilidades de formato y conversión
//!
//! Conversión de entradas de formulario (fechas `datetime-local`, números en
//! texto) y formato de fechas para mostrar en la tabla.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use validator::ValidationError;

/// Formatos aceptados para un input `datetime-local`
const DATETIME_LOCAL_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Fecha para mostrar en filas y detalle, p.ej. `11/18/2025, 9:30:00 AM`
pub fn display_datetime(value: &DateTime<Utc>) -> String {
    value.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Timestamp ISO-8601 en UTC con sufijo `Z`
pub fn iso_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Convertir el valor de un input `datetime-local` a timestamp completo.
///
/// El valor no lleva zona horaria; se interpreta como UTC. También se acepta
/// un RFC 3339 completo.
pub fn parse_datetime_local(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    DATETIME_LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"YYYY-MM-DDTHH:MM".to_string());
            error
        })
}

/// Convertir texto a número como lo hace un formulario del navegador.
///
/// Texto vacío vale 0. Un valor no numérico devuelve `None` en vez de NaN.
pub fn coerce_number(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return Some(0.0);
    }
    value.parse::<f64>().ok().filter(|number| number.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_datetime() {
        let morning = Utc.with_ymd_and_hms(2025, 11, 18, 9, 30, 0).unwrap();
        assert_eq!(display_datetime(&morning), "11/18/2025, 9:30:00 AM");

        let afternoon = Utc.with_ymd_and_hms(2025, 11, 15, 16, 10, 0).unwrap();
        assert_eq!(display_datetime(&afternoon), "11/15/2025, 4:10:00 PM");
    }

    #[test]
    fn test_iso_timestamp_uses_z_suffix() {
        let value = Utc.with_ymd_and_hms(2025, 11, 18, 11, 0, 0).unwrap();
        assert_eq!(iso_timestamp(&value), "2025-11-18T11:00:00Z");
    }

    #[test]
    fn test_parse_datetime_local() {
        let parsed = parse_datetime_local("2025-11-20T08:15").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 11, 20, 8, 15, 0).unwrap());

        let with_seconds = parse_datetime_local("2025-11-20T08:15:30").unwrap();
        assert_eq!(with_seconds, Utc.with_ymd_and_hms(2025, 11, 20, 8, 15, 30).unwrap());

        let rfc3339 = parse_datetime_local("2025-11-20T10:15:00+02:00").unwrap();
        assert_eq!(rfc3339, Utc.with_ymd_and_hms(2025, 11, 20, 8, 15, 0).unwrap());

        assert!(parse_datetime_local("").is_err());
        assert!(parse_datetime_local("yesterday").is_err());
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number("42"), Some(42.0));
        assert_eq!(coerce_number(" 12.5 "), Some(12.5));
        assert_eq!(coerce_number(""), Some(0.0));
        assert_eq!(coerce_number("fast"), None);
        assert_eq!(coerce_number("NaN"), None);
        assert_eq!(coerce_number("inf"), None);
    }
}
