use crate::declination::{DeclinationError, DeclinationProvider};
use crate::utils::time::ntp_to_datetime;
use chrono::Datelike;
use ::igrf::{declination, Error as IgrfError};
use time::{Date, Month};
use tracing::trace;

type Result<T> = std::result::Result<T, DeclinationError>;

/// Declination from the International Geomagnetic Reference Field main-field model.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgrfDeclination;

/// Calendar date of an NTP timestamp, in the form the field model expects.
fn igrf_date(ntp_timestamp: f64) -> Result<Date> {
    let date_time = ntp_to_datetime(ntp_timestamp)?;
    let month = Month::try_from(date_time.month() as u8)
        .map_err(|_| DeclinationError::InvalidTimestamp(ntp_timestamp))?;
    Date::from_calendar_date(date_time.year(), month, date_time.day() as u8)
        .map_err(|_| DeclinationError::InvalidTimestamp(ntp_timestamp))
}

impl DeclinationProvider for IgrfDeclination {
    fn declination(&self, lat: f64, lon: f64, vertical: f64, ntp_timestamp: f64) -> Result<f64> {
        let date = igrf_date(ntp_timestamp)?;

        // The model only takes heights; anything below sea level is evaluated at the surface
        let altitude = vertical.max(0.0).round() as u32;

        let b_field = declination(lat, lon, altitude, date).map_err(|e| match e {
            IgrfError::DateOutOfRange(_) => DeclinationError::OutOfModelRange(format!(
                "IGRF has no coefficients for {date}"
            )),
            IgrfError::LatitudeOutOfBounds | IgrfError::LongitudeOutOfBounds => {
                DeclinationError::Model(format!("{e} at ({lat}, {lon})"))
            }
        })?;

        // Horizontal field components are north (x) and east (y)
        let theta = b_field.y.atan2(b_field.x).to_degrees();
        trace!(lat, lon, altitude, %date, theta, "igrf declination");
        Ok(theta)
    }
}
