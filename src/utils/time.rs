use crate::declination::error::DeclinationError;
use crate::utils::constants::S_TO_US;
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// The NTP epoch, 1900-01-01T00:00:00.
pub fn ntp_epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1900, 1, 1)?.and_hms_opt(0, 0, 0)
}

/// Converts an NTP timestamp (seconds since 1900-01-01) into a `NaiveDateTime`, to the
/// nearest microsecond.
///
/// # Errors
/// Will return `Err` if the timestamp is not finite or does not fit in the calendar range
/// supported by `chrono`.
pub fn ntp_to_datetime(ntp_timestamp: f64) -> Result<NaiveDateTime, DeclinationError> {
    if !ntp_timestamp.is_finite() {
        return Err(DeclinationError::InvalidTimestamp(ntp_timestamp));
    }
    let micros = (ntp_timestamp * S_TO_US).round();
    if micros.abs() >= i64::MAX as f64 {
        return Err(DeclinationError::InvalidTimestamp(ntp_timestamp));
    }
    ntp_epoch()
        .and_then(|epoch| epoch.checked_add_signed(Duration::microseconds(micros as i64)))
        .ok_or(DeclinationError::InvalidTimestamp(ntp_timestamp))
}
