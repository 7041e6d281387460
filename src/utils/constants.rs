/// Sentinel substituted for every output element when the position is invalid.
pub const FILL_VALUE: f64 = -9999.0;

pub const LAT_MIN: f64 = -90.0;
pub const LAT_MAX: f64 = 90.0;
pub const LON_MIN: f64 = -180.0;
pub const LON_MAX: f64 = 180.0;

/// Centimeters per meter.
pub const CM_PER_M: f64 = 100.0;

/// Seconds between the NTP epoch (1900-01-01) and the Unix epoch (1970-01-01).
pub const NTP_UNIX_OFFSET: i64 = 2_208_988_800;
pub(crate) const S_TO_US: f64 = 1e6;
