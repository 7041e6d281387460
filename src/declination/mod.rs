//! Sources of magnetic declination.
//!
//! The field model itself is an external collaborator; everything downstream only sees the
//! [`DeclinationProvider`] capability, so tests can swap in a deterministic stub.
pub mod cached;
pub mod error;
pub mod igrf;

pub use self::cached::CachedDeclination;
pub use self::error::DeclinationError;
pub use self::igrf::IgrfDeclination;

type Result<T> = std::result::Result<T, DeclinationError>;

/// Maps a location, signed vertical offset and time onto a magnetic declination.
pub trait DeclinationProvider: Sync {
    /// Returns the declination in degrees, positive East of true North.
    ///
    /// `vertical` is in meters, negative below sea level. `ntp_timestamp` is in seconds since
    /// 1900-01-01.
    ///
    /// # Errors
    /// Will return `Err` if the model cannot produce an estimate for these inputs.
    fn declination(&self, lat: f64, lon: f64, vertical: f64, ntp_timestamp: f64) -> Result<f64>;
}

impl<P: DeclinationProvider + ?Sized> DeclinationProvider for &P {
    fn declination(&self, lat: f64, lon: f64, vertical: f64, ntp_timestamp: f64) -> Result<f64> {
        (**self).declination(lat, lon, vertical, ntp_timestamp)
    }
}

impl<P: DeclinationProvider + ?Sized> DeclinationProvider for Box<P> {
    fn declination(&self, lat: f64, lon: f64, vertical: f64, ntp_timestamp: f64) -> Result<f64> {
        (**self).declination(lat, lon, vertical, ntp_timestamp)
    }
}

/// The same declination everywhere, at all times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedDeclination(pub f64);

impl DeclinationProvider for FixedDeclination {
    fn declination(&self, _lat: f64, _lon: f64, _vertical: f64, _ntp_timestamp: f64) -> Result<f64> {
        Ok(self.0)
    }
}

/// Adapts a closure `(lat, lon, vertical, ntp_timestamp) -> Result<degrees>` into a provider.
#[derive(Debug, Clone, Copy)]
pub struct FnDeclination<F>(pub F);

impl<F> DeclinationProvider for FnDeclination<F>
where
    F: Fn(f64, f64, f64, f64) -> Result<f64> + Sync,
{
    fn declination(&self, lat: f64, lon: f64, vertical: f64, ntp_timestamp: f64) -> Result<f64> {
        (self.0)(lat, lon, vertical, ntp_timestamp)
    }
}
