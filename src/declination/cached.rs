use crate::declination::{DeclinationError, DeclinationProvider};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

type Key = [u64; 4];

/// Memoizes another provider's successful estimates.
///
/// Entries are keyed on the exact bit patterns of the inputs, so a cached answer is always
/// the answer the wrapped provider gave for identical arguments. Failures are not cached.
#[derive(Debug)]
pub struct CachedDeclination<P> {
    inner: P,
    cache: Mutex<HashMap<Key, f64>>,
}

impl<P: DeclinationProvider> CachedDeclination<P> {
    pub fn new(inner: P) -> Self {
        CachedDeclination {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Number of distinct inputs seen so far.
    pub fn len(&self) -> usize {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: DeclinationProvider> DeclinationProvider for CachedDeclination<P> {
    fn declination(
        &self,
        lat: f64,
        lon: f64,
        vertical: f64,
        ntp_timestamp: f64,
    ) -> Result<f64, DeclinationError> {
        let key = [
            lat.to_bits(),
            lon.to_bits(),
            vertical.to_bits(),
            ntp_timestamp.to_bits(),
        ];
        // A poisoned lock only means another thread panicked mid-insert; the map is still usable
        if let Some(theta) = self
            .cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&key)
        {
            debug!(lat, lon, vertical, ntp_timestamp, "declination cache hit");
            return Ok(*theta);
        }

        let theta = self.inner.declination(lat, lon, vertical, ntp_timestamp)?;
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key, theta);
        Ok(theta)
    }
}
