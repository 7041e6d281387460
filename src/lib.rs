//! Magnetic declination correction of current-meter velocities.
//!
//! Velocities measured relative to magnetic North are rotated into the true-North frame by
//! the local declination, then converted to m/s for each instrument family. See
//! [`correction`] for the entry points and [`declination`] for the field-model seam.
#[cfg(feature = "python")]
use pyo3::prelude::{Bound, PyModule, PyResult};
#[cfg(feature = "python")]
use pyo3::{pymodule, wrap_pyfunction};

pub mod cli;
pub mod correction;
pub mod declination;
pub mod error;
#[cfg(feature = "python")]
mod python;
pub mod utils;

pub use correction::{
    nobska_mag_corr_east, nobska_mag_corr_north, nortek_mag_corr_east, nortek_mag_corr_north,
    vel_mag_correction, InstrumentFamily, VerticalReference,
};
pub use declination::{DeclinationError, DeclinationProvider};
pub use error::VelmagError;
pub use utils::constants::FILL_VALUE;
pub use utils::coordinates::{valid_lat, valid_lon};

/// Magnetic declination corrections for velocity instruments.
#[cfg(feature = "python")]
#[pymodule]
fn velmag(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(python::valid_lat_py, m)?)?;
    m.add_function(wrap_pyfunction!(python::valid_lon_py, m)?)?;
    m.add_function(wrap_pyfunction!(python::vel_mag_correction_py, m)?)?;
    m.add_function(wrap_pyfunction!(python::nobska_mag_corr_east_py, m)?)?;
    m.add_function(wrap_pyfunction!(python::nobska_mag_corr_north_py, m)?)?;
    m.add_function(wrap_pyfunction!(python::nortek_mag_corr_east_py, m)?)?;
    m.add_function(wrap_pyfunction!(python::nortek_mag_corr_north_py, m)?)?;
    m.add_function(wrap_pyfunction!(python::vel_mag_corr_cli, m)?)?;

    Ok(())
}
