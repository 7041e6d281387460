//! numpy entry points mirroring the Rust API
use crate::cli::{run, Args};
use crate::correction::instruments::{Component, InstrumentFamily};
use crate::correction::vel_mag_correction::{vel_mag_correction, VerticalReference};
use crate::declination::IgrfDeclination;
use crate::utils::coordinates::{valid_lat, valid_lon};
use clap::Parser;
use ndarray::{arr0, ArrayD, ArrayViewD};
use numpy::{IntoPyArray, PyArrayDyn, PyReadonlyArrayDyn};
use pyo3::prelude::*;

/// A number or a numpy array of floats or integers.
#[derive(FromPyObject)]
pub(crate) enum ScalarOrArray<'py> {
    Array(PyReadonlyArrayDyn<'py, f64>),
    IntArray(PyReadonlyArrayDyn<'py, i64>),
    Scalar(f64),
}

impl ScalarOrArray<'_> {
    fn to_array(&self) -> ArrayD<f64> {
        match self {
            ScalarOrArray::Array(a) => a.as_array().to_owned(),
            ScalarOrArray::IntArray(a) => widen(a.as_array()),
            ScalarOrArray::Scalar(x) => arr0(*x).into_dyn(),
        }
    }
}

fn widen(values: ArrayViewD<i64>) -> ArrayD<f64> {
    values.mapv(|x| x as f64)
}

fn depth_or_zero(z: Option<ScalarOrArray>) -> ArrayD<f64> {
    z.map(|z| z.to_array())
        .unwrap_or_else(|| arr0(0.0).into_dyn())
}

/// Checks if inputs are valid latitude values.
#[pyfunction]
#[pyo3(name = "valid_lat")]
#[pyo3(text_signature = "(lat, /)")]
pub(crate) fn valid_lat_py<'py>(lat: ScalarOrArray<'py>) -> bool {
    valid_lat(&lat.to_array())
}

/// Checks if inputs are valid longitude values.
#[pyfunction]
#[pyo3(name = "valid_lon")]
#[pyo3(text_signature = "(lon, /)")]
pub(crate) fn valid_lon_py<'py>(lon: ScalarOrArray<'py>) -> bool {
    valid_lon(&lon.to_array())
}

/// Rotates magnetic-frame velocities into the true-North frame using the IGRF declination.
#[pyfunction]
#[pyo3(name = "vel_mag_correction")]
#[pyo3(signature = (u, v, lat, lon, timestamp, z=None, zflag=-1))]
#[allow(clippy::too_many_arguments)]
pub(crate) fn vel_mag_correction_py<'py>(
    py: Python<'py>,
    u: ScalarOrArray<'py>,
    v: ScalarOrArray<'py>,
    lat: ScalarOrArray<'py>,
    lon: ScalarOrArray<'py>,
    timestamp: ScalarOrArray<'py>,
    z: Option<ScalarOrArray<'py>>,
    zflag: i64,
) -> PyResult<(Bound<'py, PyArrayDyn<f64>>, Bound<'py, PyArrayDyn<f64>>)> {
    let zflag = VerticalReference::try_from(zflag)?;
    let (u, v) = (u.to_array(), v.to_array());
    let (lat, lon, timestamp) = (lat.to_array(), lon.to_array(), timestamp.to_array());
    let z = depth_or_zero(z);
    let (u_cor, v_cor) = vel_mag_correction(
        &IgrfDeclination,
        u.view(),
        v.view(),
        lat.view(),
        lon.view(),
        timestamp.view(),
        z.view(),
        zflag,
    )?;
    Ok((u_cor.into_pyarray_bound(py), v_cor.into_pyarray_bound(py)))
}

#[allow(clippy::too_many_arguments)]
fn instrument_component<'py>(
    py: Python<'py>,
    family: InstrumentFamily,
    component: Component,
    u: ScalarOrArray<'py>,
    v: ScalarOrArray<'py>,
    lat: ScalarOrArray<'py>,
    lon: ScalarOrArray<'py>,
    timestamp: ScalarOrArray<'py>,
    z: Option<ScalarOrArray<'py>>,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let (u, v) = (u.to_array(), v.to_array());
    let (lat, lon, timestamp) = (lat.to_array(), lon.to_array(), timestamp.to_array());
    let z = depth_or_zero(z);
    let corrected = family.mag_corr_component(
        component,
        &IgrfDeclination,
        u.view(),
        v.view(),
        lat.view(),
        lon.view(),
        timestamp.view(),
        z.view(),
    )?;
    Ok(corrected.into_pyarray_bound(py))
}

/// Eastward velocity in m/s from a VEL3D-B Nobska MAVS-4 (inputs in cm/s).
#[pyfunction]
#[pyo3(name = "nobska_mag_corr_east")]
#[pyo3(signature = (u, v, lat, lon, timestamp, z=None))]
pub(crate) fn nobska_mag_corr_east_py<'py>(
    py: Python<'py>,
    u: ScalarOrArray<'py>,
    v: ScalarOrArray<'py>,
    lat: ScalarOrArray<'py>,
    lon: ScalarOrArray<'py>,
    timestamp: ScalarOrArray<'py>,
    z: Option<ScalarOrArray<'py>>,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let family = InstrumentFamily::Nobska;
    instrument_component(py, family, Component::East, u, v, lat, lon, timestamp, z)
}

/// Northward velocity in m/s from a VEL3D-B Nobska MAVS-4 (inputs in cm/s).
#[pyfunction]
#[pyo3(name = "nobska_mag_corr_north")]
#[pyo3(signature = (u, v, lat, lon, timestamp, z=None))]
pub(crate) fn nobska_mag_corr_north_py<'py>(
    py: Python<'py>,
    u: ScalarOrArray<'py>,
    v: ScalarOrArray<'py>,
    lat: ScalarOrArray<'py>,
    lon: ScalarOrArray<'py>,
    timestamp: ScalarOrArray<'py>,
    z: Option<ScalarOrArray<'py>>,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let family = InstrumentFamily::Nobska;
    instrument_component(py, family, Component::North, u, v, lat, lon, timestamp, z)
}

/// Eastward velocity in m/s from a Nortek Vector, Aquadopp II or Aquadopp.
#[pyfunction]
#[pyo3(name = "nortek_mag_corr_east")]
#[pyo3(signature = (u, v, lat, lon, timestamp, z=None))]
pub(crate) fn nortek_mag_corr_east_py<'py>(
    py: Python<'py>,
    u: ScalarOrArray<'py>,
    v: ScalarOrArray<'py>,
    lat: ScalarOrArray<'py>,
    lon: ScalarOrArray<'py>,
    timestamp: ScalarOrArray<'py>,
    z: Option<ScalarOrArray<'py>>,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let family = InstrumentFamily::Nortek;
    instrument_component(py, family, Component::East, u, v, lat, lon, timestamp, z)
}

/// Northward velocity in m/s from a Nortek Vector, Aquadopp II or Aquadopp.
#[pyfunction]
#[pyo3(name = "nortek_mag_corr_north")]
#[pyo3(signature = (u, v, lat, lon, timestamp, z=None))]
pub(crate) fn nortek_mag_corr_north_py<'py>(
    py: Python<'py>,
    u: ScalarOrArray<'py>,
    v: ScalarOrArray<'py>,
    lat: ScalarOrArray<'py>,
    lon: ScalarOrArray<'py>,
    timestamp: ScalarOrArray<'py>,
    z: Option<ScalarOrArray<'py>>,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let family = InstrumentFamily::Nortek;
    instrument_component(py, family, Component::North, u, v, lat, lon, timestamp, z)
}

/// Corrects a CSV file of velocity records, taking arguments from `sys.argv`.
#[pyfunction]
#[pyo3(name = "vel_mag_corr")]
pub(crate) fn vel_mag_corr_cli(py: Python) -> PyResult<()> {
    let argv = py
        .import_bound("sys")?
        .getattr("argv")?
        .extract::<Vec<String>>()?;
    let args = Args::parse_from(argv);
    run(&args)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn integer_arrays_become_floats() {
        let counts = arr2(&[[100_i64, 0], [-25, 3]]).into_dyn();
        let widened = widen(counts.view());
        assert_eq!(widened, arr2(&[[100.0, 0.0], [-25.0, 3.0]]).into_dyn());
        assert!(!valid_lat(&widened));
    }
}
