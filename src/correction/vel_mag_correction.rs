//! Magnetic declination correction of velocity arrays
use crate::correction::rotation::{magnetic_correction, magnetic_correction_array};
use crate::declination::DeclinationProvider;
use crate::error::VelmagError;
use itertools::izip;
use ndarray::{ArrayD, ArrayViewD, Dimension, IxDyn, Zip};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::debug;

type Result<T> = std::result::Result<T, VelmagError>;

/// Whether a vertical offset `z` is a depth below or a height above sea level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerticalReference {
    #[default]
    Depth,
    Height,
}

impl VerticalReference {
    /// The zflag: -1 for depth, 1 for height.
    pub fn sign(self) -> f64 {
        match self {
            VerticalReference::Depth => -1.0,
            VerticalReference::Height => 1.0,
        }
    }

    /// Signed vertical coordinate handed to the declination provider.
    pub fn signed(self, z: f64) -> f64 {
        self.sign() * z
    }
}

impl TryFrom<i64> for VerticalReference {
    type Error = VelmagError;

    fn try_from(zflag: i64) -> Result<Self> {
        match zflag {
            -1 => Ok(VerticalReference::Depth),
            1 => Ok(VerticalReference::Height),
            _ => Err(VelmagError::InvalidZflag(zflag)),
        }
    }
}

/// Broadcasts one of the per-sample inputs to the velocity shape.
fn broadcast_to<'a>(
    name: &'static str,
    values: &'a ArrayViewD<'_, f64>,
    shape: &IxDyn,
) -> Result<ArrayViewD<'a, f64>> {
    values
        .broadcast(shape.clone())
        .ok_or_else(|| VelmagError::Broadcast {
            name,
            from: values.shape().to_vec(),
            to: shape.slice().to_vec(),
        })
}

/// Pairs every velocity sample with its own latitude, longitude, signed vertical offset and
/// time, in logical (row-major) order.
fn sample_sites(
    u: &ArrayViewD<f64>,
    v: &ArrayViewD<f64>,
    lat: &ArrayViewD<f64>,
    lon: &ArrayViewD<f64>,
    ntp_timestamp: &ArrayViewD<f64>,
    z: &ArrayViewD<f64>,
    zflag: VerticalReference,
) -> Result<Vec<(f64, f64, f64, f64)>> {
    if u.shape() != v.shape() {
        return Err(VelmagError::ShapeMismatch {
            u: u.shape().to_vec(),
            v: v.shape().to_vec(),
        });
    }
    let shape = u.raw_dim();
    let lat = broadcast_to("lat", lat, &shape)?;
    let lon = broadcast_to("lon", lon, &shape)?;
    let ntp_timestamp = broadcast_to("timestamp", ntp_timestamp, &shape)?;
    let z = broadcast_to("z", z, &shape)?;

    Ok(izip!(lat.iter(), lon.iter(), z.iter(), ntp_timestamp.iter())
        .map(|(&lat, &lon, &z, &t)| (lat, lon, zflag.signed(z), t))
        .collect())
}

fn theta_array(shape: IxDyn, thetas: Vec<f64>) -> Result<ArrayD<f64>> {
    let from = vec![thetas.len()];
    ArrayD::from_shape_vec(shape.clone(), thetas).map_err(|_| VelmagError::Broadcast {
        name: "theta",
        from,
        to: shape.slice().to_vec(),
    })
}

/// Transforms velocities measured relative to magnetic North into the true-North frame.
///
/// `u` and `v` are the magnetic-frame east and north components and must share a shape.
/// `lat`, `lon`, `ntp_timestamp` (seconds since 1900-01-01) and `z` (meters, positive) may
/// be 0-d or any shape that broadcasts to the velocities; each sample is corrected by the
/// declination at its own position and time. The output keeps the input velocity units.
///
/// Positions are not validated here.
///
/// # Errors
/// Will return `Err` if the shapes are incompatible, or if `provider` fails for any sample.
#[allow(clippy::too_many_arguments)]
pub fn vel_mag_correction<P: DeclinationProvider + ?Sized>(
    provider: &P,
    u: ArrayViewD<f64>,
    v: ArrayViewD<f64>,
    lat: ArrayViewD<f64>,
    lon: ArrayViewD<f64>,
    ntp_timestamp: ArrayViewD<f64>,
    z: ArrayViewD<f64>,
    zflag: VerticalReference,
) -> Result<(ArrayD<f64>, ArrayD<f64>)> {
    let sites = sample_sites(&u, &v, &lat, &lon, &ntp_timestamp, &z, zflag)?;
    debug!(samples = sites.len(), ?zflag, "correcting for magnetic declination");

    let mut thetas = Vec::with_capacity(sites.len());
    for (lat, lon, vertical, t) in sites {
        thetas.push(provider.declination(lat, lon, vertical, t)?);
    }
    let theta = theta_array(u.raw_dim(), thetas)?;

    magnetic_correction_array(theta.view(), u, v)
}

/// Same as [`vel_mag_correction`], evaluating the declination and rotation in parallel.
///
/// # Errors
/// Will return `Err` if the shapes are incompatible, or if `provider` fails for any sample.
#[allow(clippy::too_many_arguments)]
pub fn par_vel_mag_correction<P: DeclinationProvider + ?Sized>(
    provider: &P,
    u: ArrayViewD<f64>,
    v: ArrayViewD<f64>,
    lat: ArrayViewD<f64>,
    lon: ArrayViewD<f64>,
    ntp_timestamp: ArrayViewD<f64>,
    z: ArrayViewD<f64>,
    zflag: VerticalReference,
) -> Result<(ArrayD<f64>, ArrayD<f64>)> {
    let sites = sample_sites(&u, &v, &lat, &lon, &ntp_timestamp, &z, zflag)?;
    debug!(samples = sites.len(), ?zflag, "correcting for magnetic declination in parallel");

    let thetas = sites
        .par_iter()
        .map(|&(lat, lon, vertical, t)| provider.declination(lat, lon, vertical, t))
        .collect::<std::result::Result<Vec<f64>, _>>()?;
    let theta = theta_array(u.raw_dim(), thetas)?;

    let mut u_cor = ArrayD::zeros(u.raw_dim());
    let mut v_cor = ArrayD::zeros(v.raw_dim());
    Zip::from(&mut u_cor)
        .and(&mut v_cor)
        .and(&theta)
        .and(&u)
        .and(&v)
        .par_for_each(|u_cor, v_cor, &theta, &u, &v| {
            (*u_cor, *v_cor) = magnetic_correction(theta, u, v);
        });
    Ok((u_cor, v_cor))
}
