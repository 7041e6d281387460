//! Per-instrument entry points producing the L1 true-North velocity products.
//!
//! Each instrument family reports velocities in its own units. The adapters validate the
//! deployment position, correct for magnetic declination and convert the result to m/s.
//! An invalid latitude or longitude anywhere in the batch replaces the whole output with
//! [`FILL_VALUE`].
use crate::correction::vel_mag_correction::{
    par_vel_mag_correction, vel_mag_correction, VerticalReference,
};
use crate::declination::DeclinationProvider;
use crate::error::VelmagError;
use crate::utils::constants::{CM_PER_M, FILL_VALUE};
use crate::utils::coordinates::{valid_lat, valid_lon};
use ndarray::{ArrayD, ArrayViewD};
use tracing::warn;

type Result<T> = std::result::Result<T, VelmagError>;

/// Units an instrument reports its raw velocities in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VelocityUnits {
    CentimetersPerSecond,
    MetersPerSecond,
}

impl VelocityUnits {
    pub fn to_meters_per_second(self, velocity: f64) -> f64 {
        match self {
            VelocityUnits::CentimetersPerSecond => velocity / CM_PER_M,
            VelocityUnits::MetersPerSecond => velocity,
        }
    }
}

/// Horizontal velocity component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    East,
    North,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrumentFamily {
    /// VEL3D-B Nobska MAVS-4
    Nobska,
    /// VEL3D-CD Nortek Vector, VEL3D-K Nortek Aquadopp II and VELPT Nortek Aquadopp
    Nortek,
}

/// Both components of a corrected velocity, in m/s.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectedVelocity {
    pub east: ArrayD<f64>,
    pub north: ArrayD<f64>,
}

impl CorrectedVelocity {
    pub fn component(&self, component: Component) -> &ArrayD<f64> {
        match component {
            Component::East => &self.east,
            Component::North => &self.north,
        }
    }

    pub fn into_component(self, component: Component) -> ArrayD<f64> {
        match component {
            Component::East => self.east,
            Component::North => self.north,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Execution {
    Sequential,
    Parallel,
}

fn fill_like(u: &ArrayViewD<f64>) -> ArrayD<f64> {
    ArrayD::from_elem(u.raw_dim(), FILL_VALUE)
}

impl InstrumentFamily {
    pub fn units(self) -> VelocityUnits {
        match self {
            InstrumentFamily::Nobska => VelocityUnits::CentimetersPerSecond,
            InstrumentFamily::Nortek => VelocityUnits::MetersPerSecond,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn correct<P: DeclinationProvider + ?Sized>(
        self,
        execution: Execution,
        provider: &P,
        u: ArrayViewD<f64>,
        v: ArrayViewD<f64>,
        lat: ArrayViewD<f64>,
        lon: ArrayViewD<f64>,
        ntp_timestamp: ArrayViewD<f64>,
        z: ArrayViewD<f64>,
    ) -> Result<CorrectedVelocity> {
        if !valid_lat(&lat) || !valid_lon(&lon) {
            warn!(
                instrument = ?self,
                samples = u.len(),
                "latitude or longitude out of range, returning fill values"
            );
            return Ok(CorrectedVelocity {
                east: fill_like(&u),
                north: fill_like(&u),
            });
        }

        let (u_cor, v_cor) = match execution {
            Execution::Sequential => vel_mag_correction(
                provider,
                u,
                v,
                lat,
                lon,
                ntp_timestamp,
                z,
                VerticalReference::Depth,
            )?,
            Execution::Parallel => par_vel_mag_correction(
                provider,
                u,
                v,
                lat,
                lon,
                ntp_timestamp,
                z,
                VerticalReference::Depth,
            )?,
        };

        let units = self.units();
        Ok(CorrectedVelocity {
            east: u_cor.mapv_into(|x| units.to_meters_per_second(x)),
            north: v_cor.mapv_into(|x| units.to_meters_per_second(x)),
        })
    }

    /// Corrects raw magnetic-frame velocities from this instrument family for magnetic
    /// declination, returning both true-North components in m/s.
    ///
    /// `z` is the instrument depth in meters (positive). If any latitude or longitude is out
    /// of range both components are filled with [`FILL_VALUE`] in the shape of `u`.
    ///
    /// # Errors
    /// Will return `Err` if the shapes are incompatible or the declination provider fails.
    #[allow(clippy::too_many_arguments)]
    pub fn mag_corr<P: DeclinationProvider + ?Sized>(
        self,
        provider: &P,
        u: ArrayViewD<f64>,
        v: ArrayViewD<f64>,
        lat: ArrayViewD<f64>,
        lon: ArrayViewD<f64>,
        ntp_timestamp: ArrayViewD<f64>,
        z: ArrayViewD<f64>,
    ) -> Result<CorrectedVelocity> {
        self.correct(
            Execution::Sequential,
            provider,
            u,
            v,
            lat,
            lon,
            ntp_timestamp,
            z,
        )
    }

    /// Parallel version of [`InstrumentFamily::mag_corr`], with identical output.
    ///
    /// # Errors
    /// Will return `Err` if the shapes are incompatible or the declination provider fails.
    #[allow(clippy::too_many_arguments)]
    pub fn par_mag_corr<P: DeclinationProvider + ?Sized>(
        self,
        provider: &P,
        u: ArrayViewD<f64>,
        v: ArrayViewD<f64>,
        lat: ArrayViewD<f64>,
        lon: ArrayViewD<f64>,
        ntp_timestamp: ArrayViewD<f64>,
        z: ArrayViewD<f64>,
    ) -> Result<CorrectedVelocity> {
        self.correct(
            Execution::Parallel,
            provider,
            u,
            v,
            lat,
            lon,
            ntp_timestamp,
            z,
        )
    }

    /// Like [`InstrumentFamily::mag_corr`], keeping only one component.
    ///
    /// # Errors
    /// Will return `Err` if the shapes are incompatible or the declination provider fails.
    #[allow(clippy::too_many_arguments)]
    pub fn mag_corr_component<P: DeclinationProvider + ?Sized>(
        self,
        component: Component,
        provider: &P,
        u: ArrayViewD<f64>,
        v: ArrayViewD<f64>,
        lat: ArrayViewD<f64>,
        lon: ArrayViewD<f64>,
        ntp_timestamp: ArrayViewD<f64>,
        z: ArrayViewD<f64>,
    ) -> Result<ArrayD<f64>> {
        Ok(self
            .mag_corr(provider, u, v, lat, lon, ntp_timestamp, z)?
            .into_component(component))
    }
}

/// Eastward velocity (L1 VELPTTU-VLE) from a VEL3D-B Nobska MAVS-4, in m/s.
///
/// `u` and `v` are the magnetic-frame velocities in cm/s.
///
/// # Errors
/// Will return `Err` if the shapes are incompatible or the declination provider fails.
pub fn nobska_mag_corr_east<P: DeclinationProvider + ?Sized>(
    provider: &P,
    u: ArrayViewD<f64>,
    v: ArrayViewD<f64>,
    lat: ArrayViewD<f64>,
    lon: ArrayViewD<f64>,
    ntp_timestamp: ArrayViewD<f64>,
    z: ArrayViewD<f64>,
) -> Result<ArrayD<f64>> {
    InstrumentFamily::Nobska.mag_corr_component(
        Component::East,
        provider,
        u,
        v,
        lat,
        lon,
        ntp_timestamp,
        z,
    )
}

/// Northward velocity (L1 VELPTTU-VLN) from a VEL3D-B Nobska MAVS-4, in m/s.
///
/// `u` and `v` are the magnetic-frame velocities in cm/s.
///
/// # Errors
/// Will return `Err` if the shapes are incompatible or the declination provider fails.
pub fn nobska_mag_corr_north<P: DeclinationProvider + ?Sized>(
    provider: &P,
    u: ArrayViewD<f64>,
    v: ArrayViewD<f64>,
    lat: ArrayViewD<f64>,
    lon: ArrayViewD<f64>,
    ntp_timestamp: ArrayViewD<f64>,
    z: ArrayViewD<f64>,
) -> Result<ArrayD<f64>> {
    InstrumentFamily::Nobska.mag_corr_component(
        Component::North,
        provider,
        u,
        v,
        lat,
        lon,
        ntp_timestamp,
        z,
    )
}

/// Eastward velocity (L1 VELPTTU-VLE or VELPTMN-VLE) from a Nortek Vector, Aquadopp II or
/// Aquadopp, in m/s.
///
/// Nortek instruments already report m/s, so no scaling is applied.
///
/// # Errors
/// Will return `Err` if the shapes are incompatible or the declination provider fails.
pub fn nortek_mag_corr_east<P: DeclinationProvider + ?Sized>(
    provider: &P,
    u: ArrayViewD<f64>,
    v: ArrayViewD<f64>,
    lat: ArrayViewD<f64>,
    lon: ArrayViewD<f64>,
    ntp_timestamp: ArrayViewD<f64>,
    z: ArrayViewD<f64>,
) -> Result<ArrayD<f64>> {
    InstrumentFamily::Nortek.mag_corr_component(
        Component::East,
        provider,
        u,
        v,
        lat,
        lon,
        ntp_timestamp,
        z,
    )
}

/// Northward velocity (L1 VELPTTU-VLN or VELPTMN-VLN) from a Nortek Vector, Aquadopp II or
/// Aquadopp, in m/s.
///
/// # Errors
/// Will return `Err` if the shapes are incompatible or the declination provider fails.
pub fn nortek_mag_corr_north<P: DeclinationProvider + ?Sized>(
    provider: &P,
    u: ArrayViewD<f64>,
    v: ArrayViewD<f64>,
    lat: ArrayViewD<f64>,
    lon: ArrayViewD<f64>,
    ntp_timestamp: ArrayViewD<f64>,
    z: ArrayViewD<f64>,
) -> Result<ArrayD<f64>> {
    InstrumentFamily::Nortek.mag_corr_component(
        Component::North,
        provider,
        u,
        v,
        lat,
        lon,
        ntp_timestamp,
        z,
    )
}
