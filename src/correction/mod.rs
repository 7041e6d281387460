pub mod instruments;
pub mod rotation;
pub mod vel_mag_correction;

pub use instruments::{
    nobska_mag_corr_east, nobska_mag_corr_north, nortek_mag_corr_east, nortek_mag_corr_north,
    Component, CorrectedVelocity, InstrumentFamily, VelocityUnits,
};
pub use rotation::{magnetic_correction, magnetic_correction_array};
pub use vel_mag_correction::{par_vel_mag_correction, vel_mag_correction, VerticalReference};
