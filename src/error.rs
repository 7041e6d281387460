use crate::declination::DeclinationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VelmagError {
    /// The declination provider could not produce an estimate
    #[error("{0}")]
    Declination(#[from] DeclinationError),

    /// The eastward and northward velocity arrays differ in shape
    #[error("velocity components differ in shape: u {u:?}, v {v:?}")]
    ShapeMismatch { u: Vec<usize>, v: Vec<usize> },

    /// A position, time or depth array cannot be paired with the velocity samples
    #[error("cannot broadcast {name} of shape {from:?} to velocity shape {to:?}")]
    Broadcast {
        name: &'static str,
        from: Vec<usize>,
        to: Vec<usize>,
    },

    /// zflag must be -1 (depth) or 1 (height)
    #[error("invalid zflag {0}, expected -1 (depth) or 1 (height)")]
    InvalidZflag(i64),

    /// Malformed batch record
    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

#[cfg(feature = "python")]
impl From<VelmagError> for pyo3::PyErr {
    fn from(value: VelmagError) -> Self {
        let msg = value.to_string();
        pyo3::exceptions::PyValueError::new_err(msg)
    }
}
