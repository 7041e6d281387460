use thiserror::Error;

/// Enum of the ways a declination estimate can fail
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeclinationError {
    /// The timestamp cannot be placed on the calendar
    #[error("invalid NTP timestamp {0}")]
    InvalidTimestamp(f64),

    /// The model has no coefficients for the requested epoch
    #[error("{0}")]
    OutOfModelRange(String),

    /// Any other failure reported by the field model
    #[error("{0}")]
    Model(String),
}
