//! Rotation of magnetic-frame velocities into the true-North frame
use crate::error::VelmagError;
use nalgebra::{Rotation2, Vector2};
use ndarray::{ArrayD, ArrayViewD, Zip};

/// Rotates the velocity `(u, v)` by the declination `theta` (degrees, positive East).
///
/// Applies the standard 2-D rotation matrix, so `(1, 0)` rotated by 10 degrees becomes
/// `(cos 10, sin 10)`. No unit conversion is performed.
pub fn magnetic_correction(theta: f64, u: f64, v: f64) -> (f64, f64) {
    let corrected = Rotation2::new(theta.to_radians()) * Vector2::new(u, v);
    (corrected.x, corrected.y)
}

/// Applies [`magnetic_correction`] element-wise, each sample by its own declination.
///
/// # Errors
/// Will return `Err` if `theta`, `u` and `v` are not all the same shape.
pub fn magnetic_correction_array(
    theta: ArrayViewD<f64>,
    u: ArrayViewD<f64>,
    v: ArrayViewD<f64>,
) -> Result<(ArrayD<f64>, ArrayD<f64>), VelmagError> {
    if u.shape() != v.shape() {
        return Err(VelmagError::ShapeMismatch {
            u: u.shape().to_vec(),
            v: v.shape().to_vec(),
        });
    }
    if theta.shape() != u.shape() {
        return Err(VelmagError::Broadcast {
            name: "theta",
            from: theta.shape().to_vec(),
            to: u.shape().to_vec(),
        });
    }

    let mut u_cor = ArrayD::zeros(u.raw_dim());
    let mut v_cor = ArrayD::zeros(v.raw_dim());
    Zip::from(&mut u_cor)
        .and(&mut v_cor)
        .and(&theta)
        .and(&u)
        .and(&v)
        .for_each(|u_cor, v_cor, &theta, &u, &v| {
            (*u_cor, *v_cor) = magnetic_correction(theta, u, v);
        });
    Ok((u_cor, v_cor))
}
