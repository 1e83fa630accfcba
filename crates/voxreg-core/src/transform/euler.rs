//! Rotation matrices from Euler angles.

use nalgebra::Matrix3;

/// Rotation by `theta` radians about the x axis (right-handed).
pub fn x_rotation(theta: f64) -> Matrix3<f64> {
    let (s, c) = theta.sin_cos();
    Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, c, -s,
        0.0, s, c,
    )
}

/// Rotation by `theta` radians about the y axis (right-handed).
pub fn y_rotation(theta: f64) -> Matrix3<f64> {
    let (s, c) = theta.sin_cos();
    Matrix3::new(
        c, 0.0, s,
        0.0, 1.0, 0.0,
        -s, 0.0, c,
    )
}

/// Rotation by `theta` radians about the z axis (right-handed).
pub fn z_rotation(theta: f64) -> Matrix3<f64> {
    let (s, c) = theta.sin_cos();
    Matrix3::new(
        c, -s, 0.0,
        s, c, 0.0,
        0.0, 0.0, 1.0,
    )
}

/// Compose a 3-angle Euler triple into a single rotation matrix.
///
/// The application order is `Rz(rz) * Ry(ry) * Rx(rx)`. Each angle's
/// meaning depends on this exact order; changing it silently changes
/// which physical rotation a parameter triple describes.
pub fn rotation_matrix(rx: f64, ry: f64, rz: f64) -> Matrix3<f64> {
    z_rotation(rz) * y_rotation(ry) * x_rotation(rx)
}
