//! Fast trigonometry for the per-vertex path
//!
//! The particle programs avoid `sin`/`cos` and use a parabolic fit
//! instead: `sin(x) ~ B*x + C*x*|x|` over `[-pi, pi]`. The curve is
//! reproduced here with the exact constants the GLSL uses, including the
//! truncated values of pi, so CPU and GPU agree to float rounding.
//!
//! The worst-case error against true sine is about 0.05601.

use glam::{Mat3, Vec3};

use crate::glsl::glsl_mod;

/// Truncated pi as written in the programs
pub const PI: f32 = 3.1415926;
/// Truncated pi/2 as written in the programs
pub const PI_2: f32 = 1.5707963;
/// Truncated 2*pi as written in the programs
pub const TWO_PI: f32 = 6.2831852;

/// `4 / pi`
const SINE_CONST_B: f32 = 1.2732396;
/// `-4 / pi^2`
const SINE_CONST_C: f32 = -0.40528476;

/// Upper bound on `|fast_sine(x) - sin(x)|`
pub const FAST_SINE_MAX_ERROR: f32 = 0.0561;

/// Parabolic sine approximation
///
/// The input is first wrapped into `[-pi, pi)` with GLSL `mod`
/// semantics, so any finite angle is accepted.
#[inline]
pub fn fast_sine(angle: f32) -> f32 {
    let a = glsl_mod(angle + PI, TWO_PI) - PI;
    SINE_CONST_B * a + SINE_CONST_C * a * a.abs()
}

/// Cosine via `fast_sine(pi/2 - x)`
#[inline]
pub fn fast_cosine(angle: f32) -> f32 {
    fast_sine(PI_2 - angle)
}

/// Component-wise [`fast_sine`]
#[inline]
pub fn fast_sine3(angles: Vec3) -> Vec3 {
    Vec3::new(fast_sine(angles.x), fast_sine(angles.y), fast_sine(angles.z))
}

/// Euler rotation matrix from three angles, using the fast sine
///
/// Column layout matches the GLSL `mat3(...)` constructor in the
/// particle programs. Changing the order flips the apparent spin
/// direction of tumbling particles.
pub fn fast_rotation_matrix(rotation: Vec3) -> Mat3 {
    let s = fast_sine3(rotation);
    let c = fast_sine3(Vec3::splat(PI_2) - rotation);

    Mat3::from_cols(
        Vec3::new(
            c.y * c.z,
            s.x * s.y * c.z + c.x * s.z,
            -c.x * s.y * c.z + s.x * s.z,
        ),
        Vec3::new(
            -c.y * s.z,
            -s.x * s.y * s.z + c.x * c.z,
            c.x * s.y * s.z + s.x * c.z,
        ),
        Vec3::new(s.y, -s.x * c.y, c.x * c.y),
    )
}

/// Rotation about the z axis, laid out as the flame program builds it
///
/// Columns are `(cos, -sin, 0)`, `(sin, cos, 0)`, `(0, 0, 1)`.
pub fn planar_rotation(angle: f32) -> Mat3 {
    let sin = fast_sine(angle);
    let cos = fast_cosine(angle);
    Mat3::from_cols(
        Vec3::new(cos, -sin, 0.0),
        Vec3::new(sin, cos, 0.0),
        Vec3::Z,
    )
}
