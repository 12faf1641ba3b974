//! Scalar equivalents of the GLSL ES built-ins used by the programs
//!
//! Vector forms come from glam (`Vec3::lerp` etc.); these cover the
//! scalar cases and the spots where GLSL semantics differ from Rust's
//! (`mod` floors, `%` truncates).

/// Linear blend, `x*(1-a) + y*a`
#[inline]
pub fn mix(x: f32, y: f32, a: f32) -> f32 {
    x * (1.0 - a) + y * a
}

/// Hermite interpolation between two edges
///
/// Matches GLSL: the input is clamped to `[0, 1]` after normalizing,
/// then `t*t*(3 - 2t)` is applied. Equal edges act as a step at `edge1`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge0 == edge1 {
        return if x >= edge1 { 1.0 } else { 0.0 };
    }
    let t = clamp01((x - edge0) / (edge1 - edge0));
    t * t * (3.0 - 2.0 * t)
}

/// `x - floor(x)`
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// GLSL `mod`: `x - y * floor(x / y)`, result carries the sign of `y`
#[inline]
pub fn glsl_mod(x: f32, y: f32) -> f32 {
    x - y * (x / y).floor()
}

#[inline]
pub fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// `1 - (1 - a)^2`: fast start, eased finish
#[inline]
pub fn inverse_square(a: f32) -> f32 {
    1.0 - (1.0 - a) * (1.0 - a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_endpoints() {
        assert_eq!(mix(2.0, 6.0, 0.0), 2.0);
        assert_eq!(mix(2.0, 6.0, 1.0), 6.0);
        assert_eq!(mix(2.0, 6.0, 0.5), 4.0);
    }

    #[test]
    fn test_smoothstep_clamps_and_eases() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
        assert!(smoothstep(0.0, 1.0, 0.25) < 0.25);
    }

    #[test]
    fn test_smoothstep_equal_edges_is_a_step() {
        assert_eq!(smoothstep(0.5, 0.5, 0.49), 0.0);
        assert_eq!(smoothstep(0.5, 0.5, 0.5), 1.0);
        assert_eq!(smoothstep(0.5, 0.5, 0.51), 1.0);
    }

    #[test]
    fn test_glsl_mod_floors_negative_input() {
        // Rust's % would give -1.0 here
        assert!((glsl_mod(-1.0, 4.0) - 3.0).abs() < 1e-6);
        assert!((glsl_mod(5.0, 4.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_fract() {
        assert!((fract(2.75) - 0.75).abs() < 1e-6);
        assert!((fract(-0.25) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_inverse_square() {
        assert_eq!(inverse_square(0.0), 0.0);
        assert_eq!(inverse_square(1.0), 1.0);
        assert!((inverse_square(0.5) - 0.75).abs() < 1e-6);
    }
}
