//! slidefx math - numeric helpers shared by the effect programs
//!
//! This crate provides:
//! - GLSL built-in equivalents (`mix`, `smoothstep`, `fract`, `mod`)
//! - The parabolic fast sine used in the per-vertex hot path
//! - Euler rotation matrices built from the fast sine
//! - Lifespan-normalized particle time
//!
//! Everything here mirrors the arithmetic of the bundled GLSL programs
//! so CPU evaluation produces the same curves the GPU does.

pub mod glsl;
pub mod lifetime;
pub mod trig;

pub use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
pub use glsl::{clamp01, fract, glsl_mod, inverse_square, mix, smoothstep};
pub use lifetime::{LifeSpan, Lifetime, MIN_DURATION};
pub use trig::{
    FAST_SINE_MAX_ERROR, PI, PI_2, TWO_PI, fast_cosine, fast_rotation_matrix, fast_sine, fast_sine3,
    planar_rotation,
};
