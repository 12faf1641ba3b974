//! Flame particles
//!
//! Colour runs white -> yellow -> red over each particle's life. Early in
//! the transition the ramp is pushed towards red so the fire warms up;
//! late in the transition the colour darkens into smoke.

use glam::{Mat4, Vec3, Vec4};
use slidefx_catalog::keys;
use slidefx_math::{inverse_square, mix, planar_rotation};

use super::{ParticleVaryings, ParticleVertex, emit};
use crate::{EffectModel, VertexOutput};

const START_COLOR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 0.0);
const MID_COLOR: Vec4 = Vec4::new(0.97, 1.0, 0.32, 0.0);
const END_COLOR: Vec4 = Vec4::new(0.9, 0.0, 0.0, 0.0);
const COLOR_MID_POINT: f32 = 0.1;

/// Out-of-life particles are shrunk by this factor rather than discarded
const DISCARD_SHRINK: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlameUniforms {
    pub mvp: Mat4,
    pub percent: f32,
    /// Transition duration in seconds; sets the warm-up and smoke cutoffs
    pub duration: f32,
    pub opacity: f32,
    pub rotation_max: f32,
    pub speed_max: f32,
}

impl Default for FlameUniforms {
    fn default() -> Self {
        Self {
            mvp: Mat4::IDENTITY,
            percent: 0.0,
            duration: 2.0,
            opacity: 1.0,
            rotation_max: 1.0,
            speed_max: 1.0,
        }
    }
}

/// Flame colour for a particle at `real_percent` of its life
pub fn flame_color(u: &FlameUniforms, real_percent: f32) -> Vec4 {
    let begin_cutoff = 0.4 / u.duration;
    let smoke_cutoff = 1.0 - 0.95 / u.duration;
    let alpha_cutoff = 1.0 - 0.5 / u.duration;

    let mut p = real_percent;
    let alpha = if p < alpha_cutoff {
        1.0
    } else {
        1.0 - (p - alpha_cutoff) / (1.0 - alpha_cutoff)
    };
    let mut color = Vec4::new(0.0, 0.0, 0.0, alpha * 0.75);

    if u.percent < begin_cutoff {
        let color_cutoff = begin_cutoff * 3.0;
        p += mix(color_cutoff, 0.0, u.percent / begin_cutoff);
    }

    color += if p < COLOR_MID_POINT {
        START_COLOR.lerp(MID_COLOR, p / COLOR_MID_POINT)
    } else {
        MID_COLOR.lerp(END_COLOR, (p - COLOR_MID_POINT) / (1.0 - COLOR_MID_POINT))
    };

    if u.percent > smoke_cutoff {
        let smoke = ((u.percent - smoke_cutoff) / (1.0 - smoke_cutoff)).sqrt() * (0.25 + p * p);
        color = (color.truncate() * (1.0 - smoke).max(0.0)).extend(color.w);
    }

    color
}

/// Flame particles rising and curling from the slide edge
pub struct Flame;

impl EffectModel for Flame {
    const KEY: &'static str = keys::FLAME;
    type Uniforms = FlameUniforms;
    type Attributes = ParticleVertex;
    type Varyings = ParticleVaryings;

    fn vertex(u: &FlameUniforms, v: &ParticleVertex) -> VertexOutput<ParticleVaryings> {
        let p = &v.particle;
        let life = p.life_span.classify(u.percent);
        let rp = p.life_span.real_percent(u.percent);

        let half = rp / 2.0;
        let rotation = p.rotation * u.rotation_max;
        let angle = rotation.x + rotation.z * (half * (half + 1.0));
        let rotated = planar_rotation(angle) * v.offset();

        let shrink = if life.is_active() { 1.0 } else { DISCARD_SHRINK };
        let scale = 0.1 + inverse_square(rp);
        let mut position = v.anchor() + (rotated * scale * shrink).extend(0.0);

        let speed = p.speed * u.speed_max;
        position += Vec3::new(0.0, rp * rp * -speed.y, 0.0).extend(0.0);

        emit(u.mvp, position, flame_color(u, rp) * u.opacity, v.tex_coord)
    }
}
