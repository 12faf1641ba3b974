//! Shimmer: the slide breaks into pieces that drift apart, with glints
//!
//! Both programs take the piece rotation as a host-computed
//! `RotationMatrix` instead of building one per vertex.

use glam::{Mat3, Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use slidefx_catalog::keys;
use slidefx_math::{LifeSpan, mix};

use super::{ParticleVaryings, ParticleVertex, emit, particle_fragment};
use crate::image::Sampler;
use crate::{EffectModel, VertexOutput};

/// Particles born at or before this percent count as persistent
const PERSISTENT_START: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShimmerUniforms {
    pub mvp: Mat4,
    pub percent: f32,
    pub opacity: f32,
    pub rotation_matrix: Mat3,
    pub speed_max: f32,
    /// Global glint scale for persistent particles
    pub particle_scale_percent: f32,
}

impl Default for ShimmerUniforms {
    fn default() -> Self {
        Self {
            mvp: Mat4::IDENTITY,
            percent: 0.0,
            opacity: 1.0,
            rotation_matrix: Mat3::IDENTITY,
            speed_max: 1.0,
            particle_scale_percent: 1.0,
        }
    }
}

/// `speed * t * (3 + mix(t^3, 1 - (1-t)^2, t^2))`
fn shimmer_drift(speed: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let inv = 1.0 - t;
    speed * t * (3.0 + mix(t2 * t, 1.0 - inv * inv, t2))
}

/// Pieces of the slide: rotate, shrink with the transition and drift
pub struct ShimmerObject;

impl EffectModel for ShimmerObject {
    const KEY: &'static str = keys::SHIMMER_OBJECT;
    type Uniforms = ShimmerUniforms;
    type Attributes = ParticleVertex;
    type Varyings = ParticleVaryings;

    fn vertex(u: &ShimmerUniforms, v: &ParticleVertex) -> VertexOutput<ParticleVaryings> {
        let p = &v.particle;
        let rotated = u.rotation_matrix * v.offset();
        let mut position = v.anchor() + (rotated * (1.0 - u.percent)).extend(0.0);
        position += shimmer_drift(p.speed * u.speed_max, u.percent).extend(0.0);

        // pieces take the global opacity; the Color attribute is not used for tinting
        emit(u.mvp, position, Vec4::splat(u.opacity), v.tex_coord)
    }
}

impl ShimmerObject {
    pub fn fragment(texture: &impl Sampler, varyings: &ParticleVaryings) -> Vec4 {
        particle_fragment(texture, varyings)
    }
}

/// How a shimmer glint is timed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShimmerLifetime {
    /// Alive from the start; scale follows `ParticleScalePercent`, fades with `Opacity`
    Persistent,
    /// Born later; scales up then down over its own life at full opacity
    Timed,
}

impl ShimmerLifetime {
    pub fn of(life_span: LifeSpan) -> Self {
        if life_span.start <= PERSISTENT_START {
            Self::Persistent
        } else {
            Self::Timed
        }
    }

    /// Glint size before the per-particle `Scale`
    pub fn scale(self, u: &ShimmerUniforms, real_percent: f32) -> f32 {
        match self {
            Self::Persistent => u.particle_scale_percent,
            Self::Timed => {
                let up_down = 1.0 - (2.0 * (real_percent - 0.5)).abs();
                up_down * up_down
            }
        }
    }

    pub fn opacity(self, u: &ShimmerUniforms) -> f32 {
        match self {
            Self::Persistent => u.opacity,
            Self::Timed => 1.0,
        }
    }
}

/// Glints travelling with the pieces
pub struct ShimmerParticle;

impl EffectModel for ShimmerParticle {
    const KEY: &'static str = keys::SHIMMER_PARTICLE;
    type Uniforms = ShimmerUniforms;
    type Attributes = ParticleVertex;
    type Varyings = ParticleVaryings;

    fn vertex(u: &ShimmerUniforms, v: &ParticleVertex) -> VertexOutput<ParticleVaryings> {
        let p = &v.particle;
        let lifetime = ShimmerLifetime::of(p.life_span);
        let alive = if p.life_span.classify(u.percent).is_active() { 1.0 } else { 0.0 };
        let rp = p.life_span.real_percent(u.percent);

        let rotated = u.rotation_matrix * v.offset();
        let scale = lifetime.scale(u, rp) * p.scale * alive;
        let mut position = v.anchor() + (rotated * scale).extend(0.0);
        position += shimmer_drift(p.speed * u.speed_max, rp).extend(0.0);

        let color = p.color.truncate().extend(1.0) * lifetime.opacity(u);
        emit(u.mvp, position, color, v.tex_coord)
    }
}
