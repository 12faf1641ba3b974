//! Anvil transition: smoke puffs and dust specks kicked up on impact

use glam::{Vec3, Vec4};
use slidefx_catalog::keys;
use slidefx_math::{PI, fast_rotation_matrix, fast_sine, mix};

use super::{ParticleUniforms, ParticleVaryings, ParticleVertex, emit};
use crate::{EffectModel, VertexOutput};

/// Quick fade in over the first 5% of life, linear fade out after
pub fn fade_envelope(real_percent: f32) -> f32 {
    (1.0 - real_percent) * (real_percent * 20.0).min(1.0)
}

/// Smoke puffs that grow, tumble and drift sideways
pub struct AnvilSmoke;

impl EffectModel for AnvilSmoke {
    const KEY: &'static str = keys::ANVIL_SMOKE;
    type Uniforms = ParticleUniforms;
    type Attributes = ParticleVertex;
    type Varyings = ParticleVaryings;

    fn vertex(u: &ParticleUniforms, v: &ParticleVertex) -> VertexOutput<ParticleVaryings> {
        let p = &v.particle;
        // smoke runs on a square-root clock: fast start, long tail
        let rp = p.life_span.real_percent(u.percent).sqrt();

        let scaled = v.offset() * p.scale * mix(0.1, 1.0, rp);
        let rotated = fast_rotation_matrix(p.rotation * rp) * scaled;
        let drift = Vec3::new(p.speed.x * rp.sqrt(), p.speed.y * rp * rp, p.speed.z);
        let position = v.anchor() + (rotated + drift).extend(0.0);

        let opacity = u.opacity * fade_envelope(rp);
        emit(u.mvp, position, Vec4::splat(opacity), v.tex_coord)
    }
}

/// Specks thrown on a gravity-like arc
///
/// `Speed.z` doubles as the vertical stretch of the speck.
pub struct AnvilSpeck;

impl EffectModel for AnvilSpeck {
    const KEY: &'static str = keys::ANVIL_SPECK;
    type Uniforms = ParticleUniforms;
    type Attributes = ParticleVertex;
    type Varyings = ParticleVaryings;

    fn vertex(u: &ParticleUniforms, v: &ParticleVertex) -> VertexOutput<ParticleVaryings> {
        let p = &v.particle;
        let rp = p.life_span.real_percent(u.percent);

        let stretch = p.scale * Vec3::new(1.0, p.speed.z, 1.0) * mix(0.1, 1.0, rp);
        let arc = Vec3::new(p.speed.x * rp, p.speed.y * fast_sine(PI * 0.85 * rp), 0.0);
        let position = v.anchor() + (v.offset() * stretch + arc).extend(0.0);

        let opacity = u.opacity * fade_envelope(rp);
        emit(u.mvp, position, Vec4::splat(opacity), v.tex_coord)
    }
}
