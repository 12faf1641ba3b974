//! Sparkle glints

use glam::{Mat4, Vec3, Vec4};
use slidefx_catalog::keys;
use slidefx_math::Lifetime;

use super::{ParticleVaryings, ParticleVertex, emit};
use crate::{EffectModel, VertexOutput};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkleUniforms {
    pub mvp: Mat4,
    pub percent: f32,
    pub opacity: f32,
    /// Tint every glint fades towards from white
    pub color: Vec4,
    pub speed_max: f32,
}

impl Default for SparkleUniforms {
    fn default() -> Self {
        Self {
            mvp: Mat4::IDENTITY,
            percent: 0.0,
            opacity: 1.0,
            color: Vec4::ONE,
            speed_max: 1.0,
        }
    }
}

pub struct Sparkle;

impl Sparkle {
    /// Particle progress and whether it is out of life
    ///
    /// Out-of-life particles are pinned to the end of their life.
    fn progress(u: &SparkleUniforms, v: &ParticleVertex) -> (f32, bool) {
        let life = &v.particle.life_span;
        match life.classify(u.percent) {
            Lifetime::Active => (life.raw_percent(u.percent), false),
            Lifetime::Before | Lifetime::After => (1.0, true),
        }
    }

    /// Glint size: square-root ramp in over the first tenth, cubic ramp out
    pub fn scale(real_percent: f32) -> f32 {
        if real_percent < 0.1 {
            (real_percent / 0.1).sqrt()
        } else {
            let out = 1.0 - (real_percent - 0.1) / 0.9;
            out * out * out
        }
    }
}

impl EffectModel for Sparkle {
    const KEY: &'static str = keys::SPARKLE;
    type Uniforms = SparkleUniforms;
    type Attributes = ParticleVertex;
    type Varyings = ParticleVaryings;

    fn vertex(u: &SparkleUniforms, v: &ParticleVertex) -> VertexOutput<ParticleVaryings> {
        let p = &v.particle;
        let (rp, discarded) = Self::progress(u, v);

        let scale = if discarded { 0.0 } else { Self::scale(rp) };
        let mut position = v.anchor() + (v.offset() * scale * p.scale).extend(0.0);
        position += (p.speed * u.speed_max * rp).extend(0.0);

        let remaining = 1.0 - rp;
        let rgb = u.color.truncate().lerp(Vec3::ONE, remaining * remaining * remaining);
        let color = rgb.extend((1.0 - rp * rp) * u.opacity);
        emit(u.mvp, position, color, v.tex_coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::Particle;
    use glam::Vec2;
    use slidefx_math::LifeSpan;

    fn vertex_at(life_span: LifeSpan, percent: f32) -> VertexOutput<ParticleVaryings> {
        let particle = Particle {
            life_span,
            speed: Vec3::new(1.0, 2.0, 0.0),
            ..Default::default()
        };
        let v = particle.quad(Vec2::splat(1.0))[2];
        let u = SparkleUniforms {
            percent,
            color: Vec4::new(1.0, 0.0, 0.0, 1.0),
            ..Default::default()
        };
        Sparkle::vertex(&u, &v)
    }

    #[test]
    fn test_scale_curve() {
        assert_eq!(Sparkle::scale(0.0), 0.0);
        assert!((Sparkle::scale(0.025) - 0.5).abs() < 1e-6);
        assert!((Sparkle::scale(0.1) - 1.0).abs() < 1e-6);
        assert!((Sparkle::scale(0.55) - 0.125).abs() < 1e-6);
        assert!(Sparkle::scale(1.0).abs() < 1e-6);
    }

    #[test]
    fn test_birth_has_zero_scale() {
        let out = vertex_at(LifeSpan::new(0.2, 0.3), 0.2);
        // corner collapses onto the centre, no drift yet
        assert!(out.position.truncate().abs_diff_eq(Vec3::ZERO, 1e-6));
        // fully white at birth, full alpha
        assert!(out.varyings.color.abs_diff_eq(Vec4::ONE, 1e-6));
    }

    #[test]
    fn test_out_of_life_is_pinned_to_end() {
        let before = vertex_at(LifeSpan::new(0.5, 0.25), 0.1);
        // rp forced to 1: drift fully applied, scale 0, alpha 0
        assert!(before.position.truncate().abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), 1e-6));
        assert_eq!(before.varyings.color.w, 0.0);
        assert!(before.varyings.color.truncate().abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), 1e-6));

        let after = vertex_at(LifeSpan::new(0.0, 0.25), 0.9);
        assert_eq!(after.position, before.position);
    }

    #[test]
    fn test_peak_size_early_in_life() {
        let out = vertex_at(LifeSpan::new(0.0, 1.0), 0.1);
        let expected = Vec3::new(1.0, 1.0, 0.0) + Vec3::new(0.1, 0.2, 0.0);
        assert!(out.position.truncate().abs_diff_eq(expected, 1e-5));
    }
}
