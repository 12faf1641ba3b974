//! Diffuse dissolve: slide fragments tumble and scatter

use glam::{Mat4, Vec4};
use slidefx_catalog::keys;
use slidefx_math::{Lifetime, fast_rotation_matrix, inverse_square};

use super::{ParticleVaryings, ParticleVertex, emit};
use crate::{EffectModel, VertexOutput};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffuseUniforms {
    pub mvp: Mat4,
    pub percent: f32,
    pub opacity: f32,
    pub rotation_max: f32,
    pub speed_max: f32,
}

impl Default for DiffuseUniforms {
    fn default() -> Self {
        Self {
            mvp: Mat4::IDENTITY,
            percent: 0.0,
            opacity: 1.0,
            rotation_max: 1.0,
            speed_max: 1.0,
        }
    }
}

pub struct Diffuse;

impl Diffuse {
    /// Horizontal correction, `-sign(s.x) * (s.x + |s.y|) * rp / 8`
    ///
    /// Zero when the particle has no horizontal speed instead of dividing
    /// by zero.
    pub fn reverse_drift(speed_x: f32, speed_y: f32, real_percent: f32) -> f32 {
        let direction = if speed_x == 0.0 { 0.0 } else { -speed_x.signum() };
        direction * (speed_x + speed_y.abs()) * real_percent / 8.0
    }
}

impl EffectModel for Diffuse {
    const KEY: &'static str = keys::DIFFUSE;
    type Uniforms = DiffuseUniforms;
    type Attributes = ParticleVertex;
    type Varyings = ParticleVaryings;

    fn vertex(u: &DiffuseUniforms, v: &ParticleVertex) -> VertexOutput<ParticleVaryings> {
        let p = &v.particle;
        // only dead particles collapse; unborn ones sit at their start
        let keep = if p.life_span.classify(u.percent) == Lifetime::After { 0.0 } else { 1.0 };
        let rp = p.life_span.real_percent(u.percent);
        let remaining = 1.0 - rp;

        let rotation = fast_rotation_matrix(p.rotation * u.rotation_max * rp);
        let rotated = rotation.transpose() * v.offset();
        let mut position = v.anchor() + rotated.extend(0.0) * keep;

        let speed = p.speed * u.speed_max;
        let mut travel = speed * inverse_square(rp);
        travel.x += Self::reverse_drift(speed.x, speed.y, rp);
        position += travel.extend(0.0);

        let shade = rotation.z_axis.z.abs();
        let color = Vec4::new(shade, shade, shade, 1.0) * (remaining * u.opacity);
        emit(u.mvp, position, color, v.tex_coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::Particle;
    use glam::{Vec2, Vec3};
    use slidefx_math::LifeSpan;

    #[test]
    fn test_reverse_drift_values() {
        assert!((Diffuse::reverse_drift(4.0, 0.0, 1.0) - (-0.5)).abs() < 1e-6);
        assert!((Diffuse::reverse_drift(-4.0, 0.0, 1.0) - (-0.5)).abs() < 1e-6);
        assert!((Diffuse::reverse_drift(-2.0, 4.0, 1.0) - 0.25).abs() < 1e-6);
        assert!((Diffuse::reverse_drift(4.0, -4.0, 0.5) - (-0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_zero_horizontal_speed_has_no_reverse_drift() {
        assert_eq!(Diffuse::reverse_drift(0.0, 5.0, 0.7), 0.0);

        let particle = Particle {
            speed: Vec3::new(0.0, 2.0, 0.0),
            ..Default::default()
        };
        let mut v = particle.quad(Vec2::splat(1.0))[0];
        v.position = particle.center;
        let u = DiffuseUniforms {
            percent: 1.0,
            ..Default::default()
        };
        let out = Diffuse::vertex(&u, &v);
        assert!(out.position.is_finite());
        assert!(out.position.truncate().abs_diff_eq(Vec3::new(0.0, 2.0, 0.0), 1e-6));
    }

    #[test]
    fn test_dead_particle_collapses_to_center() {
        let particle = Particle {
            life_span: LifeSpan::new(0.0, 0.5),
            ..Default::default()
        };
        let v = particle.quad(Vec2::splat(1.0))[2];
        let u = DiffuseUniforms {
            percent: 0.9,
            ..Default::default()
        };
        let out = Diffuse::vertex(&u, &v);
        assert!(out.position.truncate().abs_diff_eq(Vec3::ZERO, 1e-6));
        assert_eq!(out.varyings.color, Vec4::ZERO);
    }

    #[test]
    fn test_unborn_particle_keeps_its_shape() {
        let particle = Particle {
            life_span: LifeSpan::new(0.5, 0.5),
            ..Default::default()
        };
        let v = particle.quad(Vec2::splat(1.0))[2];
        let out = Diffuse::vertex(&DiffuseUniforms::default(), &v);
        assert!(out.position.truncate().abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), 1e-5));
        assert!((out.varyings.color.w - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_opacity_fades_with_life() {
        let v = Particle::default().quad(Vec2::splat(1.0))[0];
        let u = DiffuseUniforms {
            percent: 0.75,
            opacity: 0.8,
            ..Default::default()
        };
        let out = Diffuse::vertex(&u, &v);
        assert!((out.varyings.color.w - 0.2).abs() < 1e-6);
    }
}
