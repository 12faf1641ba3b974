//! Particle effects
//!
//! Every particle is a quad around its `Center`. The vertex stage
//! transforms the corner offset `Position - Center` (scale, rotation),
//! re-anchors it on the centre and adds the particle's drift. The
//! fragment stage multiplies the particle texture by the vertex colour.
//!
//! Lifetimes are clamped, never looped. How an out-of-life particle is
//! suppressed differs per effect: flame shrinks it to a point, sparkle
//! and shimmer zero its scale, fireworks zero its colour.

mod anvil;
mod confetti;
mod diffuse;
mod fireworks;
mod flame;
mod shimmer;
mod sparkle;

pub use anvil::{AnvilSmoke, AnvilSpeck, fade_envelope};
pub use confetti::Confetti;
pub use diffuse::{Diffuse, DiffuseUniforms};
pub use fireworks::{Fireworks, FireworksTrails, FireworksTrailsUniforms, FireworksUniforms, trail_noise};
pub use flame::{Flame, FlameUniforms, flame_color};
pub use shimmer::{ShimmerLifetime, ShimmerObject, ShimmerParticle, ShimmerUniforms};
pub use sparkle::{Sparkle, SparkleUniforms};

use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use slidefx_math::LifeSpan;

use crate::VertexOutput;
use crate::image::Sampler;

/// Per-instance parameters shared by the four corners of a particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub center: Vec2,
    pub speed: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
    pub life_span: LifeSpan,
    pub color: Vec4,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            speed: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            life_span: LifeSpan::FULL,
            color: Vec4::ONE,
        }
    }
}

impl Particle {
    /// The four corners of a quad of the given half size, counter-clockwise
    /// from the bottom left, with texture coordinates covering `[0, 1]`
    pub fn quad(&self, half_extent: Vec2) -> [ParticleVertex; 4] {
        [
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ]
        .map(|corner| ParticleVertex {
            particle: *self,
            position: self.center + corner * half_extent,
            tex_coord: (corner + Vec2::ONE) * 0.5,
        })
    }
}

/// One corner of a particle quad
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParticleVertex {
    pub particle: Particle,
    /// Corner position, same space as `Center`
    pub position: Vec2,
    pub tex_coord: Vec2,
}

impl ParticleVertex {
    /// `Position - Center`, lifted to 3D
    pub fn offset(&self) -> Vec3 {
        (self.position - self.particle.center).extend(0.0)
    }

    fn anchor(&self) -> Vec4 {
        self.particle.center.extend(0.0).extend(1.0)
    }
}

/// `v_Color` and `v_TexCoord`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParticleVaryings {
    pub color: Vec4,
    pub tex_coord: Vec2,
}

/// Shared particle fragment stage: texel times vertex colour
pub fn particle_fragment(texture: &impl Sampler, varyings: &ParticleVaryings) -> Vec4 {
    texture.sample(varyings.tex_coord) * varyings.color
}

/// Uniforms of the effects driven only by `Percent` and `Opacity`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleUniforms {
    pub mvp: Mat4,
    pub percent: f32,
    pub opacity: f32,
}

impl Default for ParticleUniforms {
    fn default() -> Self {
        Self {
            mvp: Mat4::IDENTITY,
            percent: 0.0,
            opacity: 1.0,
        }
    }
}

fn emit(mvp: Mat4, position: Vec4, color: Vec4, tex_coord: Vec2) -> VertexOutput<ParticleVaryings> {
    VertexOutput {
        position: mvp * position,
        varyings: ParticleVaryings { color, tex_coord },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_corners_surround_center() {
        let p = Particle {
            center: Vec2::new(10.0, 20.0),
            ..Default::default()
        };
        let quad = p.quad(Vec2::splat(2.0));
        assert_eq!(quad[0].position, Vec2::new(8.0, 18.0));
        assert_eq!(quad[2].position, Vec2::new(12.0, 22.0));
        assert_eq!(quad[0].tex_coord, Vec2::ZERO);
        assert_eq!(quad[2].tex_coord, Vec2::ONE);
        let sum: Vec3 = quad.iter().map(|v| v.offset()).sum();
        assert_eq!(sum, Vec3::ZERO);
    }

    #[test]
    fn test_particle_fragment_modulates() {
        let v = ParticleVaryings {
            color: Vec4::new(0.5, 1.0, 0.0, 0.5),
            tex_coord: Vec2::ZERO,
        };
        assert_eq!(particle_fragment(&Vec4::ONE, &v), v.color);
    }

    #[test]
    fn test_particle_serde() {
        let p = Particle::default();
        let json = serde_json::to_string(&p).unwrap();
        let back: Particle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
