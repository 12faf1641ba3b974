//! Fireworks: burst particles and the trail buffer fade
//!
//! Each frame the host passes the current and previous `Percent` and burst
//! timing, so the vertex stage can stretch the particle along its motion
//! without keeping any state.

use glam::{Mat4, Vec2, Vec3, Vec4};
use slidefx_catalog::keys;
use slidefx_math::{fract, inverse_square, mix, smoothstep};

use super::{ParticleVaryings, ParticleVertex, emit, particle_fragment};
use crate::image::Sampler;
use crate::transition::QuadVertex;
use crate::{EffectModel, VertexOutput};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireworksUniforms {
    pub mvp: Mat4,
    pub percent: f32,
    pub previous_percent: f32,
    pub gravity: f32,
    pub start_scale: f32,
    /// Above 0.5 the burst sparkles instead of shrinking
    pub should_sparkle: f32,
    pub sparkle_period: f32,
    /// Eased burst progress for this frame
    pub particle_burst_timing: f32,
    pub previous_particle_burst_timing: f32,
    pub speed_max: f32,
    pub opacity: f32,
}

impl Default for FireworksUniforms {
    fn default() -> Self {
        Self {
            mvp: Mat4::IDENTITY,
            percent: 0.0,
            previous_percent: 0.0,
            gravity: 0.0,
            start_scale: 1.0,
            should_sparkle: 0.0,
            sparkle_period: 10.0,
            particle_burst_timing: 0.0,
            previous_particle_burst_timing: 0.0,
            speed_max: 1.0,
            opacity: 1.0,
        }
    }
}

/// Firework burst particles
pub struct Fireworks;

impl Fireworks {
    fn translation(u: &FireworksUniforms, v: &ParticleVertex, burst_timing: f32, percent: f32) -> Vec3 {
        let p = &v.particle;
        let mut t = p.speed * (u.speed_max * burst_timing);
        // gravity runs on the global percent, not the particle's
        t.y -= u.gravity * (percent - p.life_span.start);
        t
    }

    /// Motion-blur stretch: distance travelled since the previous frame,
    /// flipped so it always points away from the particle centre
    pub fn blur_offset(u: &FireworksUniforms, v: &ParticleVertex) -> Vec3 {
        let current = Self::translation(u, v, u.particle_burst_timing, u.percent);
        let previous = Self::translation(u, v, u.previous_particle_burst_timing, u.previous_percent);
        let blur = current - previous;
        if blur.dot(v.offset()) >= 0.0 { blur } else { -blur }
    }

    pub fn fragment(u: &FireworksUniforms, texture: &impl Sampler, varyings: &ParticleVaryings) -> Vec4 {
        particle_fragment(texture, varyings) * u.opacity
    }
}

impl EffectModel for Fireworks {
    const KEY: &'static str = keys::FIREWORKS;
    type Uniforms = FireworksUniforms;
    type Attributes = ParticleVertex;
    type Varyings = ParticleVaryings;

    fn vertex(u: &FireworksUniforms, v: &ParticleVertex) -> VertexOutput<ParticleVaryings> {
        let p = &v.particle;
        let rp = p.life_span.real_percent(u.percent);
        // exactly 0.5 falls in neither mode
        let sparkles = u.should_sparkle > 0.5;
        let plain = u.should_sparkle < 0.5;

        let center = v.anchor() + Self::translation(u, v, u.particle_burst_timing, u.percent).extend(0.0);

        let scale_percent = inverse_square(rp);
        let mut scale = mix(u.start_scale, p.scale, scale_percent);
        scale *= if sparkles { 0.25 } else { 1.0 - scale_percent };
        let position = center + (v.offset() * scale + Self::blur_offset(u, v)).extend(0.0);

        let sparkle = smoothstep(0.0, 1.0, fract(rp * rp * u.sparkle_period));
        let mut color = Vec4::ONE.lerp(p.color, scale_percent * if plain { 1.0 } else { 0.5 });
        color *= if plain { 1.0 } else { sparkle };
        color *= if rp >= 1.0 { 0.0 } else { 1.0 };

        emit(u.mvp, position, color, v.tex_coord)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireworksTrailsUniforms {
    pub mvp: Mat4,
    pub opacity: f32,
    pub noise_amount: f32,
    pub noise_seed: Vec2,
    pub noise_max: f32,
}

impl Default for FireworksTrailsUniforms {
    fn default() -> Self {
        Self {
            mvp: Mat4::IDENTITY,
            opacity: 1.0,
            noise_amount: 0.0,
            noise_seed: Vec2::ONE,
            noise_max: 1.0,
        }
    }
}

/// The hash-style pseudo random number of the trail program
///
/// Large `sin` arguments are evaluated differently by every GPU, so only
/// the range `[0, 1)` is portable, not the exact value.
pub fn trail_noise(co: Vec2) -> f32 {
    fract((co.dot(Vec2::new(12.9898, 78.233))).sin() * 43758.5453)
}

/// Fade of the accumulated trail buffer, dithered to hide banding
pub struct FireworksTrails;

impl EffectModel for FireworksTrails {
    const KEY: &'static str = keys::FIREWORKS_TRAILS;
    type Uniforms = FireworksTrailsUniforms;
    type Attributes = QuadVertex;
    type Varyings = Vec2;

    fn vertex(u: &FireworksTrailsUniforms, v: &QuadVertex) -> VertexOutput<Vec2> {
        VertexOutput {
            position: u.mvp * v.position.extend(0.0).extend(1.0),
            varyings: v.tex_coord,
        }
    }
}

impl FireworksTrails {
    pub fn fragment(u: &FireworksTrailsUniforms, texture: &impl Sampler, tex_coord: Vec2) -> Vec4 {
        let color = texture.sample(tex_coord);
        let noise = u.noise_max * trail_noise(tex_coord * u.noise_seed);
        let amount = u.noise_amount * 1.5 * (color.w - 0.3333).max(0.0);
        color * (u.opacity * mix(1.0, noise, amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::Particle;
    use slidefx_math::LifeSpan;

    fn particle() -> Particle {
        Particle {
            speed: Vec3::new(1.0, 0.5, 0.0),
            color: Vec4::new(1.0, 0.0, 0.0, 1.0),
            ..Default::default()
        }
    }

    fn frame(percent: f32, previous: f32) -> FireworksUniforms {
        FireworksUniforms {
            percent,
            previous_percent: previous,
            particle_burst_timing: percent,
            previous_particle_burst_timing: previous,
            ..Default::default()
        }
    }

    #[test]
    fn test_blur_points_outward() {
        let u = frame(0.5, 0.4);
        for v in particle().quad(Vec2::splat(1.0)) {
            let blur = Fireworks::blur_offset(&u, &v);
            assert!(blur.dot(v.offset()) >= 0.0, "{blur:?} vs {:?}", v.offset());
            assert!((blur.length() - (0.1 * Vec3::new(1.0, 0.5, 0.0).length())).abs() < 1e-5);
        }
    }

    #[test]
    fn test_gravity_pulls_down_over_global_time() {
        let u = FireworksUniforms {
            gravity: 2.0,
            percent: 0.75,
            previous_percent: 0.75,
            ..Default::default()
        };
        let p = Particle {
            life_span: LifeSpan::new(0.25, 0.5),
            ..Default::default()
        };
        let mut v = p.quad(Vec2::splat(1.0))[0];
        v.position = p.center;
        let out = Fireworks::vertex(&u, &v);
        assert!((out.position.y - (-1.0)).abs() < 1e-6);
    }

    #[test]
    fn test_color_goes_white_to_particle_color() {
        let v = particle().quad(Vec2::splat(1.0))[0];
        let start = Fireworks::vertex(&frame(0.0, 0.0), &v).varyings.color;
        assert_eq!(start, Vec4::ONE);
        let mid = Fireworks::vertex(&frame(0.5, 0.5), &v).varyings.color;
        // scale percent 0.75
        assert!((mid.y - 0.25).abs() < 1e-6);
        let end = Fireworks::vertex(&frame(1.0, 1.0), &v).varyings.color;
        assert_eq!(end, Vec4::ZERO);
    }

    #[test]
    fn test_plain_burst_shrinks_to_nothing() {
        let v = particle().quad(Vec2::splat(1.0))[2];
        let u = FireworksUniforms {
            percent: 1.0,
            ..Default::default()
        };
        let out = Fireworks::vertex(&u, &v);
        assert!(out.position.truncate().abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn test_sparkle_mode_keeps_quarter_size() {
        let v = particle().quad(Vec2::splat(1.0))[2];
        let u = FireworksUniforms {
            should_sparkle: 1.0,
            start_scale: 2.0,
            ..Default::default()
        };
        let out = Fireworks::vertex(&u, &v);
        // rp 0: scale = StartScale * 0.25
        assert!(out.position.truncate().abs_diff_eq(Vec3::new(0.5, 0.5, 0.0), 1e-6));
        // sparkle opacity is 0 at the very start
        assert_eq!(out.varyings.color, Vec4::ZERO);
    }

    #[test]
    fn test_fragment_applies_opacity() {
        let varyings = ParticleVaryings {
            color: Vec4::ONE,
            tex_coord: Vec2::ZERO,
        };
        let u = FireworksUniforms {
            opacity: 0.5,
            ..Default::default()
        };
        assert_eq!(Fireworks::fragment(&u, &Vec4::ONE, &varyings), Vec4::splat(0.5));
    }

    #[test]
    fn test_trail_noise_range() {
        for i in 0..200 {
            let n = trail_noise(Vec2::new(i as f32 * 0.013, i as f32 * 0.007));
            assert!((0.0..1.0).contains(&n), "{n}");
        }
    }

    #[test]
    fn test_trails_without_noise_fade_by_opacity() {
        let u = FireworksTrailsUniforms {
            opacity: 0.9,
            ..Default::default()
        };
        let c = FireworksTrails::fragment(&u, &Vec4::ONE, Vec2::splat(0.3));
        assert!(c.abs_diff_eq(Vec4::splat(0.9), 1e-6));
    }

    #[test]
    fn test_trails_faint_pixels_are_not_dithered() {
        let u = FireworksTrailsUniforms {
            noise_amount: 1.0,
            noise_max: 0.0,
            ..Default::default()
        };
        let faint = Vec4::new(1.0, 1.0, 1.0, 0.3);
        assert_eq!(FireworksTrails::fragment(&u, &faint, Vec2::ZERO), faint);
    }
}
