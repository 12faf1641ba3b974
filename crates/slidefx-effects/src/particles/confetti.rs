//! Confetti: flat pieces tumbling away from the slide

use glam::{Vec3, Vec4};
use slidefx_catalog::keys;
use slidefx_math::fast_rotation_matrix;

use super::{ParticleUniforms, ParticleVaryings, ParticleVertex, emit};
use crate::{EffectModel, VertexOutput};

/// Confetti pieces; no lifespan, every piece lives for the whole transition
pub struct Confetti;

impl EffectModel for Confetti {
    const KEY: &'static str = keys::CONFETTI;
    type Uniforms = ParticleUniforms;
    type Attributes = ParticleVertex;
    type Varyings = ParticleVaryings;

    fn vertex(u: &ParticleUniforms, v: &ParticleVertex) -> VertexOutput<ParticleVaryings> {
        let p = &v.particle;
        let rotation = fast_rotation_matrix(p.rotation * u.percent);

        // row-vector multiply, `v * M`
        let rotated = rotation.transpose() * v.offset();
        let position = v.anchor() + (rotated + p.speed * u.percent).extend(0.0);

        // pieces darken as they turn edge-on
        let shade = (rotation * Vec3::Z).z.abs();
        let color = Vec4::new(shade, shade, shade, u.opacity);

        emit(u.mvp, position, color, v.tex_coord)
    }
}
