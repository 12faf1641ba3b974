//! CPU reference models of the catalog programs
//!
//! Each model evaluates one program pair for a single invocation and
//! returns exactly what the GPU stage computes: the clip-space position
//! and varyings for the vertex stage, the output colour for the fragment
//! stage. They exist so the animation maths can be tested without a GPU
//! and so a CPU rasteriser can reproduce the GPU output.
//!
//! ## Architecture
//!
//! Every model implements `EffectModel`, which ties it to its catalog key
//! and types its uniforms, attributes and varyings. Fragment stages are
//! inherent functions because each effect samples a different set of
//! textures; textures are anything implementing `Sampler`.
//!
//! - `transition`: full-frame quad effects (crossfade, iris, twist, ...)
//! - `particles`: instanced particle effects (flame, fireworks, ...)
//! - `post`: separable Gaussian blur and bloom
//! - `image`: CPU image with bilinear clamp-to-edge sampling

pub mod image;
pub mod particles;
pub mod post;
pub mod sample;
pub mod transition;

pub use image::{Image, ImageError, Sampler};
pub use particles::{Particle, ParticleVaryings, ParticleVertex};
pub use post::{BlurPass, BloomPipeline};
pub use sample::{Sample, SampleError, SampledPixel, SampledVertex, sample_default};

use glam::Vec4;

/// Vertex stage result: `gl_Position` plus the varyings handed to the fragment stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexOutput<V> {
    pub position: Vec4,
    pub varyings: V,
}

/// CPU model of one catalog program pair
pub trait EffectModel {
    /// Catalog key of the modelled effect
    const KEY: &'static str;

    /// Per-draw parameters, named after the program uniforms
    type Uniforms: Default;

    /// Per-vertex inputs
    type Attributes;

    /// Values interpolated into the fragment stage
    type Varyings;

    /// Evaluate the vertex stage for one vertex
    fn vertex(uniforms: &Self::Uniforms, attributes: &Self::Attributes) -> VertexOutput<Self::Varyings>;
}

/// Keys of every effect with a reference model
pub const MODEL_KEYS: &[&str] = &[
    transition::DefaultTexture::KEY,
    transition::DefaultTextureAndOpacity::KEY,
    transition::Contents::KEY,
    transition::Iris::KEY,
    transition::Twist::KEY,
    transition::ColorPlanes::KEY,
    transition::Flop::KEY,
    particles::AnvilSmoke::KEY,
    particles::AnvilSpeck::KEY,
    particles::Flame::KEY,
    particles::Confetti::KEY,
    particles::Diffuse::KEY,
    particles::Fireworks::KEY,
    particles::FireworksTrails::KEY,
    post::HorizontalBlur::KEY,
    post::VerticalBlur::KEY,
    post::Bloom::KEY,
    particles::ShimmerObject::KEY,
    particles::ShimmerParticle::KEY,
    particles::Sparkle::KEY,
];

#[cfg(test)]
mod tests {
    use super::*;
    use slidefx_catalog::{EffectCatalog, bundled_effect_keys};

    #[test]
    fn test_every_bundled_effect_has_a_model() {
        let mut models: Vec<_> = MODEL_KEYS.to_vec();
        let mut bundled = bundled_effect_keys();
        models.sort_unstable();
        bundled.sort_unstable();
        assert_eq!(models, bundled);
    }

    #[test]
    fn test_model_keys_resolve_in_catalog() {
        let catalog = EffectCatalog::shared().unwrap();
        for key in MODEL_KEYS {
            assert!(catalog.lookup(key).is_ok(), "{key}");
        }
    }
}
