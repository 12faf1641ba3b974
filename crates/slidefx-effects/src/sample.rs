//! Reference-model output for a default input, used by the `sample` command
//!
//! Vertex-driven effects are evaluated on one default particle (or the unit
//! quad for transitions) with a white texture. Blur and bloom run over a
//! small synthetic image.

use glam::{Vec2, Vec3, Vec4};
use serde::Serialize;
use slidefx_catalog::keys;
use thiserror::Error;

use crate::image::{Image, ImageError};
use crate::particles::{
    AnvilSmoke, AnvilSpeck, Confetti, Diffuse, DiffuseUniforms, Fireworks, FireworksTrails,
    FireworksTrailsUniforms, FireworksUniforms, Flame, FlameUniforms, ParticleUniforms,
    ShimmerObject, ShimmerParticle, ShimmerUniforms, Sparkle, SparkleUniforms, particle_fragment,
};
use crate::post::{BlurPass, BloomPipeline};
use crate::transition::{
    ColorPlanes, ColorPlanesUniforms, Contents, ContentsUniforms, DefaultTexture,
    DefaultTextureAndOpacity, Flop, Iris, IrisUniforms, LitVaryings, LitVertex, MvpUniforms,
    OpacityUniforms, PageUniforms, QuadVertex, Twist,
};
use crate::{EffectModel, MODEL_KEYS, Particle, ParticleVaryings, ParticleVertex};

const WHITE: Vec4 = Vec4::ONE;
const BLACK: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);

/// Half size of the default particle quad
pub const PARTICLE_HALF_EXTENT: Vec2 = Vec2::splat(0.05);

/// Side of the synthetic image used for blur and bloom
pub const SAMPLE_IMAGE_SIZE: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("no reference model for effect '{0}'")]
    UnknownEffect(String),

    #[error(transparent)]
    Image(#[from] ImageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampledVertex {
    /// Clip-space `gl_Position`
    pub position: Vec4,
    pub tex_coord: Vec2,
    /// Fragment colour with a white texture
    pub color: Vec4,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampledPixel {
    pub x: usize,
    pub y: usize,
    pub color: Vec4,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Sample {
    Vertices {
        key: &'static str,
        percent: f32,
        vertices: Vec<SampledVertex>,
    },
    Pixels {
        key: &'static str,
        width: usize,
        height: usize,
        pixels: Vec<SampledPixel>,
    },
}

impl Sample {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Vertices { key, .. } | Self::Pixels { key, .. } => *key,
        }
    }
}

/// The particle every particle effect is sampled with
pub fn default_particle() -> Particle {
    Particle {
        center: Vec2::new(0.25, 0.5),
        speed: Vec3::new(0.5, 1.0, 0.0),
        rotation: Vec3::new(0.25, 0.5, 1.0),
        color: Vec4::new(1.0, 0.8, 0.6, 1.0),
        ..Default::default()
    }
}

/// Small white square on black, centred
pub fn sample_image() -> Result<Image, ImageError> {
    let lo = SAMPLE_IMAGE_SIZE / 2 - 1;
    let hi = SAMPLE_IMAGE_SIZE / 2;
    let mut image = Image::filled(SAMPLE_IMAGE_SIZE, SAMPLE_IMAGE_SIZE, BLACK)?;
    for y in lo..=hi {
        for x in lo..=hi {
            image.set(x, y, WHITE);
        }
    }
    Ok(image)
}

/// Evaluate the reference model of `key` at `percent`
///
/// `bloom_amount` is only read by the bloom effect.
pub fn sample_default(key: &str, percent: f32, bloom_amount: f32) -> Result<Sample, SampleError> {
    let key = MODEL_KEYS
        .iter()
        .copied()
        .find(|k| *k == key)
        .ok_or_else(|| SampleError::UnknownEffect(key.to_string()))?;
    log::debug!("Sampling '{}' at percent {}", key, percent);

    let vertices = match key {
        keys::DEFAULT_TEXTURE => {
            quad_vertices::<DefaultTexture>(&MvpUniforms::default(), |tc| {
                DefaultTexture::fragment(&WHITE, tc)
            })
        }
        keys::DEFAULT_TEXTURE_AND_OPACITY => {
            let u = OpacityUniforms {
                opacity: 1.0 - percent,
                ..Default::default()
            };
            quad_vertices::<DefaultTextureAndOpacity>(&u, |tc| {
                DefaultTextureAndOpacity::fragment(&u, &WHITE, tc)
            })
        }
        keys::CONTENTS => {
            let u = ContentsUniforms {
                mix_factor: percent,
                ..Default::default()
            };
            quad_vertices::<Contents>(&u, |tc| Contents::fragment(&u, &WHITE, &BLACK, tc))
        }
        keys::IRIS => {
            let u = IrisUniforms {
                percent_for_alpha: percent,
                ..Default::default()
            };
            quad_vertices::<Iris>(&u, |tc| Iris::fragment(&u, &WHITE, tc))
        }
        keys::COLOR_PLANES => {
            let u = ColorPlanesUniforms::default();
            quad_vertices::<ColorPlanes>(&u, |tc| ColorPlanes::fragment(&u, &WHITE, tc))
        }
        keys::TWIST => lit_vertices::<Twist>(|v| Twist::fragment(&WHITE, v)),
        keys::FLOP => lit_vertices::<Flop>(|v| Flop::fragment(&WHITE, v)),
        keys::FIREWORKS_TRAILS => {
            let u = FireworksTrailsUniforms {
                opacity: 1.0 - percent,
                ..Default::default()
            };
            quad_vertices::<FireworksTrails>(&u, |tc| FireworksTrails::fragment(&u, &WHITE, tc))
        }
        keys::ANVIL_SMOKE => particle_vertices::<AnvilSmoke>(&particle_uniforms(percent)),
        keys::ANVIL_SPECK => particle_vertices::<AnvilSpeck>(&particle_uniforms(percent)),
        keys::CONFETTI => particle_vertices::<Confetti>(&particle_uniforms(percent)),
        keys::FLAME => particle_vertices::<Flame>(&FlameUniforms {
            percent,
            ..Default::default()
        }),
        keys::DIFFUSE => particle_vertices::<Diffuse>(&DiffuseUniforms {
            percent,
            ..Default::default()
        }),
        keys::FIREWORKS => particle_vertices::<Fireworks>(&FireworksUniforms {
            percent,
            previous_percent: percent,
            particle_burst_timing: percent,
            previous_particle_burst_timing: percent,
            ..Default::default()
        }),
        keys::SHIMMER_OBJECT => particle_vertices::<ShimmerObject>(&ShimmerUniforms {
            percent,
            ..Default::default()
        }),
        keys::SHIMMER_PARTICLE => particle_vertices::<ShimmerParticle>(&ShimmerUniforms {
            percent,
            ..Default::default()
        }),
        keys::SPARKLE => particle_vertices::<Sparkle>(&SparkleUniforms {
            percent,
            ..Default::default()
        }),
        keys::HORIZONTAL_GAUSSIAN_BLUR => {
            return Ok(pixels(key, &BlurPass::Horizontal.apply(&sample_image()?)));
        }
        keys::VERTICAL_GAUSSIAN_BLUR => {
            return Ok(pixels(key, &BlurPass::Vertical.apply(&sample_image()?)));
        }
        keys::BLOOM => {
            return Ok(pixels(key, &BloomPipeline::apply(&sample_image()?, bloom_amount)));
        }
        other => return Err(SampleError::UnknownEffect(other.to_string())),
    };

    Ok(Sample::Vertices {
        key,
        percent,
        vertices,
    })
}

fn particle_uniforms(percent: f32) -> ParticleUniforms {
    ParticleUniforms {
        percent,
        ..Default::default()
    }
}

fn particle_vertices<M>(uniforms: &M::Uniforms) -> Vec<SampledVertex>
where
    M: EffectModel<Attributes = ParticleVertex, Varyings = ParticleVaryings>,
{
    default_particle()
        .quad(PARTICLE_HALF_EXTENT)
        .iter()
        .map(|v| {
            let out = M::vertex(uniforms, v);
            SampledVertex {
                position: out.position,
                tex_coord: out.varyings.tex_coord,
                color: particle_fragment(&WHITE, &out.varyings),
            }
        })
        .collect()
}

fn quad_vertices<M>(uniforms: &M::Uniforms, fragment: impl Fn(Vec2) -> Vec4) -> Vec<SampledVertex>
where
    M: EffectModel<Attributes = QuadVertex, Varyings = Vec2>,
{
    QuadVertex::unit_quad()
        .iter()
        .map(|v| {
            let out = M::vertex(uniforms, v);
            SampledVertex {
                position: out.position,
                tex_coord: out.varyings,
                color: fragment(out.varyings),
            }
        })
        .collect()
}

fn lit_vertices<M>(fragment: impl Fn(&LitVaryings) -> Vec4) -> Vec<SampledVertex>
where
    M: EffectModel<Uniforms = PageUniforms, Attributes = LitVertex, Varyings = LitVaryings>,
{
    let uniforms = PageUniforms::default();
    QuadVertex::unit_quad()
        .iter()
        .map(|q| {
            let v = LitVertex {
                position: q.position.extend(0.0),
                normal: Vec3::Z,
                tex_coord: q.tex_coord,
            };
            let out = M::vertex(&uniforms, &v);
            SampledVertex {
                position: out.position,
                tex_coord: out.varyings.tex_coord,
                color: fragment(&out.varyings),
            }
        })
        .collect()
}

fn pixels(key: &'static str, image: &Image) -> Sample {
    let width = image.width();
    let pixels = image
        .pixels()
        .iter()
        .enumerate()
        .map(|(i, color)| SampledPixel {
            x: i % width,
            y: i / width,
            color: *color,
        })
        .collect();
    Sample::Pixels {
        key,
        width,
        height: image.height(),
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_model_key_samples() {
        for key in MODEL_KEYS {
            let sample = sample_default(key, 0.5, 0.5).unwrap();
            assert_eq!(sample.key(), *key);
        }
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            sample_default("doesNotExist", 0.5, 0.0),
            Err(SampleError::UnknownEffect("doesNotExist".to_string()))
        );
    }

    #[test]
    fn test_particle_sample_has_four_corners() {
        match sample_default(keys::SPARKLE, 0.5, 0.0).unwrap() {
            Sample::Vertices { vertices, percent, .. } => {
                assert_eq!(vertices.len(), 4);
                assert_eq!(percent, 0.5);
            }
            other => panic!("expected vertices, got {other:?}"),
        }
    }

    #[test]
    fn test_contents_sample_mixes_to_incoming() {
        let Sample::Vertices { vertices, .. } = sample_default(keys::CONTENTS, 1.0, 0.0).unwrap()
        else {
            panic!("expected vertices");
        };
        for v in vertices {
            assert_eq!(v.color, WHITE);
        }
    }

    #[test]
    fn test_bloom_sample_reads_amount() {
        let Sample::Pixels { pixels, width, height, .. } =
            sample_default(keys::BLOOM, 0.0, 0.0).unwrap()
        else {
            panic!("expected pixels");
        };
        assert_eq!((width, height), (SAMPLE_IMAGE_SIZE, SAMPLE_IMAGE_SIZE));
        assert_eq!(pixels.len(), SAMPLE_IMAGE_SIZE * SAMPLE_IMAGE_SIZE);
        assert!(pixels.iter().all(|p| p.color.x <= 1.0 + 1e-5));

        let Sample::Pixels { pixels: bright, .. } = sample_default(keys::BLOOM, 0.0, 1.0).unwrap()
        else {
            panic!("expected pixels");
        };
        let centre = SAMPLE_IMAGE_SIZE / 2 * SAMPLE_IMAGE_SIZE + SAMPLE_IMAGE_SIZE / 2;
        assert!(bright[centre].color.x > 2.0);
    }

    #[test]
    fn test_sample_serializes_with_kind_tag() {
        let sample = sample_default(keys::HORIZONTAL_GAUSSIAN_BLUR, 0.0, 0.0).unwrap();
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["kind"], "pixels");
        assert_eq!(json["key"], "horizontalGaussianBlur");

        let sample = sample_default(keys::FLAME, 0.25, 0.0).unwrap();
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["kind"], "vertices");
        assert!(json["vertices"][0]["texCoord"].is_array());
    }
}
