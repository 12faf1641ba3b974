//! Post-process passes: separable Gaussian blur and bloom
//!
//! The blur is a 9-tap Gaussian folded into 5 bilinear taps: the two
//! outer offsets land between texels so linear filtering does half the
//! work. Running the horizontal then the vertical pass gives the 2D blur.

use glam::{Mat4, Vec2, Vec4};
use slidefx_catalog::keys;

use crate::image::{Image, Sampler};
use crate::transition::QuadVertex;
use crate::{EffectModel, VertexOutput};

/// Tap offsets in texels: centre, then `±` each of the other two
pub const BLUR_OFFSETS: [f32; 3] = [0.0, 1.384_615_4, 3.230_769_3];

/// Tap weights matching `BLUR_OFFSETS`; the side taps are used twice
pub const BLUR_WEIGHTS: [f32; 3] = [0.227_027_03, 0.316_216_2, 0.070_270_27];

/// Direction of one blur pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurPass {
    Horizontal,
    Vertical,
}

impl BlurPass {
    pub fn key(self) -> &'static str {
        match self {
            Self::Horizontal => HorizontalBlur::KEY,
            Self::Vertical => VerticalBlur::KEY,
        }
    }

    pub fn direction(self) -> Vec2 {
        match self {
            Self::Horizontal => Vec2::X,
            Self::Vertical => Vec2::Y,
        }
    }

    /// Fragment stage at window position `frag_coord`
    ///
    /// `texture_size` is `1 / size` of the source texture.
    pub fn fragment(self, texture: &impl Sampler, frag_coord: Vec2, texture_size: Vec2) -> Vec4 {
        let dir = self.direction();
        let mut color = texture.sample(frag_coord * texture_size) * BLUR_WEIGHTS[0];
        for (offset, weight) in BLUR_OFFSETS.iter().zip(BLUR_WEIGHTS).skip(1) {
            let step = dir * *offset;
            color += texture.sample((frag_coord + step) * texture_size) * weight;
            color += texture.sample((frag_coord - step) * texture_size) * weight;
        }
        color
    }

    /// Run this pass over a whole image, output the same size as the input
    pub fn apply(self, image: &Image) -> Image {
        let texture_size = image.texel_size();
        image.map_fragments(|frag_coord| self.fragment(image, frag_coord, texture_size))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurUniforms {
    pub mvp: Mat4,
    pub texture_size: Vec2,
}

impl Default for BlurUniforms {
    fn default() -> Self {
        Self {
            mvp: Mat4::IDENTITY,
            texture_size: Vec2::ONE,
        }
    }
}

fn position_only(mvp: Mat4, position: Vec2) -> VertexOutput<()> {
    VertexOutput {
        position: mvp * position.extend(0.0).extend(1.0),
        varyings: (),
    }
}

pub struct HorizontalBlur;

impl EffectModel for HorizontalBlur {
    const KEY: &'static str = keys::HORIZONTAL_GAUSSIAN_BLUR;
    type Uniforms = BlurUniforms;
    type Attributes = Vec2;
    type Varyings = ();

    fn vertex(u: &BlurUniforms, position: &Vec2) -> VertexOutput<()> {
        position_only(u.mvp, *position)
    }
}

pub struct VerticalBlur;

impl EffectModel for VerticalBlur {
    const KEY: &'static str = keys::VERTICAL_GAUSSIAN_BLUR;
    type Uniforms = BlurUniforms;
    type Attributes = Vec2;
    type Varyings = ();

    fn vertex(u: &BlurUniforms, position: &Vec2) -> VertexOutput<()> {
        position_only(u.mvp, *position)
    }
}

/// `color + (blur + color) * amount`, deliberately unclamped
pub fn bloom_composite(color: Vec4, blur: Vec4, amount: f32) -> Vec4 {
    color + (blur + color) * amount
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomUniforms {
    pub mvp: Mat4,
    pub bloom_amount: f32,
}

impl Default for BloomUniforms {
    fn default() -> Self {
        Self {
            mvp: Mat4::IDENTITY,
            bloom_amount: 0.0,
        }
    }
}

/// Additive bloom of a frame with its blurred copy
pub struct Bloom;

impl EffectModel for Bloom {
    const KEY: &'static str = keys::BLOOM;
    type Uniforms = BloomUniforms;
    type Attributes = QuadVertex;
    type Varyings = Vec2;

    fn vertex(u: &BloomUniforms, v: &QuadVertex) -> VertexOutput<Vec2> {
        VertexOutput {
            position: u.mvp * v.position.extend(0.0).extend(1.0),
            varyings: v.tex_coord,
        }
    }
}

impl Bloom {
    pub fn fragment(
        u: &BloomUniforms,
        texture: &impl Sampler,
        blur_texture: &impl Sampler,
        tex_coord: Vec2,
    ) -> Vec4 {
        bloom_composite(
            texture.sample(tex_coord),
            blur_texture.sample(tex_coord),
            u.bloom_amount,
        )
    }
}

/// Horizontal blur, vertical blur, then bloom composite
pub struct BloomPipeline;

impl BloomPipeline {
    /// Both blur passes
    pub fn blur(image: &Image) -> Image {
        let horizontal = BlurPass::Horizontal.apply(image);
        BlurPass::Vertical.apply(&horizontal)
    }

    pub fn apply(image: &Image, amount: f32) -> Image {
        log::debug!(
            "Bloom pass over {}x{} image, amount {}",
            image.width(),
            image.height(),
            amount
        );
        let blurred = Self::blur(image);
        let uniforms = BloomUniforms {
            bloom_amount: amount,
            ..Default::default()
        };
        let texture_size = image.texel_size();
        image.map_fragments(|frag_coord| {
            Bloom::fragment(&uniforms, image, &blurred, frag_coord * texture_size)
        })
    }
}
