//! Transition effects: full-frame textured quads
//!
//! The vertex stage of every transition places the quad with `MVPMatrix`
//! and forwards (or remaps) the texture coordinate.

use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
use slidefx_catalog::keys;
use slidefx_math::smoothstep;

use crate::image::Sampler;
use crate::{EffectModel, VertexOutput};

/// One corner of a flat quad
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuadVertex {
    pub position: Vec2,
    pub tex_coord: Vec2,
}

impl QuadVertex {
    pub fn new(position: Vec2, tex_coord: Vec2) -> Self {
        Self {
            position,
            tex_coord,
        }
    }

    /// Unit quad corners with matching texture coordinates
    pub fn unit_quad() -> [QuadVertex; 4] {
        [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y].map(|p| QuadVertex::new(p, p))
    }
}

/// One vertex of a lit, possibly curved page
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LitVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tex_coord: Vec2,
}

fn textured_quad(mvp: Mat4, v: &QuadVertex) -> VertexOutput<Vec2> {
    VertexOutput {
        position: mvp * v.position.extend(0.0).extend(1.0),
        varyings: v.tex_coord,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MvpUniforms {
    pub mvp: Mat4,
}

impl Default for MvpUniforms {
    fn default() -> Self {
        Self {
            mvp: Mat4::IDENTITY,
        }
    }
}

/// Plain textured quad
pub struct DefaultTexture;

impl EffectModel for DefaultTexture {
    const KEY: &'static str = keys::DEFAULT_TEXTURE;
    type Uniforms = MvpUniforms;
    type Attributes = QuadVertex;
    type Varyings = Vec2;

    fn vertex(uniforms: &MvpUniforms, v: &QuadVertex) -> VertexOutput<Vec2> {
        textured_quad(uniforms.mvp, v)
    }
}

impl DefaultTexture {
    pub fn fragment(texture: &impl Sampler, tex_coord: Vec2) -> Vec4 {
        texture.sample(tex_coord)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpacityUniforms {
    pub mvp: Mat4,
    pub opacity: f32,
}

impl Default for OpacityUniforms {
    fn default() -> Self {
        Self {
            mvp: Mat4::IDENTITY,
            opacity: 1.0,
        }
    }
}

/// Textured quad scaled by `Opacity`, all four channels
pub struct DefaultTextureAndOpacity;

impl EffectModel for DefaultTextureAndOpacity {
    const KEY: &'static str = keys::DEFAULT_TEXTURE_AND_OPACITY;
    type Uniforms = OpacityUniforms;
    type Attributes = QuadVertex;
    type Varyings = Vec2;

    fn vertex(uniforms: &OpacityUniforms, v: &QuadVertex) -> VertexOutput<Vec2> {
        textured_quad(uniforms.mvp, v)
    }
}

impl DefaultTextureAndOpacity {
    pub fn fragment(uniforms: &OpacityUniforms, texture: &impl Sampler, tex_coord: Vec2) -> Vec4 {
        texture.sample(tex_coord) * uniforms.opacity
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentsUniforms {
    pub mvp: Mat4,
    /// 0 shows the outgoing texture, 1 the incoming one
    pub mix_factor: f32,
}

impl Default for ContentsUniforms {
    fn default() -> Self {
        Self {
            mvp: Mat4::IDENTITY,
            mix_factor: 0.0,
        }
    }
}

/// Crossfade: `Texture2` is outgoing, `Texture` incoming
pub struct Contents;

impl EffectModel for Contents {
    const KEY: &'static str = keys::CONTENTS;
    type Uniforms = ContentsUniforms;
    type Attributes = QuadVertex;
    type Varyings = Vec2;

    fn vertex(uniforms: &ContentsUniforms, v: &QuadVertex) -> VertexOutput<Vec2> {
        textured_quad(uniforms.mvp, v)
    }
}

impl Contents {
    pub fn fragment(
        uniforms: &ContentsUniforms,
        incoming: &impl Sampler,
        outgoing: &impl Sampler,
        tex_coord: Vec2,
    ) -> Vec4 {
        outgoing
            .sample(tex_coord)
            .lerp(incoming.sample(tex_coord), uniforms.mix_factor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrisUniforms {
    pub mvp: Mat4,
    pub opacity: f32,
    /// Iris radius in normalized units
    pub percent_for_alpha: f32,
    /// Width / height of the slide
    pub scale: f32,
    /// 0 keeps the texture outside the iris, 1 inside it
    pub mix: f32,
}

impl Default for IrisUniforms {
    fn default() -> Self {
        Self {
            mvp: Mat4::IDENTITY,
            opacity: 1.0,
            percent_for_alpha: 0.0,
            scale: 1.0,
            mix: 0.0,
        }
    }
}

/// Elliptical iris wipe with a soft edge
pub struct Iris;

impl EffectModel for Iris {
    const KEY: &'static str = keys::IRIS;
    type Uniforms = IrisUniforms;
    type Attributes = QuadVertex;
    type Varyings = Vec2;

    fn vertex(uniforms: &IrisUniforms, v: &QuadVertex) -> VertexOutput<Vec2> {
        textured_quad(uniforms.mvp, v)
    }
}

impl Iris {
    /// Edge gradient: 0 inside the iris, 1 outside, smooth in between
    pub fn gradient(uniforms: &IrisUniforms, tex_coord: Vec2) -> f32 {
        let tolerance = uniforms.percent_for_alpha / 5.0;
        let powers = Vec2::new((tex_coord.x - 0.5) * uniforms.scale, tex_coord.y - 0.5);
        let powers = powers * powers;
        let radius_sqrd = uniforms.percent_for_alpha * uniforms.percent_for_alpha;
        let half_scale = 0.5 * uniforms.scale;
        let dist = (powers.x + powers.y) / (half_scale * half_scale + 0.25);
        smoothstep(radius_sqrd, radius_sqrd + tolerance, dist)
    }

    pub fn fragment(uniforms: &IrisUniforms, texture: &impl Sampler, tex_coord: Vec2) -> Vec4 {
        let gradient = Self::gradient(uniforms, tex_coord);
        let color = Vec4::ZERO.lerp(texture.sample(tex_coord), (uniforms.mix - gradient).abs());
        color * uniforms.opacity
    }
}

/// Directional light for the page-turn transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient: f32,
    pub diffuse: f32,
    pub direction: Vec3,
    /// Half vector and exponent, when the effect has a highlight
    pub specular: Option<(Vec3, f32)>,
}

impl Lighting {
    pub const TWIST: Lighting = Lighting {
        ambient: 0.2,
        diffuse: 1.0,
        direction: Vec3::new(0.1580, 0.5925, 0.7900),
        specular: Some((Vec3::new(0.0835, 0.3131, 0.9460), 32.0)),
    };

    pub const FLOP: Lighting = Lighting {
        ambient: 0.1,
        diffuse: 1.0,
        direction: Vec3::new(0.0, 0.0, 0.9),
        specular: None,
    };

    /// `(diffuse, specular)` colours for a normal
    pub fn shade(&self, normal: Vec3, specular_color: f32) -> (Vec3, Vec3) {
        let ndotl = normal.dot(self.direction).max(0.0);
        let diffuse = Vec3::splat(self.ambient + ndotl * self.diffuse);
        let specular = match self.specular {
            Some((half_plane, exponent)) => {
                let ndoth = normal.dot(half_plane).max(0.0);
                if ndoth <= 0.0 {
                    Vec3::ZERO
                } else {
                    Vec3::splat(ndoth.powf(exponent) * specular_color)
                }
            }
            None => Vec3::ZERO,
        };
        (diffuse, specular)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LitVaryings {
    pub tex_coord: Vec2,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageUniforms {
    pub mvp: Mat4,
    pub texture_matrix: Mat3,
    /// `1` or `-1`; back faces flip their normals
    pub flip_normals: f32,
    /// Highlight strength, twist only
    pub specular_color: f32,
}

impl Default for PageUniforms {
    fn default() -> Self {
        Self {
            mvp: Mat4::IDENTITY,
            texture_matrix: Mat3::IDENTITY,
            flip_normals: 1.0,
            specular_color: 1.0,
        }
    }
}

fn lit_vertex(uniforms: &PageUniforms, v: &LitVertex, lighting: &Lighting) -> VertexOutput<LitVaryings> {
    let normal = v.normal * uniforms.flip_normals;
    let (diffuse, specular) = lighting.shade(normal, uniforms.specular_color);
    let tex_coord = (uniforms.texture_matrix * v.tex_coord.extend(1.0)).truncate();
    VertexOutput {
        position: uniforms.mvp * v.position.extend(1.0),
        varyings: LitVaryings {
            tex_coord,
            diffuse,
            specular,
        },
    }
}

fn lit_fragment(texture: &impl Sampler, v: &LitVaryings) -> Vec4 {
    let tex = texture.sample(v.tex_coord);
    (tex.truncate() * v.diffuse + v.specular).extend(tex.w)
}

/// Page twist with a specular highlight
pub struct Twist;

impl EffectModel for Twist {
    const KEY: &'static str = keys::TWIST;
    type Uniforms = PageUniforms;
    type Attributes = LitVertex;
    type Varyings = LitVaryings;

    fn vertex(uniforms: &PageUniforms, v: &LitVertex) -> VertexOutput<LitVaryings> {
        lit_vertex(uniforms, v, &Lighting::TWIST)
    }
}

impl Twist {
    pub fn fragment(texture: &impl Sampler, v: &LitVaryings) -> Vec4 {
        lit_fragment(texture, v)
    }
}

/// Page flop, diffuse lighting only
pub struct Flop;

impl EffectModel for Flop {
    const KEY: &'static str = keys::FLOP;
    type Uniforms = PageUniforms;
    type Attributes = LitVertex;
    type Varyings = LitVaryings;

    fn vertex(uniforms: &PageUniforms, v: &LitVertex) -> VertexOutput<LitVaryings> {
        lit_vertex(uniforms, v, &Lighting::FLOP)
    }
}

impl Flop {
    pub fn fragment(texture: &impl Sampler, v: &LitVaryings) -> Vec4 {
        lit_fragment(texture, v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPlanesUniforms {
    pub mvp: Mat4,
    /// Non-zero components mirror that texture axis
    pub flip_tex_coords: Vec2,
    pub color_mask: Vec4,
}

impl Default for ColorPlanesUniforms {
    fn default() -> Self {
        Self {
            mvp: Mat4::IDENTITY,
            flip_tex_coords: Vec2::ZERO,
            color_mask: Vec4::ONE,
        }
    }
}

/// One colour plane of the slide, optionally mirrored
pub struct ColorPlanes;

impl EffectModel for ColorPlanes {
    const KEY: &'static str = keys::COLOR_PLANES;
    type Uniforms = ColorPlanesUniforms;
    type Attributes = QuadVertex;
    type Varyings = Vec2;

    fn vertex(uniforms: &ColorPlanesUniforms, v: &QuadVertex) -> VertexOutput<Vec2> {
        let flip = |flag: f32, t: f32| if flag == 0.0 { t } else { 1.0 - t };
        let tex_coord = Vec2::new(
            flip(uniforms.flip_tex_coords.x, v.tex_coord.x),
            flip(uniforms.flip_tex_coords.y, v.tex_coord.y),
        );
        VertexOutput {
            position: uniforms.mvp * v.position.extend(0.0).extend(1.0),
            varyings: tex_coord,
        }
    }
}

impl ColorPlanes {
    pub fn fragment(uniforms: &ColorPlanesUniforms, texture: &impl Sampler, tex_coord: Vec2) -> Vec4 {
        texture.sample(tex_coord) * uniforms.color_mask
    }
}
