//! CPU image and texture sampling
//!
//! Sampling follows GL conventions for the post-process passes: linear
//! filtering, clamp-to-edge addressing, texel centres at `(x + 0.5,
//! y + 0.5) / size` in normalized coordinates.

use glam::{Vec2, Vec4};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("image is {width}x{height} but {actual} pixels were supplied")]
    SizeMismatch {
        width: usize,
        height: usize,
        actual: usize,
    },

    #[error("image has zero width or height")]
    Empty,
}

/// Anything a fragment stage can read with `texture2D`
pub trait Sampler {
    /// Sample at normalized texture coordinates
    fn sample(&self, uv: Vec2) -> Vec4;
}

/// A constant colour behaves like a 1x1 texture
impl Sampler for Vec4 {
    fn sample(&self, _uv: Vec2) -> Vec4 {
        *self
    }
}

/// RGBA float image, row-major, row 0 at `v = 0`
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Vec4>,
}

impl Image {
    pub fn new(width: usize, height: usize, pixels: Vec<Vec4>) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::Empty);
        }
        if pixels.len() != width * height {
            return Err(ImageError::SizeMismatch {
                width,
                height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image of one colour
    pub fn filled(width: usize, height: usize, color: Vec4) -> Result<Self, ImageError> {
        Self::new(width, height, vec![color; width * height])
    }

    /// Image whose pixel `(x, y)` is `f(x, y)`
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> Vec4,
    ) -> Result<Self, ImageError> {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Vec4] {
        &self.pixels
    }

    /// Raw `f32` RGBA bytes, ready for a texture upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Pixel at integer coordinates, clamped to the edge
    pub fn texel(&self, x: isize, y: isize) -> Vec4 {
        let x = x.clamp(0, self.width as isize - 1) as usize;
        let y = y.clamp(0, self.height as isize - 1) as usize;
        self.pixels[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, color: Vec4) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    /// `1 / size`, the `TextureSize` uniform of the blur programs
    pub fn texel_size(&self) -> Vec2 {
        Vec2::new(1.0 / self.width as f32, 1.0 / self.height as f32)
    }

    /// Window coordinates of the centre of pixel `(x, y)`, as `gl_FragCoord.xy`
    pub fn frag_coord(x: usize, y: usize) -> Vec2 {
        Vec2::new(x as f32 + 0.5, y as f32 + 0.5)
    }

    /// Run a fragment function over every pixel, producing a new image
    pub fn map_fragments(&self, mut f: impl FnMut(Vec2) -> Vec4) -> Image {
        let mut pixels = Vec::with_capacity(self.pixels.len());
        for y in 0..self.height {
            for x in 0..self.width {
                pixels.push(f(Self::frag_coord(x, y)));
            }
        }
        Image {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

impl Sampler for Image {
    fn sample(&self, uv: Vec2) -> Vec4 {
        let x = texel_space(uv.x, self.width);
        let y = texel_space(uv.y, self.height);
        let x0 = x.floor();
        let y0 = y.floor();
        let tx = x - x0;
        let ty = y - y0;
        let (x0, y0) = (x0 as isize, y0 as isize);

        let top = self.texel(x0, y0).lerp(self.texel(x0 + 1, y0), tx);
        let bottom = self.texel(x0, y0 + 1).lerp(self.texel(x0 + 1, y0 + 1), tx);
        top.lerp(bottom, ty)
    }
}

/// Texel-centre coordinate along one axis, kept within one texel of the edge
///
/// Anything past the edge samples the border texel anyway; NaN lands on
/// the first texel.
fn texel_space(coord: f32, size: usize) -> f32 {
    let x = coord * size as f32 - 0.5;
    if x.is_nan() { 0.0 } else { x.clamp(-1.0, size as f32) }
}
