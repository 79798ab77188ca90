use crate::{ImageError, Result};

use image::{DynamicImage, GenericImageView, RgbaImage};
use mosaic_core::{Rgb, Rgba};

/// The pixels of a single frame, stored column-major (`x` is the outer axis) to match the
/// `width x height x channel` shape images are declared with.
#[derive(Clone, Debug, PartialEq)]
enum Pixels {
    Rgb(Vec<Rgb>),
    Rgba(Vec<Rgba>),
}

/// A single 2D frame of RGB or RGBA pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Pixels,
}

impl Raster {
    /// Builds a raster from interleaved channel bytes laid out as `width x height x channels`.
    pub fn from_channels(
        width: usize,
        height: usize,
        channels: usize,
        data: &[u8],
    ) -> Result<Self> {
        let shape = vec![width, height, channels];
        let expected = declared_len(&shape)?;
        if data.len() != expected {
            return Err(ImageError::ShapeMismatch {
                shape,
                expected,
                actual: data.len(),
            });
        }
        let pixels = match channels {
            3 => Pixels::Rgb(bytemuck::cast_slice(data).to_vec()),
            4 => Pixels::Rgba(bytemuck::cast_slice(data).to_vec()),
            _ => return Err(ImageError::UnsupportedChannelCount { channels }),
        };

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Converts a decoded image, keeping its alpha channel only if it has one.
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        let pixels = if image.color().has_alpha() {
            let rgba = image.to_rgba8();
            Pixels::Rgba(transpose(width, height, |x, y| Rgba(rgba.get_pixel(x, y).0)))
        } else {
            let rgb = image.to_rgb8();
            Pixels::Rgb(transpose(width, height, |x, y| Rgb(rgb.get_pixel(x, y).0)))
        };

        Self {
            width: width as usize,
            height: height as usize,
            pixels,
        }
    }

    /// Converts an RGBA buffer, dropping its alpha channel.
    pub fn from_rgba_image_opaque(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let pixels = transpose(width, height, |x, y| Rgba(image.get_pixel(x, y).0).rgb());

        Self {
            width: width as usize,
            height: height as usize,
            pixels: Pixels::Rgb(pixels),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        match self.pixels {
            Pixels::Rgb(_) => 3,
            Pixels::Rgba(_) => 4,
        }
    }

    /// The pixel at `(x, y)`. Alpha is 255 for RGB rasters.
    ///
    /// # Panics
    ///
    /// If `(x, y)` is outside of the raster.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        assert!(x < self.width && y < self.height);
        let i = x * self.height + y;
        match &self.pixels {
            Pixels::Rgb(p) => p[i].opaque(),
            Pixels::Rgba(p) => p[i],
        }
    }

    /// Samples the pixel under normalized coordinates `(u, v)`.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Rgba {
        self.pixel(pixel_index(u, self.width), pixel_index(v, self.height))
    }
}

/// Number of bytes an image of `shape` holds. The last axis is the channel count, which must be
/// 3 or 4, and no axis may be empty.
pub(crate) fn declared_len(shape: &[usize]) -> Result<usize> {
    let channels = shape.last().copied().unwrap_or(0);
    if channels != 3 && channels != 4 {
        return Err(ImageError::UnsupportedChannelCount { channels });
    }
    if shape.contains(&0) {
        return Err(ImageError::EmptyImage {
            shape: shape.to_vec(),
        });
    }

    shape
        .iter()
        .try_fold(1usize, |len, &axis| len.checked_mul(axis))
        .ok_or_else(|| ImageError::ShapeOverflow {
            shape: shape.to_vec(),
        })
}

/// Maps a normalized coordinate onto `0..len`. The float-to-int cast saturates, so negative and
/// NaN coordinates land on 0, and anything at or past 1.0 lands on the last pixel.
#[inline]
pub fn pixel_index(t: f32, len: usize) -> usize {
    ((t * len as f32) as usize).min(len - 1)
}

fn transpose<T>(width: u32, height: u32, f: impl Fn(u32, u32) -> T) -> Vec<T> {
    let mut out = Vec::with_capacity(width as usize * height as usize);
    for x in 0..width {
        for y in 0..height {
            out.push(f(x, y));
        }
    }

    out
}
