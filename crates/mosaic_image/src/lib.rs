//! Still and animated source images, and sampling them at normalized texture coordinates.
//!
//! An image is either a 3-axis raster (`width x height x channel`) or a 4-axis animated stack
//! (`frame x width x height x channel`), with 3 (RGB) or 4 (RGBA) channels. Images come from
//! encoded bytes via [`decode`] or from raw pixel data plus a declared shape via
//! [`SourceImage::from_shape_vec`].
//!
//! Sampling maps `u, v` in `[0, 1)` to the pixel `(floor(u * width), floor(v * height))`,
//! clamping coordinates that land on or beyond the last pixel.

#![deny(
    rust_2018_compatibility,
    rust_2018_idioms,
    nonstandard_style,
    unused,
    future_incompatible
)]
#![warn(clippy::doc_markdown)]

mod decode;
mod raster;
mod source;

pub use decode::*;
pub use raster::*;
pub use source::*;

pub use image;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("failed to decode image: {0}")]
    ImageDecodeFailure(#[from] image::ImageError),
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported image shape {shape:?}: expected 3 axes (width, height, channel) or 4 (frame, width, height, channel)")]
    UnsupportedImageShape { shape: Vec<usize> },
    #[error("unsupported channel count {channels}: expected 3 (RGB) or 4 (RGBA)")]
    UnsupportedChannelCount { channels: usize },
    #[error("image shape {shape:?} has an empty axis")]
    EmptyImage { shape: Vec<usize> },
    #[error("image shape {shape:?} is too large to address")]
    ShapeOverflow { shape: Vec<usize> },
    #[error("pixel data has {actual} bytes but shape {shape:?} needs {expected}")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },
    #[error("frame {index} is {width}x{height}, but the stack is {expected_width}x{expected_height}")]
    FrameSizeMismatch {
        index: usize,
        width: usize,
        height: usize,
        expected_width: usize,
        expected_height: usize,
    },
    #[error("frame {index} out of range for an image with {count} frames")]
    FrameOutOfRange { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, ImageError>;
