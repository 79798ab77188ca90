//! Scheduling of voxel builds.
//!
//! Image and animation builds walk a 2D grid in serpentine order, a chunk of columns at a time,
//! yielding to the actuator's rate limiter once per chunk row and checking for cancellation
//! before every voxel. Mesh builds stream voxels to the actuator as the rasterizer produces them.
//!
//! Everything a session needs (palettes, settings, the current job) lives in a [`BuildContext`]
//! owned by the caller.

#![deny(
    rust_2018_compatibility,
    rust_2018_idioms,
    nonstandard_style,
    unused,
    future_incompatible
)]
#![warn(clippy::doc_markdown)]

mod actuator;
mod context;
mod job;
mod scheduler;
mod settings;

pub use actuator::*;
pub use context::*;
pub use job::*;
pub use scheduler::*;
pub use settings::*;

pub use mosaic_palette::Material;

use mosaic_core::VectorSpecError;
use mosaic_palette::PaletteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Palette(#[from] PaletteError),
    #[cfg(feature = "image")]
    #[error(transparent)]
    Image(#[from] mosaic_image::ImageError),
    #[cfg(feature = "mesh")]
    #[error(transparent)]
    Mesh(#[from] mosaic_mesh::MeshError),
    #[error(transparent)]
    InvalidVectorSpec(#[from] VectorSpecError),
    #[error("invalid build settings: {0}")]
    Settings(#[from] serde_json::Error),
    #[error("a build job is already running")]
    JobAlreadyRunning,
    #[error("chunk size must be at least 1")]
    InvalidChunkSize,
    #[error("build grid {width}x{height} has no cells")]
    EmptyGrid { width: usize, height: usize },
}

pub type Result<T> = std::result::Result<T, BuildError>;
