#![deny(
    rust_2018_compatibility,
    rust_2018_idioms,
    nonstandard_style,
    unused,
    future_incompatible
)]
#![warn(clippy::doc_markdown)]

//! Parsing of a minimal, OBJ-like triangulated mesh format and voxelization of its faces.
//!
//! Voxelization works by linear interpolation. A line emits one voxel per unit of length, a
//! triangle is a fan of lines from points along edge AB to C, and a quad is two triangles plus
//! its four boundary edges. Every emitted voxel carries the interpolated texture coordinate so the
//! caller can sample a texture for it.

mod mesh;
mod voxelize;

pub use mesh::*;
pub use voxelize::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("line {line}: cannot parse {token:?} as a finite number")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: expected {expected} components, found {found}")]
    MissingComponent {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: index {index} out of range for {len} elements")]
    IndexOutOfRange { line: usize, index: i64, len: usize },
    #[error("line {line}: faces must have 3 or 4 vertices, found {arity}")]
    UnsupportedFaceArity { line: usize, arity: usize },
    #[error("failed to read mesh: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MeshError>;
