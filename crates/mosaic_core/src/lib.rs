//! The core data types shared by the voxel-mosaic crates:
//! - `PointN`: an N-dimensional point, most importantly `Point3f` (a position before placement),
//!   `Point3i` (a voxel) and `Point2f` (a texture coordinate)
//! - `Rgb` and `Rgba`: 8-bit colors as they come out of decoded images
//! - `parse_vector3`: parsing of caller-supplied position and offset specs

#![deny(
    rust_2018_compatibility,
    rust_2018_idioms,
    nonstandard_style,
    unused,
    future_incompatible
)]
#![warn(clippy::doc_markdown)]

pub mod color;
pub mod point;
pub mod point2;
pub mod point3;
pub mod vector_spec;

pub use color::{Rgb, Rgba};
pub use point::{Distance, DotProduct, Lerp, Norm, NormSquared, PointN, SmallZero};
pub use point2::{Point2, Point2f};
pub use point3::{voxel_containing_point3f, Point3, Point3f, Point3i};
pub use vector_spec::{parse_vector3, VectorSpecError};

pub use num;

pub mod prelude {
    pub use super::{
        voxel_containing_point3f, Distance, DotProduct, Lerp, Norm, NormSquared, Point2, Point2f,
        Point3, Point3f, Point3i, PointN, Rgb, Rgba, SmallZero,
    };
}
