//! Turns pictures and models into voxels.
//!
//! This library is organized into several crates:
//! - **core**: points, colors and position specs
//! - **palette**: named material palettes and nearest-color matching under RGB or L\*a\*b\*
//! - **build**: the build context, its job and the serpentine grid scheduler
//!
//! Then you get the sources you can build from:
//! - **image**: still images and animated frame stacks
//! - **mesh**: Wavefront OBJ meshes and their voxelization
//!
//! Builds go through an [`Actuator`](build::Actuator), which is whatever actually changes the
//! world. [`RecordingActuator`](build::RecordingActuator) just remembers every call.

pub use mosaic_build as build;
pub use mosaic_core as core;
pub use mosaic_palette as palette;

pub mod prelude {
    pub use super::build::{
        Actuator, BuildContext, BuildReport, BuildSettings, ImageRequest, JobHandle, JobState,
        Material, Outcome,
    };
    pub use super::core::prelude::*;
    pub use super::palette::{ColorMatcher, ColorMetric, MatchMode, PaletteRegistry};
}

#[cfg(feature = "image")]
pub use mosaic_image as image;

#[cfg(feature = "mesh")]
pub use mosaic_mesh as mesh;
