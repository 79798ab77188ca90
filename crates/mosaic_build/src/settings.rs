use crate::Result;

use mosaic_core::prelude::*;
use mosaic_palette::{ColorChannel, ColorMetric, MatchMode};
use serde::{Deserialize, Serialize};

/// The order in which the cells of one chunk are visited. Chunks always advance along `x`, and
/// the `z` direction flips from one chunk to the next.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepOrder {
    /// At each `z`, visit the chunk's columns in increasing `x`, then advance `z`. The path is a
    /// continuous band a chunk wide.
    Banded,
    /// Sweep each column of the chunk over the full height before moving to the next column.
    ColumnMajor,
}

impl Default for SweepOrder {
    fn default() -> Self {
        SweepOrder::Banded
    }
}

/// Where grid cell `(x, z)` of a `width x height` image lands relative to the build base.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GridPlane {
    /// Flat on the ground: `base + (x, 0, z)`.
    Horizontal,
    /// Standing up, image top at the top: `base + (x, height - 1 - z, 0)`.
    Vertical,
}

impl Default for GridPlane {
    fn default() -> Self {
        GridPlane::Horizontal
    }
}

impl GridPlane {
    #[inline]
    pub fn position(&self, base: Point3i, height: usize, x: usize, z: usize) -> Point3i {
        let offset = match self {
            GridPlane::Horizontal => PointN([x as i32, 0, z as i32]),
            GridPlane::Vertical => PointN([x as i32, (height - 1 - z) as i32, 0]),
        };

        base + offset
    }
}

/// Session-wide build settings, read at the moment a build or match starts.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct BuildSettings {
    pub metric: ColorMetric,
    pub channel: ColorChannel,
    /// Columns per chunk. Must be at least 1.
    pub chunk_size: usize,
    pub sweep: SweepOrder,
    pub plane: GridPlane,
    /// Placed at every vertex by points-only mesh builds.
    pub marker_material: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            metric: ColorMetric::default(),
            channel: ColorChannel::default(),
            chunk_size: 4,
            sweep: SweepOrder::default(),
            plane: GridPlane::default(),
            marker_material: "minecraft:white_concrete".to_owned(),
        }
    }
}

impl BuildSettings {
    /// Parses settings from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn match_mode(&self) -> MatchMode {
        MatchMode::new(self.metric, self.channel)
    }
}
