use mosaic_core::Rgb;

use serde::{Deserialize, Serialize};

/// A single palette entry. Immutable once loaded.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Swatch {
    /// The identifier handed to the actuator, e.g. `minecraft:red_concrete`.
    pub material: String,
    /// The mean color over the material's texture.
    pub average: Rgb,
    /// The most frequent color in the material's texture.
    pub dominant: Rgb,
}

impl Swatch {
    pub fn new(material: impl Into<String>, average: Rgb, dominant: Rgb) -> Self {
        Self {
            material: material.into(),
            average,
            dominant,
        }
    }

    /// A swatch whose texture is a single flat color.
    pub fn solid(material: impl Into<String>, color: Rgb) -> Self {
        Self::new(material, color, color)
    }
}

/// An ordered sequence of swatches. Order only matters for breaking ties between equally close
/// swatches, where the earlier one wins.
pub type Palette = Vec<Swatch>;
