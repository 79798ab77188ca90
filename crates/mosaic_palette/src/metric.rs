use crate::{Lab, Swatch};

use mosaic_core::Rgb;
use serde::{Deserialize, Serialize};

// ITU-R BT.601 luma coefficients.
const RED_WEIGHT: f32 = 0.299;
const GREEN_WEIGHT: f32 = 0.587;
const BLUE_WEIGHT: f32 = 0.114;

/// How distance between two colors is measured.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMetric {
    /// Euclidean distance over sRGB channels, each weighted by its contribution to luminance.
    Rgb,
    /// CIE76 distance in L\*a\*b\* space.
    Lab,
}

impl Default for ColorMetric {
    fn default() -> Self {
        ColorMetric::Rgb
    }
}

impl ColorMetric {
    /// The distance between `a` and `b` under this metric.
    pub fn distance(&self, a: Rgb, b: Rgb) -> f32 {
        match self {
            ColorMetric::Rgb => weighted_rgb_distance(a, b),
            ColorMetric::Lab => Lab::from(a).delta_e76(&Lab::from(b)),
        }
    }
}

pub fn weighted_rgb_distance(a: Rgb, b: Rgb) -> f32 {
    weighted_rgb_distance_squared(a, b).sqrt()
}

#[inline]
pub(crate) fn weighted_rgb_distance_squared(a: Rgb, b: Rgb) -> f32 {
    let dr = a.r() as f32 - b.r() as f32;
    let dg = a.g() as f32 - b.g() as f32;
    let db = a.b() as f32 - b.b() as f32;

    RED_WEIGHT * dr * dr + GREEN_WEIGHT * dg * dg + BLUE_WEIGHT * db * db
}

/// Which of a swatch's two colors is compared against samples.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorChannel {
    Average,
    Dominant,
}

impl Default for ColorChannel {
    fn default() -> Self {
        ColorChannel::Average
    }
}

impl ColorChannel {
    #[inline]
    pub fn of(&self, swatch: &Swatch) -> Rgb {
        match self {
            ColorChannel::Average => swatch.average,
            ColorChannel::Dominant => swatch.dominant,
        }
    }
}

/// The pair of flags that decide how a sample is matched against a palette.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct MatchMode {
    pub metric: ColorMetric,
    pub channel: ColorChannel,
}

impl MatchMode {
    pub fn new(metric: ColorMetric, channel: ColorChannel) -> Self {
        Self { metric, channel }
    }
}
