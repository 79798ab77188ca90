use crate::{
    metric::weighted_rgb_distance_squared, ColorMetric, Lab, MatchMode, PaletteRegistry,
    ResolvedPalette, Result,
};

use ahash::AHashMap;
use mosaic_core::{Rgb, Rgba};

/// What a sampled color resolves to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Material<'a> {
    /// Place this material.
    Block(&'a str),
    /// No material. The voxel is cleared, never placed.
    Transparent,
}

impl<'a> Material<'a> {
    #[inline]
    pub fn is_transparent(&self) -> bool {
        matches!(self, Material::Transparent)
    }

    #[inline]
    pub fn block(&self) -> Option<&'a str> {
        match self {
            Material::Block(m) => Some(m),
            Material::Transparent => None,
        }
    }
}

// Swatch colors converted once into the space the metric compares in.
enum SwatchColors {
    Rgb(Vec<Rgb>),
    Lab(Vec<Lab>),
}

// Entries kept by the memo before it starts over.
const MAX_CACHED_COLORS: usize = 1 << 16;

/// Nearest-swatch lookup over one resolved palette.
///
/// This is a linear scan: the running best starts at the first swatch and is only replaced on a
/// strictly smaller distance, so equally close swatches resolve to the earliest one. Results are
/// memoized per opaque RGB value, since images tend to repeat colors a lot. The memo holds at
/// most `MAX_CACHED_COLORS` entries and is cleared when it fills up.
pub struct ColorMatcher<'a> {
    palette: ResolvedPalette<'a>,
    colors: SwatchColors,
    cache: AHashMap<Rgb, usize>,
}

impl<'a> ColorMatcher<'a> {
    pub fn new(palette: ResolvedPalette<'a>, mode: MatchMode) -> Self {
        let swatch_rgb = palette.swatches().iter().map(|s| mode.channel.of(s));
        let colors = match mode.metric {
            ColorMetric::Rgb => SwatchColors::Rgb(swatch_rgb.collect()),
            ColorMetric::Lab => SwatchColors::Lab(swatch_rgb.map(Lab::from).collect()),
        };

        Self {
            palette,
            colors,
            cache: AHashMap::new(),
        }
    }

    /// Resolves `key` in `registry` and builds a matcher for it. Fails before any color work if
    /// the key names an unknown palette.
    pub fn from_key(registry: &'a PaletteRegistry, key: &str, mode: MatchMode) -> Result<Self> {
        Ok(Self::new(registry.resolve(key)?, mode))
    }

    pub fn palette(&self) -> &ResolvedPalette<'a> {
        &self.palette
    }

    /// The material for `sample`. Transparent if the sample has zero alpha or the palette is
    /// empty.
    pub fn match_color(&mut self, sample: Rgba) -> Material<'a> {
        if sample.is_transparent() || self.palette.is_empty() {
            return Material::Transparent;
        }

        let rgb = sample.rgb();
        let index = match self.cache.get(&rgb) {
            Some(&i) => i,
            None => {
                let i = self.nearest_index(rgb);
                if self.cache.len() >= MAX_CACHED_COLORS {
                    self.cache.clear();
                }
                self.cache.insert(rgb, i);
                i
            }
        };

        Material::Block(&self.palette.swatches()[index].material)
    }

    // Squared distances order the same as distances, so the strict comparison and its
    // tie-breaking are unchanged.
    fn nearest_index(&self, rgb: Rgb) -> usize {
        match &self.colors {
            SwatchColors::Rgb(colors) => {
                nearest_by(colors, |c| weighted_rgb_distance_squared(rgb, *c))
            }
            SwatchColors::Lab(colors) => {
                let lab = Lab::from(rgb);
                nearest_by(colors, |c| lab.delta_e76_squared(c))
            }
        }
    }
}

fn nearest_by<T>(candidates: &[T], distance: impl Fn(&T) -> f32) -> usize {
    let mut best_index = 0;
    let mut best_distance = distance(&candidates[0]);
    for (i, candidate) in candidates.iter().enumerate().skip(1) {
        let d = distance(candidate);
        if d < best_distance {
            best_index = i;
            best_distance = d;
        }
    }

    best_index
}

/// Resolves a single sampled color against a palette key.
///
/// The key is resolved first, so an unknown palette fails without any color computation.
pub fn resolve_material<'a>(
    registry: &'a PaletteRegistry,
    color: Rgba,
    key: &str,
    mode: MatchMode,
) -> Result<Material<'a>> {
    let mut matcher = ColorMatcher::from_key(registry, key, mode)?;

    Ok(matcher.match_color(color))
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
