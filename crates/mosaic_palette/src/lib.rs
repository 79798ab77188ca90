//! Material palettes and color matching.
//!
//! A [`Palette`] is an ordered list of [`Swatch`]es, each pairing a material identifier with the
//! average and dominant colors of that material's texture. Palettes live in a
//! [`PaletteRegistry`] under a name, and any `+`-joined list of names (`"concrete+wool"`)
//! resolves to the concatenation of those palettes.
//!
//! A [`ColorMatcher`] finds the swatch closest to a sampled color, either by a luminance-weighted
//! RGB distance or by CIE76 distance in L\*a\*b\* space ([`ColorMetric`]), comparing against
//! either swatch color ([`ColorChannel`]).

#![deny(
    rust_2018_compatibility,
    rust_2018_idioms,
    nonstandard_style,
    unused,
    future_incompatible
)]
#![warn(clippy::doc_markdown)]

mod color_space;
mod matcher;
mod metric;
mod registry;
mod swatch;

pub use color_space::*;
pub use matcher::*;
pub use metric::*;
pub use registry::*;
pub use swatch::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaletteError {
    /// One or more `+`-joined components of a palette key are not registered.
    #[error("unknown palette {missing:?} in key {key:?}")]
    UnknownPalette { key: String, missing: String },
    #[error("malformed palette definition: {0}")]
    Definition(#[from] serde_json::Error),
    #[error("failed to read palette definition: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PaletteError>;
