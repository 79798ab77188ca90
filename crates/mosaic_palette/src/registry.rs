use crate::{PaletteError, Result, Swatch};

use ahash::AHashMap;
use itertools::Itertools;
use std::path::Path;

const BUILTIN_PALETTES: &str = include_str!("../data/builtin_palettes.json");

/// All named palettes known to a session.
///
/// Palettes are never mutated by resolution. Combining `"a+b"` borrows from both sources.
#[derive(Clone, Debug, Default)]
pub struct PaletteRegistry {
    palettes: AHashMap<String, Vec<Swatch>>,
}

impl PaletteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The palettes shipped with the crate: `concrete` and `wool`.
    ///
    /// # Panics
    ///
    /// If the bundled definition does not parse.
    pub fn builtin() -> Self {
        Self::from_json_str(BUILTIN_PALETTES).expect("bundled palette definition is malformed")
    }

    /// Parses a definition of the form
    /// `{"name": [{"material": "...", "average": [r, g, b], "dominant": [r, g, b]}, ...]}`.
    pub fn from_json_str(definition: &str) -> Result<Self> {
        let palettes: AHashMap<String, Vec<Swatch>> = serde_json::from_str(definition)?;
        tracing::debug!(count = palettes.len(), "loaded palette definitions");

        Ok(Self { palettes })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;

        Self::from_json_str(&text)
    }

    /// Adds every palette from `other`, replacing palettes with the same name.
    pub fn extend(&mut self, other: PaletteRegistry) {
        self.palettes.extend(other.palettes);
    }

    /// Inserts or replaces a palette.
    pub fn insert(&mut self, name: impl Into<String>, swatches: Vec<Swatch>) {
        self.palettes.insert(name.into(), swatches);
    }

    pub fn get(&self, name: &str) -> Option<&[Swatch]> {
        self.palettes.get(name).map(|p| p.as_slice())
    }

    /// Palette names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.palettes.keys().map(|k| k.as_str()).sorted().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// Resolves a `+`-joined palette key into the concatenation of the named palettes, in key
    /// order, without deduplication.
    ///
    /// Fails if any component is unknown, naming every missing component.
    pub fn resolve<'a>(&'a self, key: &str) -> Result<ResolvedPalette<'a>> {
        let names: Vec<&str> = key
            .split('+')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .collect();

        let missing: Vec<&str> = names
            .iter()
            .copied()
            .filter(|n| !self.palettes.contains_key(*n))
            .collect();
        if !missing.is_empty() {
            return Err(PaletteError::UnknownPalette {
                key: key.to_owned(),
                missing: missing.iter().join("+"),
            });
        }

        let swatches = names
            .iter()
            .flat_map(|n| self.palettes[*n].iter())
            .collect();

        Ok(ResolvedPalette { swatches })
    }
}

/// The swatch sequence a palette key resolves to.
#[derive(Clone, Debug, Default)]
pub struct ResolvedPalette<'a> {
    swatches: Vec<&'a Swatch>,
}

impl<'a> ResolvedPalette<'a> {
    pub fn swatches(&self) -> &[&'a Swatch] {
        &self.swatches
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }
}
