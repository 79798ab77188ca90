use bytemuck::{Pod, Zeroable};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An 8-bit sRGB color. Serializes as a plain `[r, g, b]` triple.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[repr(transparent)]
pub struct Rgb(pub [u8; 3]);

/// An 8-bit sRGB color with straight (not premultiplied) alpha. This is what samplers produce.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[repr(transparent)]
pub struct Rgba(pub [u8; 4]);

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    #[inline]
    pub fn r(&self) -> u8 {
        self.0[0]
    }

    #[inline]
    pub fn g(&self) -> u8 {
        self.0[1]
    }

    #[inline]
    pub fn b(&self) -> u8 {
        self.0[2]
    }

    #[inline]
    pub fn with_alpha(self, alpha: u8) -> Rgba {
        let [r, g, b] = self.0;
        Rgba([r, g, b, alpha])
    }

    #[inline]
    pub fn opaque(self) -> Rgba {
        self.with_alpha(u8::MAX)
    }
}

impl Rgba {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    #[inline]
    pub fn rgb(&self) -> Rgb {
        let [r, g, b, _] = self.0;
        Rgb([r, g, b])
    }

    #[inline]
    pub fn alpha(&self) -> u8 {
        self.0[3]
    }

    /// A fully transparent sample never resolves to a material.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.alpha() == 0
    }
}

impl From<Rgb> for Rgba {
    #[inline]
    fn from(c: Rgb) -> Self {
        c.opaque()
    }
}
