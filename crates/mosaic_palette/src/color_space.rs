use mosaic_core::Rgb;

// D65 reference white.
const WHITE_X: f32 = 0.950_47;
const WHITE_Y: f32 = 1.0;
const WHITE_Z: f32 = 1.088_83;

// (6/29)^3 and 3 * (6/29)^2.
const LAB_EPSILON: f32 = 216.0 / 24389.0;
const LAB_SLOPE: f32 = 108.0 / 841.0;

/// A color in CIE L\*a\*b\* space (D65 white point).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Lab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

impl Lab {
    /// The CIE76 color difference, i.e. Euclidean distance in L\*a\*b\*.
    #[inline]
    pub fn delta_e76(&self, other: &Lab) -> f32 {
        self.delta_e76_squared(other).sqrt()
    }

    #[inline]
    pub fn delta_e76_squared(&self, other: &Lab) -> f32 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;

        dl * dl + da * da + db * db
    }
}

impl From<Rgb> for Lab {
    fn from(c: Rgb) -> Self {
        let r = srgb_to_linear(c.r());
        let g = srgb_to_linear(c.g());
        let b = srgb_to_linear(c.b());

        let x = 0.412_456_4 * r + 0.357_576_1 * g + 0.180_437_5 * b;
        let y = 0.212_672_9 * r + 0.715_152_2 * g + 0.072_175 * b;
        let z = 0.019_333_9 * r + 0.119_192 * g + 0.950_304_1 * b;

        let fx = lab_f(x / WHITE_X);
        let fy = lab_f(y / WHITE_Y);
        let fz = lab_f(z / WHITE_Z);

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

/// Undoes the sRGB transfer curve, mapping an 8-bit channel to linear light in `[0, 1]`.
#[inline]
pub fn srgb_to_linear(channel: u8) -> f32 {
    let c = channel as f32 / 255.0;
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn lab_f(t: f32) -> f32 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        t / LAB_SLOPE + 4.0 / 29.0
    }
}
