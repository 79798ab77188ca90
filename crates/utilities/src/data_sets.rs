use mosaic_core::Rgb;

/// A unit cube with corner `(0, 0, 0)`, six quad faces and per-corner texture coordinates.
pub const UNIT_CUBE_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
vt 0 0
vt 1 0
vt 1 1
vt 0 1
f 1/1 2/2 3/3 4/4
f 5/1 8/4 7/3 6/2
f 1/1 5/2 6/3 2/4
f 4/1 3/2 7/3 8/4
f 1/1 4/2 8/3 5/4
f 2/1 6/2 7/3 3/4
";

/// A single right triangle in the XY plane with legs of length 1.
pub const RIGHT_TRIANGLE_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
f 1/1 2/2 3/3
";

/// Two single-swatch palettes, `black` and `white`, plus `gray` with two equal swatches.
pub const MONOCHROME_PALETTES_JSON: &str = r#"{
  "black": [{"material": "black", "average": [0, 0, 0], "dominant": [0, 0, 0]}],
  "white": [{"material": "white", "average": [255, 255, 255], "dominant": [255, 255, 255]}],
  "gray": [
    {"material": "gray_a", "average": [128, 128, 128], "dominant": [128, 128, 128]},
    {"material": "gray_b", "average": [128, 128, 128], "dominant": [128, 128, 128]}
  ]
}"#;

/// Interleaved `width x height x 3` bytes where column `x` is black for even `x` and white for
/// odd `x`.
pub fn striped_rgb(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 3);
    for x in 0..width {
        let shade = if x % 2 == 0 { 0 } else { 255 };
        for _ in 0..height {
            data.extend_from_slice(&Rgb::new(shade, shade, shade).0);
        }
    }

    data
}

/// Interleaved `width x height x 4` bytes of opaque white, except fully transparent pixels where
/// `x + y` is odd.
pub fn checkered_alpha_rgba(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 4);
    for x in 0..width {
        for y in 0..height {
            let alpha = if (x + y) % 2 == 0 { 255 } else { 0 };
            data.extend_from_slice(&[255, 255, 255, alpha]);
        }
    }

    data
}
