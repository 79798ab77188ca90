use crate::{FrameStack, Raster, Result, SourceImage};

use image::{codecs::gif::GifDecoder, AnimationDecoder, GenericImageView, ImageFormat};
use std::{io::Cursor, path::Path};

/// Decodes encoded image bytes. A GIF with more than one frame becomes
/// [`SourceImage::Animated`]; everything else becomes [`SourceImage::Still`].
pub fn decode(bytes: &[u8]) -> Result<SourceImage> {
    let format = image::guess_format(bytes)?;

    if format == ImageFormat::Gif {
        let frames = GifDecoder::new(Cursor::new(bytes))?
            .into_frames()
            .collect_frames()?;
        if frames.len() > 1 {
            tracing::debug!(frames = frames.len(), "decoded animated gif");
            let rasters = frames
                .iter()
                .map(|f| Raster::from_rgba_image_opaque(f.buffer()))
                .collect();

            return Ok(SourceImage::Animated(FrameStack::new(rasters)?));
        }
    }

    let image = image::load_from_memory_with_format(bytes, format)?;
    let (width, height) = image.dimensions();
    tracing::debug!(width, height, ?format, "decoded still image");

    Ok(SourceImage::Still(Raster::from_dynamic(&image)))
}

pub fn open(path: impl AsRef<Path>) -> Result<SourceImage> {
    let bytes = std::fs::read(path)?;

    decode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageError;

    use image::{
        codecs::gif::GifEncoder, Delay, DynamicImage, Frame, ImageBuffer, ImageOutputFormat, Rgba,
    };

    fn encode_png(image: DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn png_without_alpha_decodes_to_rgb() {
        let buffer = ImageBuffer::from_fn(4, 2, |x, _| image::Rgb([x as u8 * 50, 0, 0]));
        let decoded = decode(&encode_png(DynamicImage::ImageRgb8(buffer))).unwrap();
        assert_eq!(decoded.shape(), vec![4, 2, 3]);
        assert_eq!(
            decoded.sample(0.8, 0.1),
            mosaic_core::Rgba::new(150, 0, 0, 255)
        );
    }

    #[test]
    fn png_with_alpha_keeps_it() {
        let buffer = ImageBuffer::from_fn(1, 1, |_, _| Rgba([1, 2, 3, 0]));
        let decoded = decode(&encode_png(DynamicImage::ImageRgba8(buffer))).unwrap();
        assert_eq!(decoded.channels(), 4);
        assert!(decoded.sample(0.0, 0.0).is_transparent());
    }

    #[test]
    fn multi_frame_gif_is_animated() {
        let mut bytes = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut bytes);
            for shade in [0u8, 255].iter() {
                let buffer = ImageBuffer::from_pixel(2, 2, Rgba([*shade, *shade, *shade, 255]));
                encoder
                    .encode_frame(Frame::from_parts(buffer, 0, 0, Delay::from_numer_denom_ms(10, 1)))
                    .unwrap();
            }
        }
        let decoded = decode(&bytes).unwrap();
        assert!(decoded.is_animated());
        assert_eq!(decoded.frame_count(), 2);
        // Palette quantization may shift the exact shades, but not their order.
        let dark = decoded.sample_frame(0, 0.5, 0.5).unwrap();
        let light = decoded.sample_frame(1, 0.5, 0.5).unwrap();
        assert!(light.rgb().r() > dark.rgb().r());
        assert_eq!(light.alpha(), 255);
    }

    #[test]
    fn garbage_is_a_decode_failure() {
        assert!(matches!(
            decode(b"definitely not an image"),
            Err(ImageError::ImageDecodeFailure(_))
        ));
    }
}
