use crate::{raster::declared_len, ImageError, Raster, Result};

use mosaic_core::Rgba;

/// Frames of an animation, all the same size. Frames are always sampled as opaque.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameStack {
    frames: Vec<Raster>,
}

impl FrameStack {
    pub fn new(frames: Vec<Raster>) -> Result<Self> {
        let first = frames.first().ok_or_else(|| ImageError::EmptyImage {
            shape: vec![0],
        })?;
        let (expected_width, expected_height) = (first.width(), first.height());
        for (index, frame) in frames.iter().enumerate() {
            if frame.width() != expected_width || frame.height() != expected_height {
                return Err(ImageError::FrameSizeMismatch {
                    index,
                    width: frame.width(),
                    height: frame.height(),
                    expected_width,
                    expected_height,
                });
            }
        }

        Ok(Self { frames })
    }

    pub fn frames(&self) -> &[Raster] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// A decoded source image, owned by the job that decoded it.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceImage {
    Still(Raster),
    Animated(FrameStack),
}

impl SourceImage {
    /// Builds an image from a declared shape and interleaved channel bytes.
    ///
    /// `shape` is `[width, height, channels]` for a still image or
    /// `[frames, width, height, channels]` for an animation. Any other axis count is an
    /// [`ImageError::UnsupportedImageShape`].
    pub fn from_shape_vec(shape: &[usize], data: Vec<u8>) -> Result<Self> {
        match *shape {
            [width, height, channels] => Ok(SourceImage::Still(Raster::from_channels(
                width, height, channels, &data,
            )?)),
            [frame_count, width, height, channels] => {
                let expected = declared_len(shape)?;
                if data.len() != expected {
                    return Err(ImageError::ShapeMismatch {
                        shape: shape.to_vec(),
                        expected,
                        actual: data.len(),
                    });
                }
                // Nonzero, and cannot overflow since the whole shape did not.
                let frame_len = expected / frame_count;
                let frames = data
                    .chunks_exact(frame_len)
                    .map(|frame| Raster::from_channels(width, height, channels, frame))
                    .collect::<Result<Vec<_>>>()?;

                Ok(SourceImage::Animated(FrameStack::new(frames)?))
            }
            _ => Err(ImageError::UnsupportedImageShape {
                shape: shape.to_vec(),
            }),
        }
    }

    pub fn is_animated(&self) -> bool {
        matches!(self, SourceImage::Animated(_))
    }

    pub fn frame_count(&self) -> usize {
        match self {
            SourceImage::Still(_) => 1,
            SourceImage::Animated(stack) => stack.len(),
        }
    }

    fn first_frame(&self) -> &Raster {
        match self {
            SourceImage::Still(raster) => raster,
            // A stack is never empty.
            SourceImage::Animated(stack) => &stack.frames()[0],
        }
    }

    pub fn width(&self) -> usize {
        self.first_frame().width()
    }

    pub fn height(&self) -> usize {
        self.first_frame().height()
    }

    /// 3 or 4. Animated stacks report their stored channel count even though alpha is never
    /// sampled from them.
    pub fn channels(&self) -> usize {
        self.first_frame().channels()
    }

    /// The shape this image would be declared with.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            SourceImage::Still(r) => vec![r.width(), r.height(), r.channels()],
            SourceImage::Animated(s) => vec![s.len(), self.width(), self.height(), self.channels()],
        }
    }

    /// Samples a still image at `(u, v)`. Animations are sampled at their first frame.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Rgba {
        match self {
            SourceImage::Still(raster) => raster.sample(u, v),
            SourceImage::Animated(stack) => stack.frames()[0].sample(u, v).rgb().opaque(),
        }
    }

    /// Samples frame `frame` at `(u, v)`. Still images only have frame 0. Animated frames are
    /// always opaque.
    #[inline]
    pub fn sample_frame(&self, frame: usize, u: f32, v: f32) -> Result<Rgba> {
        match self {
            SourceImage::Still(raster) if frame == 0 => Ok(raster.sample(u, v)),
            SourceImage::Animated(stack) if frame < stack.len() => {
                Ok(stack.frames()[frame].sample(u, v).rgb().opaque())
            }
            _ => Err(ImageError::FrameOutOfRange {
                index: frame,
                count: self.frame_count(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn three_axes_is_still_and_four_is_animated() {
        let still = SourceImage::from_shape_vec(&[2, 1, 3], vec![0; 6]).unwrap();
        assert!(!still.is_animated());
        assert_eq!(still.shape(), vec![2, 1, 3]);

        let animated = SourceImage::from_shape_vec(&[3, 2, 1, 3], vec![0; 18]).unwrap();
        assert!(animated.is_animated());
        assert_eq!(animated.frame_count(), 3);
        assert_eq!(animated.shape(), vec![3, 2, 1, 3]);
    }

    #[test]
    fn other_axis_counts_are_rejected() {
        for shape in [vec![4], vec![2, 2], vec![1, 1, 1, 1, 3]].iter() {
            assert!(matches!(
                SourceImage::from_shape_vec(shape, vec![0; 12]),
                Err(ImageError::UnsupportedImageShape { .. })
            ));
        }
    }

    #[test]
    fn bad_shapes_fail_without_reading_data() {
        assert!(matches!(
            SourceImage::from_shape_vec(&[1, 1, 1, 0], vec![]),
            Err(ImageError::UnsupportedChannelCount { channels: 0 })
        ));
        assert!(matches!(
            SourceImage::from_shape_vec(&[1, 1, 0], vec![]),
            Err(ImageError::UnsupportedChannelCount { channels: 0 })
        ));
        assert!(matches!(
            SourceImage::from_shape_vec(&[0, 2, 2, 3], vec![]),
            Err(ImageError::EmptyImage { .. })
        ));
        assert!(matches!(
            SourceImage::from_shape_vec(&[usize::MAX, usize::MAX, 1, 4], vec![0; 4]),
            Err(ImageError::ShapeOverflow { .. })
        ));
        assert!(matches!(
            SourceImage::from_shape_vec(&[2, 1, 1, 3], vec![0; 3]),
            Err(ImageError::ShapeMismatch { expected: 6, actual: 3, .. })
        ));
    }

    #[test]
    fn still_alpha_defaults_to_opaque() {
        let image = SourceImage::from_shape_vec(&[1, 1, 3], vec![10, 20, 30]).unwrap();
        assert_eq!(image.sample(0.0, 0.0), Rgba::new(10, 20, 30, 255));
    }

    #[test]
    fn animated_frames_ignore_alpha() {
        // Two 1x1 RGBA frames, both fully transparent.
        let image = SourceImage::from_shape_vec(&[2, 1, 1, 4], vec![1, 2, 3, 0, 4, 5, 6, 0])
            .unwrap();
        assert_eq!(image.sample_frame(0, 0.5, 0.5).unwrap(), Rgba::new(1, 2, 3, 255));
        assert_eq!(image.sample_frame(1, 0.5, 0.5).unwrap(), Rgba::new(4, 5, 6, 255));
        assert!(matches!(
            image.sample_frame(2, 0.5, 0.5),
            Err(ImageError::FrameOutOfRange { index: 2, count: 2 })
        ));
    }

    #[test]
    fn frames_are_indexed_frame_then_width_then_height() {
        // 2 frames of 2x1 RGB.
        let data = vec![
            10, 10, 10, 11, 11, 11, // frame 0: x=0, x=1
            20, 20, 20, 21, 21, 21, // frame 1: x=0, x=1
        ];
        let image = SourceImage::from_shape_vec(&[2, 2, 1, 3], data).unwrap();
        assert_eq!(image.sample_frame(1, 0.75, 0.0).unwrap(), Rgba::new(21, 21, 21, 255));
        assert_eq!(image.sample_frame(0, 1.0, 1.0).unwrap(), Rgba::new(11, 11, 11, 255));
    }
}
