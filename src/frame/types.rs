use std::fmt;
use std::path::Path;

use image::{
    DynamicImage, GenericImageView, ImageBuffer, ImageFormat, Luma, LumaA, Rgb, RgbImage, Rgba,
};

use crate::error::{FrameError, Result, TransitionError};

/// Dimensions shared by every frame taking part in one transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameShape {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

impl FrameShape {
    pub fn new(width: u32, height: u32, channels: u8) -> Self {
        Self {
            width,
            height,
            channels,
        }
    }

    /// Number of pixels in one frame
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bytes in one row
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// Bytes in one frame buffer
    pub fn byte_len(&self) -> usize {
        self.pixel_count() * self.channels as usize
    }
}

// Rendered height x width x channels, matching the buffer layout.
impl fmt::Display for FrameShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.height, self.width, self.channels)
    }
}

/// A single raster frame
///
/// Pixels are stored row-major, height x width x channels, one byte per
/// channel. Frames are never mutated by the transitions; every blend
/// produces a fresh buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    shape: FrameShape,
    data: Vec<u8>,
}

impl Frame {
    /// Create a frame from a raw buffer, checking it matches the shape
    pub fn from_raw(shape: FrameShape, data: Vec<u8>) -> Result<Self> {
        if shape.width == 0 || shape.height == 0 {
            return Err(FrameError::InvalidDimensions {
                width: shape.width,
                height: shape.height,
            }
            .into());
        }
        if shape.channels == 0 {
            return Err(FrameError::UnsupportedChannels { channels: 0 }.into());
        }
        if data.len() != shape.byte_len() {
            return Err(FrameError::BufferSize {
                expected: shape.byte_len(),
                actual: data.len(),
            }
            .into());
        }
        Ok(Self { shape, data })
    }

    /// Internal constructor for buffers already sized from `shape`
    pub(crate) fn from_parts(shape: FrameShape, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), shape.byte_len());
        Self { shape, data }
    }

    /// Create a new all-zero (black) frame
    pub fn black(shape: FrameShape) -> Result<Self> {
        Self::from_raw(shape, vec![0; shape.byte_len()])
    }

    /// Create a new frame where every pixel has the given channel values
    pub fn filled(width: u32, height: u32, color: &[u8]) -> Result<Self> {
        let channels = u8::try_from(color.len())
            .map_err(|_| FrameError::UnsupportedChannels { channels: u8::MAX })?;
        let shape = FrameShape::new(width, height, channels);
        Self::from_raw(shape, color.repeat(shape.pixel_count()))
    }

    /// Wrap an RGB image buffer
    pub fn from_rgb(buffer: RgbImage) -> Result<Self> {
        let shape = FrameShape::new(buffer.width(), buffer.height(), 3);
        Self::from_raw(shape, buffer.into_raw())
    }

    /// Convert a decoded image, keeping 1/2/3/4 channel 8-bit layouts as-is
    pub fn from_dynamic(image: DynamicImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        let (channels, data) = match image {
            DynamicImage::ImageLuma8(img) => (1, img.into_raw()),
            DynamicImage::ImageLumaA8(img) => (2, img.into_raw()),
            DynamicImage::ImageRgb8(img) => (3, img.into_raw()),
            DynamicImage::ImageRgba8(img) => (4, img.into_raw()),
            other if other.color().has_alpha() => (4, other.to_rgba8().into_raw()),
            other => (3, other.to_rgb8().into_raw()),
        };
        Self::from_raw(FrameShape::new(width, height, channels), data)
    }

    /// Convert back into an `image` buffer for encoding
    pub fn to_dynamic(&self) -> Result<DynamicImage> {
        let (w, h) = (self.width(), self.height());
        let data = self.data.clone();
        let image = match self.channels() {
            1 => ImageBuffer::<Luma<u8>, _>::from_raw(w, h, data).map(DynamicImage::ImageLuma8),
            2 => ImageBuffer::<LumaA<u8>, _>::from_raw(w, h, data).map(DynamicImage::ImageLumaA8),
            3 => ImageBuffer::<Rgb<u8>, _>::from_raw(w, h, data).map(DynamicImage::ImageRgb8),
            4 => ImageBuffer::<Rgba<u8>, _>::from_raw(w, h, data).map(DynamicImage::ImageRgba8),
            channels => return Err(FrameError::UnsupportedChannels { channels }.into()),
        };
        image.ok_or_else(|| {
            FrameError::BufferSize {
                expected: self.shape.byte_len(),
                actual: self.data.len(),
            }
            .into()
        })
    }

    /// Save the frame, picking the encoder from the file extension
    ///
    /// Alpha is dropped for formats that cannot store it.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let save_failed = |reason: String| FrameError::SaveFailed {
            path: path.display().to_string(),
            reason,
        };

        let format = ImageFormat::from_path(path).map_err(|e| save_failed(e.to_string()))?;
        let mut image = self.to_dynamic()?;
        if format == ImageFormat::Jpeg && image.color().has_alpha() {
            image = match self.channels() {
                2 => DynamicImage::ImageLuma8(image.to_luma8()),
                _ => DynamicImage::ImageRgb8(image.to_rgb8()),
            };
        }

        image
            .save_with_format(path, format)
            .map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    pub fn shape(&self) -> FrameShape {
        self.shape
    }

    pub fn width(&self) -> u32 {
        self.shape.width
    }

    pub fn height(&self) -> u32 {
        self.shape.height
    }

    pub fn channels(&self) -> u8 {
        self.shape.channels
    }

    /// Raw row-major bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Channel values of the pixel at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.shape.channels as usize;
        let start = (y as usize * self.shape.width as usize + x as usize) * c;
        &self.data[start..start + c]
    }

    /// Bytes of row `y`
    pub fn row(&self, y: u32) -> &[u8] {
        let len = self.shape.row_len();
        let start = y as usize * len;
        &self.data[start..start + len]
    }

    /// Mean of every channel value in the frame
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.data.iter().map(|&v| u64::from(v)).sum();
        sum as f64 / self.data.len() as f64
    }

    /// Number of pixels with at least one non-zero channel
    pub fn count_non_black(&self) -> usize {
        self.data
            .chunks_exact(self.shape.channels as usize)
            .filter(|px| px.iter().any(|&v| v != 0))
            .count()
    }
}

/// Ordered, fixed-length list of equally shaped frames
///
/// Index 0 is the start of the clip, index `len() - 1` its end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameSequence {
    frames: Vec<Frame>,
}

impl FrameSequence {
    /// Build a sequence, rejecting frames whose shape differs from the first
    pub fn new(frames: Vec<Frame>) -> Result<Self> {
        if let Some(first) = frames.first() {
            let expected = first.shape();
            if let Some((index, frame)) = frames
                .iter()
                .enumerate()
                .find(|(_, frame)| frame.shape() != expected)
            {
                return Err(TransitionError::ShapeMismatch {
                    index,
                    expected,
                    found: frame.shape(),
                }
                .into());
            }
        }
        Ok(Self { frames })
    }

    /// Generators only emit frames built from a validated shape
    pub(crate) fn from_uniform(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    /// Create an empty sequence
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a frame, checking it matches the sequence shape
    pub fn push(&mut self, frame: Frame) -> Result<()> {
        if let Some(expected) = self.shape() {
            if frame.shape() != expected {
                return Err(TransitionError::ShapeMismatch {
                    index: self.frames.len(),
                    expected,
                    found: frame.shape(),
                }
                .into());
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Shape shared by every frame, `None` for an empty sequence
    pub fn shape(&self) -> Option<FrameShape> {
        self.frames.first().map(Frame::shape)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    /// Keep only the first `len` frames
    pub fn truncate(&mut self, len: usize) {
        self.frames.truncate(len);
    }
}

impl std::ops::Index<usize> for FrameSequence {
    type Output = Frame;

    fn index(&self, index: usize) -> &Frame {
        &self.frames[index]
    }
}

impl<'a> IntoIterator for &'a FrameSequence {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

impl IntoIterator for FrameSequence {
    type Item = Frame;
    type IntoIter = std::vec::IntoIter<Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

impl TryFrom<Vec<Frame>> for FrameSequence {
    type Error = crate::error::TransitionsError;

    fn try_from(frames: Vec<Frame>) -> Result<Self> {
        Self::new(frames)
    }
}
