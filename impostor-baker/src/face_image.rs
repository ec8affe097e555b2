/// Pixel buffers flowing between the capture, trim, orient and pack stages.
///
/// All buffers are RGB8 with rows stored top to bottom.
use crate::direction::FaceName;
use crate::error::BakeError;
use image::{Rgb, RgbImage};

/// One capture straight from the renderer.
#[derive(Debug, Clone)]
pub struct RawFaceImage {
    pub face: FaceName,
    /// Clear colour the renderer used for this capture.
    pub background: Rgb<u8>,
    pub pixels: RgbImage,
}

impl RawFaceImage {
    pub fn new(face: FaceName, pixels: RgbImage, background: Rgb<u8>) -> Result<Self, BakeError> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(BakeError::render_failure(face, "renderer returned an empty image"));
        }
        Ok(Self {
            face,
            background,
            pixels,
        })
    }

    /// Wraps a tightly packed RGB byte buffer, rejecting buffers whose length
    /// does not match the stated dimensions.
    pub fn from_raw(
        face: FaceName,
        width: u32,
        height: u32,
        bytes: Vec<u8>,
        background: Rgb<u8>,
    ) -> Result<Self, BakeError> {
        let expected = width as usize * height as usize * 3;
        let actual = bytes.len();
        let pixels = RgbImage::from_raw(width, height, bytes).ok_or_else(|| {
            BakeError::render_failure(
                face,
                format!(
                    "buffer holds {} bytes, {}x{} RGB needs {}",
                    actual, width, height, expected
                ),
            )
        })?;
        Self::new(face, pixels, background)
    }

    /// Solid image of one colour, handy for synthetic captures.
    pub fn filled(face: FaceName, width: u32, height: u32, colour: Rgb<u8>, background: Rgb<u8>) -> Self {
        Self {
            face,
            background,
            pixels: RgbImage::from_pixel(width, height, colour),
        }
    }
}

/// Capture cropped to its content with background holes healed.
#[derive(Debug, Clone)]
pub struct TrimmedFaceImage {
    /// Direction the source capture was taken from.
    pub face: FaceName,
    pub pixels: RgbImage,
    /// Mean colour of the foreground pixels inside the crop.
    pub average_colour: Rgb<u8>,
}

/// Trimmed image after the fixed orientation transform.
#[derive(Debug, Clone)]
pub struct OrientedFaceImage {
    /// Atlas slot this image now fills.
    pub slot: FaceName,
    /// Direction the pixels were originally captured from.
    pub source: FaceName,
    pub pixels: RgbImage,
}

/// Euclidean RGB distance with channels scaled to 0-1
pub fn colour_distance(a: Rgb<u8>, b: Rgb<u8>) -> f32 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(&x, &y)| {
            let d = (x as f32 - y as f32) / 255.0;
            d * d
        })
        .sum::<f32>()
        .sqrt()
}

pub fn is_background(pixel: Rgb<u8>, background: Rgb<u8>, threshold: f32) -> bool {
    colour_distance(pixel, background) < threshold
}
