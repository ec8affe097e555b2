/// Background trimming and crop healing for captured faces.
use crate::face_image::{RawFaceImage, TrimmedFaceImage, is_background};
use constants::capture::BACKGROUND_SIMILARITY_THRESHOLD;
use image::{Rgb, RgbImage, imageops};

/// Inclusive pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PixelRect {
    x_min: u32,
    x_max: u32,
    y_min: u32,
    y_max: u32,
}

impl PixelRect {
    fn width(&self) -> u32 {
        self.x_max - self.x_min + 1
    }

    fn height(&self) -> u32 {
        self.y_max - self.y_min + 1
    }
}

/// Crops a capture to its content using the default similarity threshold.
///
/// Positive `trim_amount` crops tighter than the content rectangle, negative
/// values pad it; the offset per axis is `round(trim_amount * span)`.
pub fn trim(image: &RawFaceImage, trim_amount: f32) -> TrimmedFaceImage {
    trim_with_threshold(image, trim_amount, BACKGROUND_SIMILARITY_THRESHOLD)
}

pub fn trim_with_threshold(image: &RawFaceImage, trim_amount: f32, threshold: f32) -> TrimmedFaceImage {
    let background = image.background;

    let Some(content) = content_rect(&image.pixels, background, threshold) else {
        // Nothing visible from this side: a single background pixel keeps the
        // pipeline total.
        log::warn!("{:?} capture is entirely background", image.face);
        return TrimmedFaceImage {
            face: image.face,
            pixels: RgbImage::from_pixel(1, 1, background),
            average_colour: background,
        };
    };

    let crop = adjust_rect(content, trim_amount, image.pixels.width(), image.pixels.height());
    let mut pixels =
        imageops::crop_imm(&image.pixels, crop.x_min, crop.y_min, crop.width(), crop.height()).to_image();

    let average_colour = average_foreground(&pixels, background, threshold);
    for pixel in pixels.pixels_mut() {
        if is_background(*pixel, background, threshold) {
            *pixel = average_colour;
        }
    }

    log::debug!(
        "{:?} trimmed {}x{} -> {}x{} at ({}, {})",
        image.face,
        image.pixels.width(),
        image.pixels.height(),
        crop.width(),
        crop.height(),
        crop.x_min,
        crop.y_min
    );

    TrimmedFaceImage {
        face: image.face,
        pixels,
        average_colour,
    }
}

/// Smallest rectangle holding every non-background pixel, if any.
fn content_rect(pixels: &RgbImage, background: Rgb<u8>, threshold: f32) -> Option<PixelRect> {
    let mut rect: Option<PixelRect> = None;
    for (x, y, pixel) in pixels.enumerate_pixels() {
        if is_background(*pixel, background, threshold) {
            continue;
        }
        rect = Some(match rect {
            Some(r) => PixelRect {
                x_min: r.x_min.min(x),
                x_max: r.x_max.max(x),
                y_min: r.y_min.min(y),
                y_max: r.y_max.max(y),
            },
            None => PixelRect {
                x_min: x,
                x_max: x,
                y_min: y,
                y_max: y,
            },
        });
    }
    rect
}

fn adjust_rect(content: PixelRect, trim_amount: f32, width: u32, height: u32) -> PixelRect {
    let (x_min, x_max) = adjust_span(content.x_min, content.x_max, trim_amount, width);
    let (y_min, y_max) = adjust_span(content.y_min, content.y_max, trim_amount, height);
    PixelRect {
        x_min,
        x_max,
        y_min,
        y_max,
    }
}

/// Moves both ends of an inclusive span inward by the trim offset (outward
/// when negative), clamped to `0..limit`. A span shrunk past itself collapses
/// to its midpoint. Exact halves round to even.
fn adjust_span(min: u32, max: u32, trim_amount: f32, limit: u32) -> (u32, u32) {
    let offset = (trim_amount * (max - min) as f32).round_ties_even() as i64;
    let (min, max) = (min as i64, max as i64);
    let (mut lo, mut hi) = (min + offset, max - offset);
    if lo > hi {
        lo = (min + max) / 2;
        hi = lo;
    }
    let last = limit as i64 - 1;
    (lo.clamp(0, last) as u32, hi.clamp(0, last) as u32)
}

/// Mean of the non-background pixels, or the background itself when the
/// crop holds none.
fn average_foreground(pixels: &RgbImage, background: Rgb<u8>, threshold: f32) -> Rgb<u8> {
    let mut sum = [0u64; 3];
    let mut count = 0u64;
    for pixel in pixels.pixels() {
        if !is_background(*pixel, background, threshold) {
            for (acc, &channel) in sum.iter_mut().zip(pixel.0.iter()) {
                *acc += channel as u64;
            }
            count += 1;
        }
    }
    if count == 0 {
        return background;
    }
    Rgb(sum.map(|s| ((s as f64 / count as f64).round()) as u8))
}
