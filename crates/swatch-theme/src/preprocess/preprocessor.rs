//! Core preprocessing logic.
//!
//! The [`Preprocessor`] turns a decoded RGBA bitmap into a bounded
//! [`PixelSource`] so extraction cost and sampling density are the same no
//! matter how large the avatar is.
//!
//! # Degenerate input
//!
//! Zero width or height, or a buffer too short for the stated dimensions, is
//! not an error: the result is a single fully transparent pixel flagged by
//! [`PixelSource::is_degenerate`]. Extractors see no opaque samples and
//! return empty results.

use crate::color::Rgb;
use crate::preprocess::PreprocessOptions;

use super::resize::{downscale_area, target_dimensions};

/// Downscaled pixels ready for the extractors.
///
/// # Example
///
/// ```
/// use swatch_theme::{Preprocessor, PreprocessOptions};
///
/// let preprocessor = Preprocessor::new(PreprocessOptions::new().max_dimension(2));
/// let rgba = [200u8, 10, 10, 255].repeat(16);
/// let source = preprocessor.process(&rgba, 4, 4);
///
/// assert_eq!((source.width(), source.height()), (2, 2));
/// assert_eq!(source.opaque_colors().count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSource {
    pixels: Vec<[u8; 4]>,
    width: u32,
    height: u32,
    min_alpha: u8,
    degenerate: bool,
}

impl PixelSource {
    /// Wrap already-sized RGBA pixels.
    ///
    /// Returns the degenerate 1x1 source if `pixels` does not match the
    /// dimensions.
    pub fn from_pixels(pixels: Vec<[u8; 4]>, width: u32, height: u32, min_alpha: u8) -> Self {
        if width == 0 || height == 0 || pixels.len() != width as usize * height as usize {
            return Self::degenerate(min_alpha);
        }
        Self {
            pixels,
            width,
            height,
            min_alpha,
            degenerate: false,
        }
    }

    /// Wrap opaque colors laid out in a single row.
    pub fn from_colors(colors: &[Rgb]) -> Self {
        let pixels = colors.iter().map(|c| [c.r, c.g, c.b, 255]).collect();
        Self::from_pixels(pixels, colors.len() as u32, 1, 0)
    }

    /// The "no usable data" source: one transparent pixel.
    pub fn degenerate(min_alpha: u8) -> Self {
        Self {
            pixels: vec![[0, 0, 0, 0]],
            width: 1,
            height: 1,
            min_alpha: min_alpha.max(1),
            degenerate: true,
        }
    }

    /// Canvas width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// True if this source came from unusable input.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Colors of every pixel at or above the opacity cutoff.
    pub fn opaque_colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.pixels
            .iter()
            .filter(move |p| p[3] >= self.min_alpha)
            .map(|p| Rgb::new(p[0], p[1], p[2]))
    }
}

/// Image preprocessor.
///
/// Holds only its options, so one instance can be shared across threads and
/// reused for any number of images.
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    options: PreprocessOptions,
}

impl Preprocessor {
    /// Create a preprocessor with the given options.
    pub fn new(options: PreprocessOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &PreprocessOptions {
        &self.options
    }

    /// Downscale an RGBA8 bitmap to the configured bound.
    ///
    /// # Arguments
    /// * `rgba` - Row-major RGBA bytes, at least `width * height * 4` long
    /// * `width` - Intrinsic width in pixels
    /// * `height` - Intrinsic height in pixels
    pub fn process(&self, rgba: &[u8], width: u32, height: u32) -> PixelSource {
        let needed = width as usize * height as usize * 4;
        if width == 0 || height == 0 || rgba.len() < needed {
            return PixelSource::degenerate(self.options.min_alpha);
        }

        let (new_width, new_height) = target_dimensions(width, height, self.options.max_dimension);
        let pixels = downscale_area(rgba, width, height, new_width, new_height);

        PixelSource::from_pixels(pixels, new_width, new_height, self.options.min_alpha)
    }
}
