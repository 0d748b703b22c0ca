//! Preprocessing options and configuration.
//!
//! This module provides the [`PreprocessOptions`] struct for configuring
//! the downscale that runs before palette extraction.

/// Default longest side of the analysis canvas.
pub const DEFAULT_MAX_DIMENSION: u32 = 1024;

/// Longest side used by [`PreprocessOptions::fast()`].
pub const FAST_MAX_DIMENSION: u32 = 256;

/// Minimum alpha for a pixel to count as opaque during extraction.
pub const DEFAULT_MIN_ALPHA: u8 = 125;

/// Configuration options for image preprocessing.
///
/// # Defaults
///
/// - Max dimension: 1024 (slower, more accurate colors)
/// - Min alpha: 125 (mostly-transparent pixels are ignored by extractors)
///
/// # Example
///
/// ```
/// use swatch_theme::PreprocessOptions;
///
/// // Accurate default
/// let options = PreprocessOptions::new();
/// assert_eq!(options.max_dimension, 1024);
///
/// // Faster, coarser sampling
/// let options = PreprocessOptions::fast();
/// assert_eq!(options.max_dimension, 256);
///
/// // Builder style
/// let options = PreprocessOptions::new().max_dimension(512).min_alpha(200);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PreprocessOptions {
    /// Longest side of the downscaled canvas, in pixels.
    ///
    /// Images already within the bound keep their size. Zero is treated as 1.
    pub max_dimension: u32,

    /// Minimum alpha for a pixel to be sampled by the extractors.
    pub min_alpha: u8,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            min_alpha: DEFAULT_MIN_ALPHA,
        }
    }
}

impl PreprocessOptions {
    /// Create new preprocessing options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset trading color accuracy for speed (256 px canvas).
    #[inline]
    pub fn fast() -> Self {
        Self::default().max_dimension(FAST_MAX_DIMENSION)
    }

    /// Set the longest side of the analysis canvas.
    #[inline]
    pub fn max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    /// Set the opacity cutoff for sampled pixels.
    #[inline]
    pub fn min_alpha(mut self, min_alpha: u8) -> Self {
        self.min_alpha = min_alpha;
        self
    }
}
