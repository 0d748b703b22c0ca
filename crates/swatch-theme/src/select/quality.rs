//! Perceptual usability check for accent colors.

use crate::color::{Hsl, Rgb};

/// Rejects colors too close to gray, black, or white to serve as readable
/// accent text.
///
/// A color passes when `s > min_saturation` and
/// `min_lightness < l < max_lightness` (all bounds exclusive).
///
/// # Example
///
/// ```
/// use swatch_theme::{QualityFilter, Rgb};
///
/// let filter = QualityFilter::default();
/// assert!(filter.is_good(Rgb::new(10, 200, 10)));
/// assert!(!filter.is_good(Rgb::new(120, 120, 120))); // gray
/// assert!(!filter.is_good(Rgb::new(5, 5, 40)));      // too dark
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QualityFilter {
    /// Saturation must be strictly above this (0.0..=1.0)
    pub min_saturation: f32,
    /// Lightness must be strictly above this (0.0..=1.0)
    pub min_lightness: f32,
    /// Lightness must be strictly below this (0.0..=1.0)
    pub max_lightness: f32,
}

impl Default for QualityFilter {
    fn default() -> Self {
        Self {
            min_saturation: 0.30,
            min_lightness: 0.20,
            max_lightness: 0.80,
        }
    }
}

impl QualityFilter {
    /// True if the color is usable as accent text.
    #[inline]
    pub fn is_good(&self, rgb: Rgb) -> bool {
        self.is_good_hsl(Hsl::from(rgb))
    }

    /// HSL form of [`QualityFilter::is_good`].
    #[inline]
    pub fn is_good_hsl(&self, hsl: Hsl) -> bool {
        hsl.s > self.min_saturation && hsl.l > self.min_lightness && hsl.l < self.max_lightness
    }

    /// True when bounds are inside 0.0..=1.0 and the lightness window is non-empty.
    pub fn is_valid(&self) -> bool {
        let unit = 0.0..=1.0;
        unit.contains(&self.min_saturation)
            && unit.contains(&self.min_lightness)
            && unit.contains(&self.max_lightness)
            && self.min_lightness < self.max_lightness
    }
}
