//! Saturation/lightness classifier.

use crate::color::{Hsl, Rgb};
use crate::palette::Category;

/// Band edges for classification.
///
/// The vibrancy edge is inclusive (`s >= vibrancy` is vibrant); the dark and
/// light edges are exclusive (`l < dark` is dark, `l > light` is light), so
/// the mid band is the closed interval `[dark, light]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Thresholds {
    /// Minimum saturation for the vibrant family (0.0..=1.0)
    pub vibrancy: f32,
    /// Lightness below which a color is "Dark" (0.0..=1.0)
    pub dark: f32,
    /// Lightness above which a color is "Light" (0.0..=1.0)
    pub light: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            vibrancy: 0.40,
            dark: 0.40,
            light: 0.60,
        }
    }
}

impl Thresholds {
    /// True when the bands are ordered and inside 0.0..=1.0.
    pub fn is_valid(&self) -> bool {
        let unit = 0.0..=1.0;
        unit.contains(&self.vibrancy)
            && unit.contains(&self.dark)
            && unit.contains(&self.light)
            && self.dark <= self.light
    }
}

/// Maps a color sample to one of the six categories.
///
/// # Example
///
/// ```
/// use swatch_theme::{Category, Classifier, Rgb};
///
/// let classifier = Classifier::default();
/// assert_eq!(classifier.classify(Rgb::new(10, 200, 10)), Some(Category::Vibrant));
/// assert_eq!(classifier.classify(Rgb::new(20, 20, 20)), Some(Category::DarkMuted));
/// assert_eq!(classifier.classify(Rgb::new(250, 250, 250)), Some(Category::LightMuted));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Classifier {
    thresholds: Thresholds,
}

impl Classifier {
    /// Classifier with custom band edges.
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// The band edges in use.
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Classify an 8-bit sample. Total over every `Rgb` value.
    #[inline]
    pub fn classify(&self, rgb: Rgb) -> Option<Category> {
        self.classify_hsl(Hsl::from(rgb))
    }

    /// Classify an HSL value.
    ///
    /// Returns `None` only for non-finite input. The family axis is binary and
    /// the lightness axis is split into three adjacent bands, so every finite
    /// value lands in exactly one category.
    pub fn classify_hsl(&self, hsl: Hsl) -> Option<Category> {
        if !hsl.is_finite() {
            return None;
        }

        let t = &self.thresholds;
        let vibrant = hsl.s >= t.vibrancy;

        let category = if hsl.l < t.dark {
            if vibrant {
                Category::DarkVibrant
            } else {
                Category::DarkMuted
            }
        } else if hsl.l > t.light {
            if vibrant {
                Category::LightVibrant
            } else {
                Category::LightMuted
            }
        } else if vibrant {
            Category::Vibrant
        } else {
            Category::Muted
        };

        Some(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(h: f32, s: f32, l: f32) -> Option<Category> {
        Classifier::default().classify_hsl(Hsl::new(h, s, l))
    }

    #[test]
    fn test_vibrant_mid_band() {
        assert_eq!(classify(120.0, 0.9, 0.5), Some(Category::Vibrant));
        assert_eq!(classify(10.0, 0.4, 0.45), Some(Category::Vibrant));
    }

    #[test]
    fn test_vibrancy_edge_is_inclusive() {
        assert_eq!(classify(200.0, 0.40, 0.5), Some(Category::Vibrant));
        assert_eq!(classify(200.0, 0.3999, 0.5), Some(Category::Muted));
    }

    #[test]
    fn test_lightness_edges_belong_to_mid_band() {
        assert_eq!(classify(200.0, 0.40, 0.40), Some(Category::Vibrant));
        assert_eq!(classify(200.0, 0.40, 0.60), Some(Category::Vibrant));
        assert_eq!(classify(200.0, 0.40, 0.3999), Some(Category::DarkVibrant));
        assert_eq!(classify(200.0, 0.40, 0.6001), Some(Category::LightVibrant));
        assert_eq!(classify(200.0, 0.1, 0.40), Some(Category::Muted));
        assert_eq!(classify(200.0, 0.1, 0.60), Some(Category::Muted));
    }

    #[test]
    fn test_all_six_categories_reachable() {
        assert_eq!(classify(0.0, 0.9, 0.2), Some(Category::DarkVibrant));
        assert_eq!(classify(0.0, 0.9, 0.8), Some(Category::LightVibrant));
        assert_eq!(classify(0.0, 0.1, 0.5), Some(Category::Muted));
        assert_eq!(classify(0.0, 0.1, 0.2), Some(Category::DarkMuted));
        assert_eq!(classify(0.0, 0.1, 0.8), Some(Category::LightMuted));
    }

    #[test]
    fn test_non_finite_is_unclassified() {
        assert_eq!(classify(f32::NAN, 0.5, 0.5), None);
        assert_eq!(classify(0.0, f32::INFINITY, 0.5), None);
    }

    /// Every 8-bit color gets a category.
    #[test]
    fn test_total_over_rgb_grid() {
        let classifier = Classifier::default();
        for r in (0..=255u8).step_by(15) {
            for g in (0..=255u8).step_by(15) {
                for b in (0..=255u8).step_by(15) {
                    assert!(classifier.classify(Rgb::new(r, g, b)).is_some());
                }
            }
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let classifier = Classifier::new(Thresholds {
            vibrancy: 0.9,
            dark: 0.1,
            light: 0.9,
        });
        assert_eq!(
            classifier.classify_hsl(Hsl::new(0.0, 0.8, 0.2)),
            Some(Category::Muted)
        );
    }

    #[test]
    fn test_thresholds_validation() {
        assert!(Thresholds::default().is_valid());
        assert!(!Thresholds {
            vibrancy: 0.4,
            dark: 0.7,
            light: 0.3
        }
        .is_valid());
        assert!(!Thresholds {
            vibrancy: 1.4,
            ..Thresholds::default()
        }
        .is_valid());
    }
}
