//! Target-scoring primary extractor.
//!
//! Quantizes the image into a pool of clusters, then for each category picks
//! the cluster that best matches that category's saturation/lightness target.
//! Clusters outside a category's window are not eligible for it, and each
//! cluster is used at most once, so categories may stay empty.

use crate::color::Hsl;
use crate::palette::{Category, Palette, Swatch};
use crate::preprocess::PixelSource;

use super::quantize::{Cluster, Quantizer};
use super::PrimaryExtractor;
use crate::api::ExtractError;

const WEIGHT_SATURATION: f32 = 3.0;
const WEIGHT_LIGHTNESS: f32 = 6.0;
const WEIGHT_POPULATION: f32 = 1.0;

/// Saturation/lightness window and ideal point for one category.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Target {
    category: Category,
    lightness: (f32, f32, f32),
    saturation: (f32, f32, f32),
}

const DARK_L: (f32, f32, f32) = (0.0, 0.26, 0.45);
const NORMAL_L: (f32, f32, f32) = (0.3, 0.5, 0.7);
const LIGHT_L: (f32, f32, f32) = (0.55, 0.74, 1.0);
const VIBRANT_S: (f32, f32, f32) = (0.35, 1.0, 1.0);
const MUTED_S: (f32, f32, f32) = (0.0, 0.3, 0.4);

/// Search order: vibrant family first so it gets first pick of the pool.
const TARGETS: [Target; 6] = [
    Target {
        category: Category::Vibrant,
        lightness: NORMAL_L,
        saturation: VIBRANT_S,
    },
    Target {
        category: Category::LightVibrant,
        lightness: LIGHT_L,
        saturation: VIBRANT_S,
    },
    Target {
        category: Category::DarkVibrant,
        lightness: DARK_L,
        saturation: VIBRANT_S,
    },
    Target {
        category: Category::Muted,
        lightness: NORMAL_L,
        saturation: MUTED_S,
    },
    Target {
        category: Category::LightMuted,
        lightness: LIGHT_L,
        saturation: MUTED_S,
    },
    Target {
        category: Category::DarkMuted,
        lightness: DARK_L,
        saturation: MUTED_S,
    },
];

impl Target {
    fn accepts(&self, hsl: Hsl) -> bool {
        let (l_min, _, l_max) = self.lightness;
        let (s_min, _, s_max) = self.saturation;
        (l_min..=l_max).contains(&hsl.l) && (s_min..=s_max).contains(&hsl.s)
    }

    fn score(&self, hsl: Hsl, population: u32, max_population: u32) -> f32 {
        let closeness = |value: f32, target: f32| 1.0 - (value - target).abs();
        let share = if max_population == 0 {
            0.0
        } else {
            population as f32 / max_population as f32
        };
        let weighted = closeness(hsl.s, self.saturation.1) * WEIGHT_SATURATION
            + closeness(hsl.l, self.lightness.1) * WEIGHT_LIGHTNESS
            + share * WEIGHT_POPULATION;
        weighted / (WEIGHT_SATURATION + WEIGHT_LIGHTNESS + WEIGHT_POPULATION)
    }
}

/// Default primary extractor.
///
/// # Example
///
/// ```
/// use swatch_theme::{Category, PixelSource, PrimaryExtractor, Rgb, VibrantExtractor};
///
/// let pixels = [Rgb::new(10, 200, 10), Rgb::new(20, 20, 20)];
/// let palette = VibrantExtractor::new(16, 1)
///     .extract(&PixelSource::from_colors(&pixels))
///     .unwrap();
///
/// assert_eq!(palette.get(Category::Vibrant).map(|s| s.color), Some(Rgb::new(10, 200, 10)));
/// assert_eq!(palette.get(Category::DarkMuted).map(|s| s.color), Some(Rgb::new(20, 20, 20)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VibrantExtractor {
    quantizer: Quantizer,
}

impl Default for VibrantExtractor {
    fn default() -> Self {
        Self::new(96, 8)
    }
}

impl VibrantExtractor {
    /// Extractor with a pool of at most `pool_size` clusters sampled every
    /// `sample_stride` pixels.
    pub fn new(pool_size: usize, sample_stride: usize) -> Self {
        Self {
            quantizer: Quantizer::new(pool_size, sample_stride),
        }
    }

    fn select(pool: &[Cluster]) -> Palette {
        let max_population = pool.iter().map(|c| c.population).max().unwrap_or(0);
        let hsl: Vec<Hsl> = pool.iter().map(|c| Hsl::from(c.color)).collect();
        let mut used = vec![false; pool.len()];
        let mut palette = Palette::new();

        for target in TARGETS {
            let mut best: Option<(usize, f32)> = None;
            for (i, cluster) in pool.iter().enumerate() {
                if used[i] || !target.accepts(hsl[i]) {
                    continue;
                }
                let score = target.score(hsl[i], cluster.population, max_population);
                if best.map_or(true, |(_, s)| score > s) {
                    best = Some((i, score));
                }
            }

            if let Some((i, _)) = best {
                used[i] = true;
                palette = palette.with(
                    target.category,
                    Swatch::new(pool[i].color, pool[i].population),
                );
            }
        }

        palette
    }
}

impl PrimaryExtractor for VibrantExtractor {
    fn extract(&self, source: &PixelSource) -> Result<Palette, ExtractError> {
        let pool = self.quantizer.quantize(source)?;
        Ok(Self::select(&pool))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use std::collections::HashSet;

    fn extract(colors: &[Rgb]) -> Palette {
        VibrantExtractor::new(16, 1)
            .extract(&PixelSource::from_colors(colors))
            .unwrap()
    }

    #[test]
    fn test_empty_source_gives_empty_palette() {
        let palette = VibrantExtractor::default()
            .extract(&PixelSource::degenerate(125))
            .unwrap();
        assert!(palette.is_empty());
    }

    #[test]
    fn test_targets_are_matched() {
        let palette = extract(&[
            Rgb::new(200, 30, 30),   // vibrant, l ~0.45
            Rgb::new(250, 160, 160), // light vibrant
            Rgb::new(90, 10, 10),    // dark vibrant
            Rgb::new(140, 120, 110), // muted
            Rgb::new(220, 210, 205), // light muted
            Rgb::new(50, 45, 40),    // dark muted
        ]);
        assert!(palette.is_complete(), "{palette:?}");
        assert_eq!(palette.get(Category::Vibrant).unwrap().color, Rgb::new(200, 30, 30));
        assert_eq!(palette.get(Category::DarkMuted).unwrap().color, Rgb::new(50, 45, 40));
    }

    #[test]
    fn test_each_cluster_used_once() {
        // One color fits both Vibrant and LightVibrant windows
        let palette = extract(&[Rgb::new(240, 100, 100)]);
        assert_eq!(palette.len(), 1);
        let colors: HashSet<Rgb> = palette.iter().map(|(_, s)| s.color).collect();
        assert_eq!(colors.len(), palette.len());
    }

    #[test]
    fn test_gray_never_vibrant() {
        let palette = extract(&[Rgb::new(128, 128, 128)]);
        assert!(!palette.contains(Category::Vibrant));
        assert!(palette.contains(Category::Muted));
    }

    #[test]
    fn test_population_is_recorded() {
        let mut pixels = vec![Rgb::new(200, 30, 30); 5];
        pixels.push(Rgb::new(30, 30, 200));
        let palette = extract(&pixels);
        assert_eq!(palette.get(Category::Vibrant).unwrap().population, Some(5));
    }
}
