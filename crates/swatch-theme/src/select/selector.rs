//! Best-color and per-category selection.

use crate::color::Rgb;
use crate::palette::{Category, CategoryToken, Palette};

use super::contrast::{Boosts, ContrastNormalizer};
use super::quality::QualityFilter;

/// Fallback accent used when a palette has no swatches at all.
pub const DEFAULT_COLOR: Rgb = Rgb::new(225, 138, 36);

/// Where a [`Pick`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickSource {
    /// First priority-list swatch that passed the quality filter
    Quality(Category),
    /// First priority-list swatch present, no quality match
    Present(Category),
    /// Weighted average of every swatch in the palette
    Average,
    /// The configured default color
    Default,
}

/// A selected color before normalization, with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick {
    /// The raw chosen color
    pub color: Rgb,
    /// Which rule produced it
    pub source: PickSource,
}

/// Chooses readable colors from a [`Palette`].
///
/// Holds only configuration; share one instance across threads.
///
/// # Example
///
/// ```
/// use swatch_theme::{Boosts, Category, Palette, Rgb, Selector, Swatch};
///
/// let palette = Palette::new()
///     .with(Category::Vibrant, Swatch::new(Rgb::new(10, 200, 10), 50))
///     .with(Category::Muted, Swatch::new(Rgb::new(120, 120, 120), 10));
///
/// let selector = Selector::default();
/// let best = selector.best_color(&palette, Boosts::default());
/// assert_eq!(best, Some(selector.contrast_normalizer().normalize(Rgb::new(10, 200, 10), Boosts::default())));
/// ```
#[derive(Debug, Clone)]
pub struct Selector {
    priority: Vec<Category>,
    quality: QualityFilter,
    normalizer: ContrastNormalizer,
    default_color: Option<Rgb>,
}

impl Default for Selector {
    fn default() -> Self {
        Self {
            priority: Category::DEFAULT_PRIORITY.to_vec(),
            quality: QualityFilter::default(),
            normalizer: ContrastNormalizer::default(),
            default_color: Some(DEFAULT_COLOR),
        }
    }
}

impl Selector {
    /// Selector with default priority, filter, normalizer and fallback color.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the category priority list. Duplicates are ignored after the first.
    pub fn priority(mut self, priority: impl IntoIterator<Item = Category>) -> Self {
        let mut list: Vec<Category> = Vec::with_capacity(Category::ALL.len());
        for category in priority {
            if !list.contains(&category) {
                list.push(category);
            }
        }
        self.priority = list;
        self
    }

    /// Set the quality filter.
    pub fn quality(mut self, quality: QualityFilter) -> Self {
        self.quality = quality;
        self
    }

    /// Set the contrast normalizer.
    pub fn normalizer(mut self, normalizer: ContrastNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Set (or clear) the color used for empty palettes.
    pub fn default_color(mut self, color: Option<Rgb>) -> Self {
        self.default_color = color;
        self
    }

    /// The priority list in use.
    pub fn priority_list(&self) -> &[Category] {
        &self.priority
    }

    /// The quality filter in use.
    pub fn quality_filter(&self) -> &QualityFilter {
        &self.quality
    }

    /// The normalizer in use.
    pub fn contrast_normalizer(&self) -> &ContrastNormalizer {
        &self.normalizer
    }

    /// The configured fallback color.
    pub fn fallback_color(&self) -> Option<Rgb> {
        self.default_color
    }

    /// Raw selection without normalization.
    ///
    /// 1. first priority swatch passing the quality filter
    /// 2. first priority swatch present
    /// 3. weighted average of the whole palette
    /// 4. the default color, if one is configured
    pub fn pick(&self, palette: &Palette) -> Option<Pick> {
        let candidates = || {
            self.priority
                .iter()
                .filter_map(|&c| palette.get(c).map(|s| (c, s.color)))
        };

        if let Some((category, color)) = candidates().find(|&(_, color)| self.quality.is_good(color)) {
            return Some(Pick {
                color,
                source: PickSource::Quality(category),
            });
        }

        if let Some((category, color)) = candidates().next() {
            return Some(Pick {
                color,
                source: PickSource::Present(category),
            });
        }

        if let Some(color) = palette.weighted_average() {
            return Some(Pick {
                color,
                source: PickSource::Average,
            });
        }

        self.default_color.map(|color| Pick {
            color,
            source: PickSource::Default,
        })
    }

    /// The single best readable color for a palette.
    pub fn best_color(&self, palette: &Palette, boosts: Boosts) -> Option<Rgb> {
        self.pick(palette)
            .map(|pick| self.normalizer.normalize(pick.color, boosts))
    }

    /// The readable color for one category.
    ///
    /// `Disabled` yields `None`. A missing category falls back to the
    /// `Vibrant` swatch, then to `None`.
    pub fn category_color(
        &self,
        palette: &Palette,
        token: CategoryToken,
        boosts: Boosts,
    ) -> Option<Rgb> {
        let category = token.category()?;
        let swatch = palette
            .get(category)
            .or_else(|| palette.get(Category::Vibrant))?;
        Some(self.normalizer.normalize(swatch.color, boosts))
    }
}
