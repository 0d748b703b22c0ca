//! Category-tagged palette.
//!
//! A [`Palette`] maps each [`Category`] to at most one [`Swatch`]. Storage is
//! a fixed six-slot array indexed by [`Category::index`], so the "one swatch
//! per category" invariant holds by construction.

use std::fmt;

use super::category::Category;
use super::swatch::Swatch;
use crate::color::Rgb;

/// The set of swatches tagged by category for one image.
///
/// Not required to be total: any subset of the six categories may be absent.
/// Palettes are built once (by an extractor or the merger) and then only
/// read; [`Palette::with`] returns a new value instead of mutating.
///
/// # Example
///
/// ```
/// use swatch_theme::{Category, Palette, Rgb, Swatch};
///
/// let palette = Palette::new()
///     .with(Category::Vibrant, Swatch::new(Rgb::new(10, 200, 10), 50))
///     .with(Category::Muted, Swatch::new(Rgb::new(120, 120, 120), 10));
///
/// assert_eq!(palette.len(), 2);
/// assert!(!palette.is_complete());
/// assert_eq!(palette.get(Category::Vibrant).map(|s| s.color), Some(Rgb::new(10, 200, 10)));
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Palette {
    slots: [Option<Swatch>; 6],
}

impl Palette {
    /// Empty palette.
    #[inline]
    pub const fn new() -> Self {
        Self { slots: [None; 6] }
    }

    /// Return a copy with `category` set to `swatch`, replacing any previous swatch.
    #[must_use]
    pub fn with(mut self, category: Category, swatch: Swatch) -> Self {
        self.slots[category.index()] = Some(swatch);
        self
    }

    /// Swatch for a category, if present.
    #[inline]
    pub fn get(&self, category: Category) -> Option<&Swatch> {
        self.slots[category.index()].as_ref()
    }

    /// True if the category has a swatch.
    #[inline]
    pub fn contains(&self, category: Category) -> bool {
        self.slots[category.index()].is_some()
    }

    /// True if any category already uses exactly this color.
    pub fn contains_color(&self, color: Rgb) -> bool {
        self.iter().any(|(_, swatch)| swatch.color == color)
    }

    /// Present swatches in canonical category order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &Swatch)> + '_ {
        Category::ALL
            .into_iter()
            .filter_map(move |c| self.get(c).map(|s| (c, s)))
    }

    /// Categories without a swatch, in canonical order.
    pub fn missing(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(move |c| !self.contains(*c))
    }

    /// Number of present swatches.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True if no category has a swatch.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// True if all six categories have a swatch.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Population-weighted average of every present swatch.
    ///
    /// Missing populations weigh 1. If every swatch reports population 0 the
    /// plain mean is used instead. Returns `None` for an empty palette.
    pub fn weighted_average(&self) -> Option<Rgb> {
        if self.is_empty() {
            return None;
        }

        let mut total = self.iter().map(|(_, s)| s.weight()).sum::<f64>();
        let uniform = total <= 0.0;
        if uniform {
            total = self.len() as f64;
        }

        let mut sums = [0.0f64; 3];
        for (_, swatch) in self.iter() {
            let w = if uniform { 1.0 } else { swatch.weight() };
            sums[0] += swatch.color.r as f64 * w;
            sums[1] += swatch.color.g as f64 * w;
            sums[2] += swatch.color.b as f64 * w;
        }

        let channel = |sum: f64| (sum / total).round().clamp(0.0, 255.0) as u8;
        Some(Rgb::new(channel(sums[0]), channel(sums[1]), channel(sums[2])))
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<(Category, Swatch)> for Palette {
    /// Collect category/swatch pairs; later pairs replace earlier ones.
    fn from_iter<I: IntoIterator<Item = (Category, Swatch)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Palette::new(), |palette, (c, s)| palette.with(c, s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swatch(r: u8, g: u8, b: u8, pop: u32) -> Swatch {
        Swatch::new(Rgb::new(r, g, b), pop)
    }

    #[test]
    fn test_empty_palette() {
        let palette = Palette::new();
        assert!(palette.is_empty());
        assert!(!palette.is_complete());
        assert_eq!(palette.len(), 0);
        assert_eq!(palette.missing().count(), 6);
        assert_eq!(palette.weighted_average(), None);
    }

    #[test]
    fn test_with_replaces_slot() {
        let palette = Palette::new()
            .with(Category::Muted, swatch(1, 1, 1, 1))
            .with(Category::Muted, swatch(2, 2, 2, 1));
        assert_eq!(palette.len(), 1);
        assert_eq!(palette.get(Category::Muted).unwrap().color, Rgb::new(2, 2, 2));
    }

    #[test]
    fn test_iter_is_canonical_order() {
        let palette: Palette = [
            (Category::LightMuted, swatch(3, 3, 3, 1)),
            (Category::Vibrant, swatch(1, 1, 1, 1)),
            (Category::Muted, swatch(2, 2, 2, 1)),
        ]
        .into_iter()
        .collect();

        let order: Vec<Category> = palette.iter().map(|(c, _)| c).collect();
        assert_eq!(
            order,
            vec![Category::Vibrant, Category::Muted, Category::LightMuted]
        );
        let missing: Vec<Category> = palette.missing().collect();
        assert_eq!(
            missing,
            vec![
                Category::DarkVibrant,
                Category::LightVibrant,
                Category::DarkMuted
            ]
        );
    }

    #[test]
    fn test_contains_color_is_exact() {
        let palette = Palette::new().with(Category::Vibrant, swatch(10, 200, 10, 5));
        assert!(palette.contains_color(Rgb::new(10, 200, 10)));
        assert!(!palette.contains_color(Rgb::new(10, 200, 11)));
    }

    #[test]
    fn test_weighted_average_uses_population() {
        let palette = Palette::new()
            .with(Category::Vibrant, swatch(200, 0, 0, 3))
            .with(Category::Muted, swatch(0, 0, 200, 1));
        assert_eq!(palette.weighted_average(), Some(Rgb::new(150, 0, 50)));
    }

    #[test]
    fn test_weighted_average_missing_population_is_one() {
        let palette = Palette::new()
            .with(Category::Vibrant, Swatch::from_color(Rgb::new(100, 0, 0)))
            .with(Category::Muted, Swatch::from_color(Rgb::new(0, 100, 0)));
        assert_eq!(palette.weighted_average(), Some(Rgb::new(50, 50, 0)));
    }

    #[test]
    fn test_weighted_average_all_zero_population_falls_back_to_mean() {
        let palette = Palette::new()
            .with(Category::Vibrant, swatch(100, 0, 0, 0))
            .with(Category::Muted, swatch(0, 100, 0, 0));
        assert_eq!(palette.weighted_average(), Some(Rgb::new(50, 50, 0)));
    }
}
