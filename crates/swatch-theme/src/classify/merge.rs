//! Fallback merge of primary and secondary extractor output.

use crate::color::Rgb;
use crate::palette::{Palette, Swatch};

use super::classifier::Classifier;

/// Fill the categories `primary` is missing from raw `secondary` samples.
///
/// The result starts as a copy of `primary`. For each absent category, in
/// canonical order, `secondary` is scanned in its given (dominance) order:
/// samples whose exact color is already in the result are skipped, the rest
/// are classified, and the first one whose class matches is adopted.
///
/// Guarantees:
/// - categories present in `primary` are never overwritten
/// - no exact color ends up under two categories
/// - categories may remain empty when no sample fits
///
/// Adopted samples carry no population (weight 1).
///
/// # Example
///
/// ```
/// use swatch_theme::{merge, Category, Classifier, Palette, Rgb, Swatch};
///
/// let primary = Palette::new().with(Category::Vibrant, Swatch::new(Rgb::new(10, 200, 10), 50));
/// let secondary = [Rgb::new(10, 200, 10), Rgb::new(20, 20, 20)];
///
/// let merged = merge(&primary, &secondary, &Classifier::default());
/// assert_eq!(merged.get(Category::DarkMuted).map(|s| s.color), Some(Rgb::new(20, 20, 20)));
/// assert_eq!(merged.len(), 2);
/// ```
pub fn merge(primary: &Palette, secondary: &[Rgb], classifier: &Classifier) -> Palette {
    let mut result = *primary;

    let missing: Vec<_> = primary.missing().collect();
    for category in missing {
        let adopted = secondary.iter().copied().find(|&color| {
            !result.contains_color(color) && classifier.classify(color) == Some(category)
        });

        if let Some(color) = adopted {
            result = result.with(category, Swatch::from_color(color));
        }
    }

    result
}
