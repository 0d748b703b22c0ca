//! Population-ordered secondary extractor.

use crate::api::ExtractError;
use crate::color::Rgb;
use crate::preprocess::PixelSource;

use super::quantize::Quantizer;
use super::SecondaryExtractor;

/// Default secondary extractor: the image's most common colors, most
/// dominant first.
///
/// # Example
///
/// ```
/// use swatch_theme::{DominantExtractor, PixelSource, Rgb, SecondaryExtractor};
///
/// let mut pixels = vec![Rgb::new(30, 30, 200); 3];
/// pixels.push(Rgb::new(200, 30, 30));
///
/// let colors = DominantExtractor::new(1)
///     .extract(&PixelSource::from_colors(&pixels), 12)
///     .unwrap();
/// assert_eq!(colors, vec![Rgb::new(30, 30, 200), Rgb::new(200, 30, 30)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DominantExtractor {
    sample_stride: usize,
}

impl Default for DominantExtractor {
    fn default() -> Self {
        Self::new(10)
    }
}

impl DominantExtractor {
    /// Extractor sampling every `sample_stride` opaque pixels.
    pub fn new(sample_stride: usize) -> Self {
        Self { sample_stride }
    }
}

impl SecondaryExtractor for DominantExtractor {
    fn extract(&self, source: &PixelSource, count: usize) -> Result<Vec<Rgb>, ExtractError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let clusters = Quantizer::new(count, self.sample_stride).quantize(source)?;
        Ok(clusters.into_iter().take(count).map(|c| c.color).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_count() {
        let source = PixelSource::from_colors(&[Rgb::new(1, 2, 3)]);
        assert!(DominantExtractor::new(1).extract(&source, 0).unwrap().is_empty());
    }

    #[test]
    fn test_count_is_an_upper_bound() {
        let pixels: Vec<Rgb> = (0..50u8).map(|i| Rgb::new(i * 5, 100, 255 - i * 5)).collect();
        let colors = DominantExtractor::new(1)
            .extract(&PixelSource::from_colors(&pixels), 6)
            .unwrap();
        assert!(!colors.is_empty() && colors.len() <= 6);
    }

    #[test]
    fn test_too_many_colors_is_an_error() {
        let source = PixelSource::from_colors(&[Rgb::new(1, 2, 3)]);
        assert!(DominantExtractor::new(1).extract(&source, 1000).is_err());
    }
}
