//! Palette extractor contracts and built-in implementations.
//!
//! The pipeline talks to two extractors through traits:
//!
//! - [`PrimaryExtractor`] returns a category-tagged [`Palette`]
//! - [`SecondaryExtractor`] returns up to `count` uncategorized colors,
//!   most dominant first; the [`Classifier`](crate::Classifier) tags them
//!
//! Both report failure with [`ExtractError`] and must treat an image with no
//! opaque pixels as "no data" (empty result), not as an error.
//!
//! The built-ins ([`VibrantExtractor`], [`DominantExtractor`]) share a
//! k-means quantizer and are deterministic.

mod dominant;
mod quantize;
mod vibrant;

use crate::api::ExtractError;
use crate::color::Rgb;
use crate::palette::Palette;
use crate::preprocess::PixelSource;

pub use dominant::DominantExtractor;
pub use quantize::{Cluster, Quantizer};
pub use vibrant::VibrantExtractor;

/// Produces a category-tagged palette directly.
pub trait PrimaryExtractor: Send + Sync {
    /// Extract a palette; categories the image cannot fill stay empty.
    fn extract(&self, source: &PixelSource) -> Result<Palette, ExtractError>;
}

/// Produces raw dominant colors for the fallback merge.
pub trait SecondaryExtractor: Send + Sync {
    /// Up to `count` colors, most dominant first.
    fn extract(&self, source: &PixelSource, count: usize) -> Result<Vec<Rgb>, ExtractError>;
}
