#![allow(clippy::module_inception, clippy::manual_range_contains)]

//! swatch-theme: readable theme colors from avatar images
//!
//! This library derives a small, stable set of accent colors from an
//! arbitrary bitmap, tags them with a fixed six-slot taxonomy, and adjusts
//! them so they stay legible as UI text.
//!
//! # Quick Start
//!
//! The [`PalettePipeline`] builder extracts a [`Palette`]; the [`Selector`]
//! picks and normalizes colors from it:
//!
//! ```
//! use swatch_theme::{Boosts, Category, PalettePipeline, Selector};
//!
//! // 2x2 image: three reds, one near-black
//! let rgba = [
//!     200, 30, 30, 255,   200, 30, 30, 255,
//!     200, 30, 30, 255,   20, 20, 20, 255,
//! ];
//! let report = PalettePipeline::new().extract_palette(&rgba, 2, 2);
//!
//! let selector = Selector::new();
//! let best = selector.best_color(&report.palette, Boosts::default());
//! let quote = selector.category_color(&report.palette, Category::Vibrant.into(), Boosts::new(0, 5));
//!
//! assert!(best.is_some());
//! assert!(quote.is_some());
//! ```
//!
//! # Taxonomy
//!
//! Every swatch belongs to exactly one [`Category`]: a family (vibrant or
//! muted, split by HSL saturation) crossed with a lightness band (dark,
//! normal, light). A [`Palette`] holds at most one swatch per category and
//! may leave any of them empty.
//!
//! # Pipeline Overview
//!
//! ```text
//! RGBA bitmap
//!     |
//!     v
//! Preprocessor            (longer side <= 1024, or 256 in fast mode)
//!     |
//!     v
//! PrimaryExtractor        (category-tagged palette)
//!     |
//!     +-- complete? ----------------------------+
//!     |                                         |
//!     v                                         |
//! SecondaryExtractor      (dominant colors)     |
//!     |                                         |
//!     v                                         |
//! Classifier + merge      (fill missing slots)  |
//!     |                                         |
//!     +<----------------------------------------+
//!     v
//! Selector                (priority list, quality filter)
//!     |
//!     v
//! ContrastNormalizer      (readable band + user boosts)
//! ```
//!
//! The pipeline has no error path: unusable input yields an empty palette,
//! and an extractor failure is recorded in the [`PaletteReport`] while the
//! other extractor's data is still used.
//!
//! # Readability
//!
//! Colors are judged and adjusted in HSL. The [`QualityFilter`] accepts
//! `s > 0.30` and `0.20 < l < 0.80`. The [`ContrastNormalizer`] lifts
//! saturation and lightness that fall below a floor, leaves everything else
//! alone, and is idempotent.

pub mod api;
pub mod classify;
pub mod color;
pub mod extract;
pub mod palette;
pub mod preprocess;
pub mod select;


pub use api::{ExtractError, PalettePipeline, PaletteReport, DEFAULT_SECONDARY_COUNT};
pub use classify::{merge, Classifier, Thresholds};
pub use color::{Hsl, Rgb};
pub use extract::{
    Cluster, DominantExtractor, PrimaryExtractor, Quantizer, SecondaryExtractor, VibrantExtractor,
};
pub use palette::{Category, CategoryToken, Palette, ParseCategoryError, ParseColorError, Swatch};
pub use preprocess::{PixelSource, PreprocessOptions, Preprocessor};
pub use select::{
    Boosts, ContrastNormalizer, NormalizerOptions, Pick, PickSource, QualityFilter, Remap,
    Selector, DEFAULT_COLOR,
};
