//! Public API for the swatch-theme crate.
//!
//! This module provides the high-level API: the [`PalettePipeline`] builder,
//! its [`PaletteReport`], and the [`ExtractError`] extractor error type.

mod builder;
mod error;

pub use builder::{PalettePipeline, PaletteReport, DEFAULT_SECONDARY_COUNT};
pub use error::ExtractError;
