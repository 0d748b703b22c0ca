//! Palette types and utilities
//!
//! This module provides the swatch taxonomy ([`Category`], [`CategoryToken`]),
//! the [`Swatch`] value type, the category-tagged [`Palette`], and error types
//! for parsing.

mod category;
mod error;
mod palette;
mod swatch;

pub use category::{Category, CategoryToken};
pub use error::{ParseCategoryError, ParseColorError};
pub use palette::Palette;
pub use swatch::Swatch;
