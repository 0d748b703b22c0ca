//! Color selection for display.
//!
//! [`Selector`] picks a color from a [`Palette`](crate::Palette) by category
//! priority, preferring swatches the [`QualityFilter`] accepts, and passes
//! the result through the [`ContrastNormalizer`] so it stays readable as
//! text on a dark or light UI.

mod contrast;
mod quality;
mod selector;

pub use contrast::{Boosts, ContrastNormalizer, NormalizerOptions, Remap};
pub use quality::QualityFilter;
pub use selector::{Pick, PickSource, Selector, DEFAULT_COLOR};
