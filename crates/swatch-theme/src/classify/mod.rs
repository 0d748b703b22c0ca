//! Classification and fallback merge.
//!
//! The secondary extractor returns uncategorized samples. [`Classifier`]
//! tags each one with a [`Category`](crate::Category) from its HSL
//! saturation and lightness; [`merge`] uses those tags to fill the gaps the
//! primary extractor left.

mod classifier;
mod merge;

pub use classifier::{Classifier, Thresholds};
pub use merge::merge;
