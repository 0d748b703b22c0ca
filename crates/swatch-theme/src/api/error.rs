//! Error type for palette extractors.
//!
//! Extractors report failure through [`ExtractError`] instead of panicking;
//! the pipeline records the error and carries on with whatever data the
//! other extractor produced.

use std::fmt;

/// Failure reported by a [`PrimaryExtractor`](crate::PrimaryExtractor) or
/// [`SecondaryExtractor`](crate::SecondaryExtractor).
///
/// # Example
///
/// ```
/// use swatch_theme::ExtractError;
///
/// let err = ExtractError::invalid("max_colors", "must be at least 1");
/// assert_eq!(err.to_string(), "invalid extractor parameter max_colors: must be at least 1");
/// ```
#[derive(Debug)]
pub enum ExtractError {
    /// An extractor was configured with an unusable value
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// What is wrong with it
        reason: String,
    },
    /// The underlying algorithm failed
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

impl ExtractError {
    /// Shorthand for [`ExtractError::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ExtractError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Wrap an arbitrary error from a custom extractor.
    pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        ExtractError::Backend(err.into())
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::InvalidParameter { name, reason } => {
                write!(f, "invalid extractor parameter {}: {}", name, reason)
            }
            ExtractError::Backend(err) => write!(f, "extractor failed: {}", err),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractError::InvalidParameter { .. } => None,
            ExtractError::Backend(err) => Some(err.as_ref()),
        }
    }
}
