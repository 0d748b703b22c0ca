//! PalettePipeline builder -- the main entry point for palette extraction.
//!
//! [`PalettePipeline`] chains preprocessing, the primary extractor, the
//! secondary extractor and the fallback merge behind a fluent builder.

use std::fmt;
use std::sync::Arc;

use crate::api::ExtractError;
use crate::classify::{merge, Classifier};
use crate::extract::{DominantExtractor, PrimaryExtractor, SecondaryExtractor, VibrantExtractor};
use crate::palette::Palette;
use crate::preprocess::{PixelSource, PreprocessOptions, Preprocessor};

/// Colors requested from the secondary extractor by default.
pub const DEFAULT_SECONDARY_COUNT: usize = 12;

/// Outcome of one extraction run.
///
/// Extractor failures never abort the run; they are recorded here and the
/// failing extractor contributes nothing.
#[derive(Debug, Default)]
pub struct PaletteReport {
    /// The merged palette
    pub palette: Palette,
    /// Error from the primary extractor, if it failed
    pub primary_error: Option<ExtractError>,
    /// Error from the secondary extractor, if it ran and failed
    pub secondary_error: Option<ExtractError>,
    /// True if the secondary extractor was consulted
    pub used_secondary: bool,
    /// True if the input had no usable pixels
    pub degenerate: bool,
}

impl PaletteReport {
    /// True if either extractor failed.
    pub fn has_errors(&self) -> bool {
        self.primary_error.is_some() || self.secondary_error.is_some()
    }
}

/// Palette extraction pipeline.
///
/// # Design
///
/// - Built-in extractors by default; swap either with
///   [`primary()`](Self::primary) / [`secondary()`](Self::secondary)
/// - Configuration methods consume and return `self`
/// - [`extract_palette()`](Self::extract_palette) takes `&self`, and the
///   pipeline is `Send + Sync`, so one instance serves every image
/// - The secondary extractor only runs when the primary palette is incomplete
///
/// # Example
///
/// ```
/// use swatch_theme::{Category, PalettePipeline, Rgb};
///
/// // 2x1 image: green, near-black
/// let rgba = [10, 200, 10, 255, 20, 20, 20, 255];
/// let report = PalettePipeline::new().extract_palette(&rgba, 2, 1);
///
/// assert!(!report.has_errors());
/// assert_eq!(report.palette.get(Category::Vibrant).map(|s| s.color), Some(Rgb::new(10, 200, 10)));
/// ```
#[derive(Clone)]
pub struct PalettePipeline {
    preprocessor: Preprocessor,
    primary: Arc<dyn PrimaryExtractor>,
    secondary: Arc<dyn SecondaryExtractor>,
    classifier: Classifier,
    secondary_count: usize,
}

impl Default for PalettePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PalettePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PalettePipeline")
            .field("preprocessor", &self.preprocessor)
            .field("classifier", &self.classifier)
            .field("secondary_count", &self.secondary_count)
            .finish_non_exhaustive()
    }
}

impl PalettePipeline {
    /// Pipeline with the built-in extractors and default options.
    pub fn new() -> Self {
        Self {
            preprocessor: Preprocessor::default(),
            primary: Arc::new(VibrantExtractor::default()),
            secondary: Arc::new(DominantExtractor::default()),
            classifier: Classifier::default(),
            secondary_count: DEFAULT_SECONDARY_COUNT,
        }
    }

    /// Set preprocessing options.
    #[inline]
    pub fn preprocess(mut self, options: PreprocessOptions) -> Self {
        self.preprocessor = Preprocessor::new(options);
        self
    }

    /// Replace the primary extractor.
    pub fn primary(mut self, extractor: impl PrimaryExtractor + 'static) -> Self {
        self.primary = Arc::new(extractor);
        self
    }

    /// Replace the primary extractor with a shared one.
    pub fn primary_shared(mut self, extractor: Arc<dyn PrimaryExtractor>) -> Self {
        self.primary = extractor;
        self
    }

    /// Replace the secondary extractor.
    pub fn secondary(mut self, extractor: impl SecondaryExtractor + 'static) -> Self {
        self.secondary = Arc::new(extractor);
        self
    }

    /// Replace the secondary extractor with a shared one.
    pub fn secondary_shared(mut self, extractor: Arc<dyn SecondaryExtractor>) -> Self {
        self.secondary = extractor;
        self
    }

    /// Set the classifier used for secondary samples.
    #[inline]
    pub fn classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Set how many colors to request from the secondary extractor.
    #[inline]
    pub fn secondary_count(mut self, count: usize) -> Self {
        self.secondary_count = count;
        self
    }

    /// Preprocessing options in use.
    pub fn preprocess_options(&self) -> &PreprocessOptions {
        self.preprocessor.options()
    }

    /// Extract a palette from a raw RGBA8 bitmap.
    ///
    /// 1. Preprocess (bound the size, drop transparency)
    /// 2. Primary extractor
    /// 3. Secondary extractor + merge, only if categories are missing
    pub fn extract_palette(&self, rgba: &[u8], width: u32, height: u32) -> PaletteReport {
        let source = self.preprocessor.process(rgba, width, height);
        self.extract_from_source(&source)
    }

    /// Run the extraction stages on an already-preprocessed source.
    pub fn extract_from_source(&self, source: &PixelSource) -> PaletteReport {
        let mut report = PaletteReport {
            degenerate: source.is_degenerate(),
            ..PaletteReport::default()
        };

        let primary = match self.primary.extract(source) {
            Ok(palette) => palette,
            Err(err) => {
                report.primary_error = Some(err);
                Palette::new()
            }
        };

        if primary.is_complete() {
            report.palette = primary;
            return report;
        }

        report.used_secondary = true;
        let samples = match self.secondary.extract(source, self.secondary_count) {
            Ok(samples) => samples,
            Err(err) => {
                report.secondary_error = Some(err);
                Vec::new()
            }
        };

        report.palette = merge(&primary, &samples, &self.classifier);
        report
    }
}
