use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use swatch_theme::{
    Boosts, Category, CategoryToken, Classifier, ContrastNormalizer, DominantExtractor,
    NormalizerOptions, PalettePipeline, PreprocessOptions, QualityFilter, Rgb, Selector,
    Thresholds, VibrantExtractor, DEFAULT_COLOR,
};

use crate::error::ConfigError;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Preprocessing and extractor tuning
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Classifier band edges
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Readability filter used by best-color selection
    #[serde(default)]
    pub quality: QualityFilter,

    /// Contrast normalizer floors and boost steps
    #[serde(default)]
    pub normalizer: NormalizerOptions,

    /// Priority list and fallback color
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Resolver cache sizing
    #[serde(default)]
    pub cache: CacheConfig,

    /// Boosts applied when a request does not specify its own
    #[serde(default)]
    pub boosts: Boosts,

    /// Per-role color sources for themed entities
    #[serde(default)]
    pub roles: RolesConfig,

    /// Entity name to fixed color; bypasses image analysis entirely
    #[serde(default)]
    pub overrides: HashMap<String, Rgb>,
}

/// Preprocessing and extractor tuning
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Longer side of the analysis canvas
    pub max_dimension: u32,
    /// Use the small analysis canvas regardless of `max_dimension`
    pub fast: bool,
    /// Pixels below this alpha are ignored
    pub min_alpha: u8,
    /// Cluster pool size for the primary extractor
    pub pool_size: usize,
    /// Primary extractor samples every n-th pixel
    pub sample_stride: usize,
    /// Colors requested from the secondary extractor
    pub secondary_count: usize,
    /// Secondary extractor samples every n-th pixel
    pub secondary_stride: usize,
    /// Refuse to decode images with more pixels than this
    pub max_pixels: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_dimension: swatch_theme::preprocess::DEFAULT_MAX_DIMENSION,
            fast: false,
            min_alpha: 125,
            pool_size: 96,
            sample_stride: 8,
            secondary_count: swatch_theme::DEFAULT_SECONDARY_COUNT,
            secondary_stride: 10,
            max_pixels: 64 * 1024 * 1024,
        }
    }
}

/// Priority list and fallback color
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SelectionConfig {
    /// Categories tried in order by best-color selection
    pub priority: Vec<Category>,
    /// Color for images that yield no swatches; `null` disables it
    pub default_color: Option<Rgb>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            priority: Category::DEFAULT_PRIORITY.to_vec(),
            default_color: Some(DEFAULT_COLOR),
        }
    }
}

/// Resolver cache sizing
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum entries per cache
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 100 }
    }
}

/// Which category colors each text role of a themed entity.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RolesConfig {
    /// Quoted speech
    pub quotation: CategoryToken,
    /// Plain narration
    pub narration: CategoryToken,
    /// Emphasised text
    pub italic: CategoryToken,
    /// Strong text
    pub bold: CategoryToken,
    /// Color the entity's name with the quotation color
    pub color_name: bool,
}

impl Default for RolesConfig {
    fn default() -> Self {
        Self {
            quotation: CategoryToken::Category(Category::Vibrant),
            narration: CategoryToken::Disabled,
            italic: CategoryToken::Disabled,
            bold: CategoryToken::Disabled,
            color_name: false,
        }
    }
}

impl AppConfig {
    /// Load configuration, falling back to defaults on any problem.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::info!("No config file given, using defaults");
            return Self::default();
        };

        match Self::load_from_file(path) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    overrides = config.overrides.len(),
                    cache_capacity = config.cache.capacity,
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Read, parse and validate a config file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate YAML config text.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.thresholds.is_valid() {
            return Err(ConfigError::invalid(
                "thresholds",
                "values must be in 0..1 with dark <= light",
            ));
        }
        if !self.quality.is_valid() {
            return Err(ConfigError::invalid(
                "quality",
                "values must be in 0..1 with min_lightness < max_lightness",
            ));
        }
        if !self.normalizer.is_valid() {
            return Err(ConfigError::invalid(
                "normalizer",
                "floors and pivots must be in 0..1 with floor <= pivot",
            ));
        }
        if self.cache.capacity == 0 {
            return Err(ConfigError::invalid("cache.capacity", "must be at least 1"));
        }
        if self.analysis.max_dimension == 0 {
            return Err(ConfigError::invalid(
                "analysis.max_dimension",
                "must be at least 1",
            ));
        }
        if !(1..=256).contains(&self.analysis.pool_size) {
            return Err(ConfigError::invalid("analysis.pool_size", "must be 1-256"));
        }
        if self.analysis.secondary_count > 256 {
            return Err(ConfigError::invalid(
                "analysis.secondary_count",
                "must be at most 256",
            ));
        }
        if self.boosts.saturation > Boosts::MAX || self.boosts.lightness > Boosts::MAX {
            return Err(ConfigError::invalid("boosts", "values must be 0-10"));
        }
        Ok(())
    }

    /// Preprocessing options derived from the analysis section.
    pub fn preprocess_options(&self) -> PreprocessOptions {
        let base = if self.analysis.fast {
            PreprocessOptions::fast()
        } else {
            PreprocessOptions::new().max_dimension(self.analysis.max_dimension)
        };
        base.min_alpha(self.analysis.min_alpha)
    }

    /// Extraction pipeline with the built-in extractors.
    pub fn pipeline(&self) -> PalettePipeline {
        PalettePipeline::new()
            .preprocess(self.preprocess_options())
            .primary(VibrantExtractor::new(
                self.analysis.pool_size,
                self.analysis.sample_stride,
            ))
            .secondary(DominantExtractor::new(self.analysis.secondary_stride))
            .classifier(Classifier::new(self.thresholds))
            .secondary_count(self.analysis.secondary_count)
    }

    /// Selector for best-color and category-color requests.
    pub fn selector(&self) -> Selector {
        Selector::new()
            .priority(self.selection.priority.iter().copied())
            .quality(self.quality)
            .normalizer(ContrastNormalizer::new(self.normalizer))
            .default_color(self.selection.default_color)
    }

    /// Fixed color override for an entity, if configured.
    pub fn override_for(&self, entity: &str) -> Option<Rgb> {
        self.overrides.get(entity).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.cache.capacity, 100);
        assert_eq!(config.selection.default_color, Some(Rgb::new(225, 138, 36)));
        assert_eq!(
            config.roles.quotation,
            CategoryToken::Category(Category::Vibrant)
        );
        assert_eq!(config.roles.narration, CategoryToken::Disabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r##"
analysis:
  fast: true
  secondary_count: 8
thresholds:
  vibrancy: 0.5
selection:
  priority: [Muted, DarkVibrant]
  default_color: "#336699"
cache:
  capacity: 7
boosts:
  saturation: 2
  lightness: 3
roles:
  quotation: LightVibrant
  italic: Muted
  color_name: true
overrides:
  Alice: "#ff0000"
"##;
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert!(config.analysis.fast);
        assert_eq!(config.analysis.secondary_count, 8);
        assert_eq!(config.analysis.pool_size, 96);
        assert_eq!(config.thresholds.vibrancy, 0.5);
        assert_eq!(config.thresholds.dark, 0.40);
        assert_eq!(
            config.selection.priority,
            vec![Category::Muted, Category::DarkVibrant]
        );
        assert_eq!(config.selection.default_color, Some(Rgb::new(0x33, 0x66, 0x99)));
        assert_eq!(config.cache.capacity, 7);
        assert_eq!(config.boosts, Boosts::new(2, 3));
        assert_eq!(
            config.roles.quotation,
            CategoryToken::Category(Category::LightVibrant)
        );
        assert_eq!(config.roles.italic, CategoryToken::Category(Category::Muted));
        assert_eq!(config.roles.bold, CategoryToken::Disabled);
        assert!(config.roles.color_name);
        assert_eq!(config.override_for("Alice"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(config.override_for("Bob"), None);
        assert_eq!(config.preprocess_options().max_dimension, 256);
    }

    #[test]
    fn test_sample_config_matches_defaults() {
        let sample = AppConfig::from_yaml(include_str!("../../config.yaml")).unwrap();
        let defaults = AppConfig::default();
        assert_eq!(sample.thresholds, defaults.thresholds);
        assert_eq!(sample.quality, defaults.quality);
        assert_eq!(sample.normalizer, defaults.normalizer);
        assert_eq!(sample.selection.priority, defaults.selection.priority);
        assert_eq!(sample.selection.default_color, defaults.selection.default_color);
        assert_eq!(sample.roles, defaults.roles);
        assert_eq!(sample.boosts, defaults.boosts);
        assert_eq!(sample.analysis.max_pixels, defaults.analysis.max_pixels);
        assert!(sample.overrides.is_empty());
    }

    #[test]
    fn test_default_color_can_be_disabled() {
        let config = AppConfig::from_yaml("selection:\n  default_color: null\n").unwrap();
        assert_eq!(config.selection.default_color, None);
    }

    #[test]
    fn test_unknown_role_category_means_default() {
        let config = AppConfig::from_yaml("roles:\n  bold: Sparkly\n").unwrap();
        assert_eq!(config.roles.bold, CategoryToken::Category(Category::Vibrant));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(matches!(
            AppConfig::from_yaml("cache:\n  capacity: 0\n"),
            Err(ConfigError::Invalid { field: "cache.capacity", .. })
        ));
        assert!(matches!(
            AppConfig::from_yaml("thresholds:\n  dark: 0.9\n  light: 0.1\n"),
            Err(ConfigError::Invalid { field: "thresholds", .. })
        ));
        assert!(matches!(
            AppConfig::from_yaml("boosts:\n  saturation: 11\n"),
            Err(ConfigError::Invalid { field: "boosts", .. })
        ));
        assert!(matches!(
            AppConfig::from_yaml("analysis:\n  pool_size: 0\n"),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_bad_hex_is_a_parse_error() {
        assert!(matches!(
            AppConfig::from_yaml("overrides:\n  Alice: \"#zzzzzz\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        let config = AppConfig::load(Some(Path::new("/nonexistent/avatar-tint.yaml")));
        assert_eq!(config.cache.capacity, 100);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cache: [this is not a map").unwrap();
        let config = AppConfig::load(Some(file.path()));
        assert_eq!(config.cache.capacity, 100);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cache:\n  capacity: 3").unwrap();
        let config = AppConfig::load(Some(file.path()));
        assert_eq!(config.cache.capacity, 3);
    }
}
