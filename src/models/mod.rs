pub mod config;
pub mod image_source;

pub use config::{AnalysisConfig, AppConfig, CacheConfig, RolesConfig, SelectionConfig};
pub use image_source::{content_id, ImageSource};
