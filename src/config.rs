/// Application configuration
///
/// Defaults reproduce the prototype's built-in values. A JSON file named by
/// the `ANNOTATOR_CONFIG` environment variable can override any subset of
/// fields; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::gui::theme::AppTheme;

/// Environment variable pointing at an optional JSON config file
pub const CONFIG_ENV_VAR: &str = "ANNOTATOR_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Initial window size in points
    pub window_size: [f32; 2],
    /// Minimum size of the image frame; also the target size for loaded images
    pub frame_min_size: [f32; 2],

    pub default_threshold: u8,
    pub default_clusters: u8,
    pub default_brush_size: u8,

    /// Sleep after each load progress step
    pub load_step_delay_ms: u64,
    /// Sleep after each analysis progress step
    pub analysis_step_delay_ms: u64,

    pub zoom_in_factor: f32,
    pub zoom_out_factor: f32,

    /// Maximum number of history snapshots, 0 = unlimited
    pub max_history: usize,

    pub theme: AppTheme,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_size: [1000.0, 800.0],
            frame_min_size: [600.0, 500.0],
            default_threshold: 50,
            default_clusters: 3,
            default_brush_size: 5,
            load_step_delay_ms: 50,
            analysis_step_delay_ms: 100,
            zoom_in_factor: 1.2,
            zoom_out_factor: 0.8,
            max_history: 0,
            theme: AppTheme::Light,
        }
    }
}

impl AppConfig {
    /// Parse a config from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: AppConfig = serde_json::from_str(json)?;
        config.sanitize();
        Ok(config)
    }

    /// Load from a file, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring malformed config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Resolve the config from `ANNOTATOR_CONFIG`, or defaults when unset
    pub fn from_env() -> Self {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load_or_default(Path::new(&path)),
            None => Self::default(),
        }
    }

    /// Clamp user-provided values into the ranges the controls accept
    fn sanitize(&mut self) {
        self.default_threshold = self.default_threshold.min(100);
        self.default_clusters = self.default_clusters.clamp(2, 10);
        self.default_brush_size = self.default_brush_size.clamp(1, 30);
        if self.zoom_in_factor.is_nan() || self.zoom_in_factor <= 1.0 {
            self.zoom_in_factor = 1.2;
        }
        if self.zoom_out_factor.is_nan() || self.zoom_out_factor <= 0.0 || self.zoom_out_factor >= 1.0 {
            self.zoom_out_factor = 0.8;
        }
    }
}
