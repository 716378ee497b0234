//! Editor configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::default_store_path;
use crate::editor::PlotGeometry;

/// Settings for an editing session and its export store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Plot width in pixels (drag and marker mapping)
    /// Default: 800
    pub plot_width: f64,

    /// Plot height in pixels
    /// Default: 380
    pub plot_height: f64,

    /// Product name in the export header
    pub product_name: String,

    /// Export store root; `~/.webeq/exports` when unset
    pub store_dir: Option<PathBuf>,

    /// Persisted anonymous user id
    pub user_id: Option<String>,

    /// Start new sessions with the LP/Peak/HP starter filters
    pub seed_default_filters: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            plot_width: 800.0,
            plot_height: 380.0,
            product_name: "WebEQ".to_string(),
            store_dir: None,
            user_id: None,
            seed_default_filters: true,
        }
    }
}

impl EditorConfig {
    pub fn plot_geometry(&self) -> PlotGeometry {
        PlotGeometry::new(self.plot_width, self.plot_height)
    }

    pub fn resolved_store_dir(&self) -> PathBuf {
        self.store_dir.clone().unwrap_or_else(default_store_path)
    }
}
