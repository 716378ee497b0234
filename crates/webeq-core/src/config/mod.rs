//! Configuration for WebEQ
//!
//! - Generic YAML config loading/saving
//! - Data, config and export store paths
//! - Editor settings
//!
//! # Usage
//!
//! ```ignore
//! use webeq_core::config::{default_config_path, load_config, save_config, EditorConfig};
//!
//! let path = default_config_path();
//! let mut config: EditorConfig = load_config(&path);
//! config.user_id = Some(user_id);
//! save_config(&config, &path)?;
//! ```

mod editor_config;
mod io;
mod paths;

pub use editor_config::EditorConfig;
pub use io::{load_config, save_config};
pub use paths::{default_config_path, default_data_path, default_store_path};
