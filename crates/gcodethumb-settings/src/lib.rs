//! # gcodethumb Settings
//!
//! Thumbnail configuration: output size and the per-category color policy.
//! Stored as TOML or JSON, chosen by file extension.

pub mod config;
pub mod error;

pub use config::{ThumbnailConfig, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
pub use error::{SettingsError, SettingsResult};
