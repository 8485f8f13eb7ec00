//! Core application setup and configuration.

/// App construction: default plugins, board plugins, camera and lighting.
pub mod app_setup;

/// Board settings loaded from JSON with defaults.
pub mod settings;

pub mod window_config;
