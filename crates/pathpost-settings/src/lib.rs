//! pathpost Settings Crate
//!
//! Handles the settings file (generator defaults and machine profiles) and
//! loading of G-code configuration files.

pub mod config;
pub mod error;

pub use config::{
    load_gcode_config, ConfigFormat, GeneratorSettings, MachineProfile, Settings, APP_DIR,
    SETTINGS_FILE,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
