//! Settings file handling
//!
//! A settings file holds generator defaults and a list of named machine
//! profiles. Profiles pick the head type and laser firmware of a machine so
//! the command line only has to name the profile.

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use pathpost_camtools::{GeneratorOptions, LaserFirmware, Validation};
use pathpost_core::{GcodeConfig, HeadType};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory name under the platform config directory
pub const APP_DIR: &str = "pathpost";

/// Default settings file name
pub const SETTINGS_FILE: &str = "settings.toml";

/// On-disk format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Detect the format from a path's extension
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    fn parse<T: DeserializeOwned>(self, content: &str) -> SettingsResult<T> {
        Ok(match self {
            Self::Json => serde_json::from_str(content)?,
            Self::Toml => toml::from_str(content)?,
        })
    }

    fn render<T: Serialize>(self, value: &T) -> SettingsResult<String> {
        Ok(match self {
            Self::Json => serde_json::to_string_pretty(value)?,
            Self::Toml => toml::to_string_pretty(value)?,
        })
    }
}

/// Generator defaults shared by every profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub validation: Validation,
    pub optimize: bool,
}

/// A named machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineProfile {
    pub name: String,
    pub head_type: HeadType,
    #[serde(default)]
    pub laser_firmware: LaserFirmware,
}

impl MachineProfile {
    pub fn new(name: impl Into<String>, head_type: impl Into<HeadType>) -> Self {
        Self {
            name: name.into(),
            head_type: head_type.into(),
            laser_firmware: LaserFirmware::default(),
        }
    }

    pub fn with_laser_firmware(mut self, firmware: LaserFirmware) -> Self {
        self.laser_firmware = firmware;
        self
    }
}

/// Complete settings file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Profile used when none is named
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    pub generator: GeneratorSettings,
    pub profiles: Vec<MachineProfile>,
}

impl Settings {
    /// Create new settings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/pathpost/settings.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let mut path = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".into())
        })?;
        path.push(APP_DIR);
        path.push(SETTINGS_FILE);
        Ok(path)
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let settings: Self = format.parse(&content)?;
        settings.validate()?;
        tracing::debug!(
            path = %path.display(),
            profiles = settings.profiles.len(),
            "Loaded settings"
        );
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = ConfigFormat::from_path(path)?.render(self)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    /// Validate settings
    pub fn validate(&self) -> SettingsResult<()> {
        for (index, profile) in self.profiles.iter().enumerate() {
            if profile.name.trim().is_empty() {
                return Err(ConfigError::UnnamedProfile(index).into());
            }
            if !profile.head_type.is_supported() {
                return Err(ConfigError::UnsupportedHead {
                    profile: profile.name.clone(),
                    head_type: profile.head_type.as_str().to_string(),
                }
                .into());
            }
            if self.profiles[..index].iter().any(|p| p.name == profile.name) {
                return Err(ConfigError::DuplicateProfile(profile.name.clone()).into());
            }
        }

        if let Some(name) = &self.default_profile {
            if self.profile(name).is_none() {
                return Err(SettingsError::InvalidSetting {
                    key: "default_profile".to_string(),
                    reason: format!("no profile named '{}'", name),
                });
            }
        }
        Ok(())
    }

    /// Look up a profile by name
    pub fn profile(&self, name: &str) -> Option<&MachineProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// The named profile, else the default profile, else none
    pub fn active_profile(&self, name: Option<&str>) -> ConfigResult<Option<&MachineProfile>> {
        match name.or(self.default_profile.as_deref()) {
            Some(name) => self
                .profile(name)
                .map(Some)
                .ok_or_else(|| ConfigError::UnknownProfile(name.to_string())),
            None => Ok(None),
        }
    }

    /// Generator options for a profile
    pub fn generator_options(&self, profile: Option<&str>) -> ConfigResult<GeneratorOptions> {
        let laser_firmware = self
            .active_profile(profile)?
            .map(|p| p.laser_firmware)
            .unwrap_or_default();
        Ok(GeneratorOptions {
            laser_firmware,
            validation: self.generator.validation,
            optimize: self.generator.optimize,
        })
    }
}

/// Load a G-code configuration (JSON or TOML)
pub fn load_gcode_config(path: &Path) -> SettingsResult<GcodeConfig> {
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;
    let config: GcodeConfig = format.parse(&content)?;
    tracing::debug!(path = %path.display(), params = config.len(), "Loaded G-code config");
    Ok(config)
}
