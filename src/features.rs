//! Feature switches
//!
//! Capabilities and policies that change how the store and codec behave.
//! They can be set in code with the `with_*` builders or loaded from the
//! `[features]` table of a TOML file.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Configuration options controlling store policy and codec output
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Features {
    /// Allow teeth to be disabled (excluded from new selections)
    pub disable_teeth: bool,

    /// Allow a tooth to take part in more than one elastic
    pub multiple_elastics_per_tooth: bool,

    /// Carry the mirror flag in the locator
    pub mirror_in_locator: bool,

    /// Color middle incisors and canines differently
    pub highlight_special_teeth: bool,

    /// Draw tooth icons next to the tooth numbers
    pub tooth_icons: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            disable_teeth: true,
            multiple_elastics_per_tooth: false,
            mirror_in_locator: true,
            highlight_special_teeth: true,
            tooth_icons: false,
        }
    }
}

#[derive(Deserialize)]
struct TomlFeatures {
    #[serde(default)]
    features: Features,
}

impl Features {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load features from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load features from a TOML string; missing keys keep their defaults
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlFeatures = toml::from_str(content)?;
        Ok(parsed.features)
    }

    pub fn with_disable_teeth(mut self, enabled: bool) -> Self {
        self.disable_teeth = enabled;
        self
    }

    pub fn with_multiple_elastics_per_tooth(mut self, enabled: bool) -> Self {
        self.multiple_elastics_per_tooth = enabled;
        self
    }

    pub fn with_mirror_in_locator(mut self, enabled: bool) -> Self {
        self.mirror_in_locator = enabled;
        self
    }

    pub fn with_highlight_special_teeth(mut self, enabled: bool) -> Self {
        self.highlight_special_teeth = enabled;
        self
    }

    pub fn with_tooth_icons(mut self, enabled: bool) -> Self {
        self.tooth_icons = enabled;
        self
    }
}
