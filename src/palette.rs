//! Elastic type palette
//!
//! Every elastic carries a numeric type id. The palette maps those ids to a
//! display name, stroke color, stroke thickness and icon. A built-in palette
//! is always available; a TOML file can replace it.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Numeric palette id stored in elastics and in the locator
pub type ElasticTypeId = u32;

/// One entry of the palette
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElasticType {
    pub id: ElasticTypeId,
    pub name: String,
    pub color: String,
    pub thickness: f64,
    #[serde(default)]
    pub icon: String,
}

/// An ordered, non-empty list of elastic types
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Optional name for the palette
    pub name: Option<String>,
    types: Vec<ElasticType>,
}

/// TOML structure for deserializing palettes
#[derive(Deserialize)]
struct TomlPalette {
    metadata: Option<TomlMetadata>,
    types: Vec<ElasticType>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

/// Default palette, light to extra heavy pull
const DEFAULT_PALETTE: &str = r##"
[metadata]
name = "default"

[[types]]
id = 1
name = "Light"
color = "#facc15"
thickness = 2
icon = "🟡"

[[types]]
id = 2
name = "Medium"
color = "#f97316"
thickness = 3
icon = "🟠"

[[types]]
id = 3
name = "Heavy"
color = "#ef4444"
thickness = 4
icon = "🔴"

[[types]]
id = 4
name = "Extra heavy"
color = "#a855f7"
thickness = 5
icon = "🟣"
"##;

impl Palette {
    /// Load a palette from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a palette from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlPalette = toml::from_str(content)?;
        Self::new(parsed.metadata.and_then(|m| m.name), parsed.types)
    }

    /// Build a palette, rejecting empty lists and repeated ids
    pub fn new(name: Option<String>, types: Vec<ElasticType>) -> Result<Self, ConfigError> {
        if types.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        for (i, ty) in types.iter().enumerate() {
            if types[..i].iter().any(|other| other.id == ty.id) {
                return Err(ConfigError::DuplicateType(ty.id));
            }
        }
        Ok(Self { name, types })
    }

    /// The fallback type used for legacy or unresolved entries
    pub fn first(&self) -> &ElasticType {
        &self.types[0]
    }

    pub fn types(&self) -> &[ElasticType] {
        &self.types
    }

    pub fn get(&self, id: ElasticTypeId) -> Option<&ElasticType> {
        self.types.iter().find(|ty| ty.id == id)
    }

    pub fn contains(&self, id: ElasticTypeId) -> bool {
        self.get(id).is_some()
    }

    /// Look up a type, falling back to the first entry
    pub fn get_or_first(&self, id: ElasticTypeId) -> &ElasticType {
        self.get(id).unwrap_or_else(|| self.first())
    }

    /// Resolve a display name (case-insensitive) to its id
    pub fn resolve_name(&self, name: &str) -> Option<ElasticTypeId> {
        let name = name.trim();
        self.types
            .iter()
            .find(|ty| ty.name.eq_ignore_ascii_case(name))
            .map(|ty| ty.id)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_str(DEFAULT_PALETTE).expect("Default palette should be valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.types().len(), 4);
        assert_eq!(palette.first().id, 1);
        assert_eq!(palette.get(3).map(|t| t.thickness), Some(4.0));
        assert_eq!(palette.name.as_deref(), Some("default"));
    }

    #[test]
    fn test_resolve_name_ignores_case() {
        let palette = Palette::default();
        assert_eq!(palette.resolve_name("medium"), Some(2));
        assert_eq!(palette.resolve_name(" Extra Heavy "), Some(4));
        assert_eq!(palette.resolve_name("Rubber"), None);
    }

    #[test]
    fn test_get_or_first_fallback() {
        let palette = Palette::default();
        assert_eq!(palette.get_or_first(42).id, 1);
        assert_eq!(palette.get_or_first(2).id, 2);
    }

    #[test]
    fn test_parse_custom_palette() {
        let toml_str = r##"
[[types]]
id = 7
name = "Class II"
color = "#000000"
thickness = 1.5
"##;
        let palette = Palette::from_str(toml_str).expect("Should parse");
        assert_eq!(palette.name, None);
        assert_eq!(palette.first().id, 7);
        assert_eq!(palette.first().icon, "");
    }

    #[test]
    fn test_empty_palette_rejected() {
        let result = Palette::from_str("types = []");
        assert!(matches!(result, Err(ConfigError::EmptyPalette)));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let toml_str = r##"
[[types]]
id = 1
name = "A"
color = "#000"
thickness = 1

[[types]]
id = 1
name = "B"
color = "#fff"
thickness = 2
"##;
        assert!(matches!(
            Palette::from_str(toml_str),
            Err(ConfigError::DuplicateType(1))
        ));
    }

    #[test]
    fn test_invalid_toml_error() {
        assert!(Palette::from_str("this is not valid toml {{{{").is_err());
    }
}
