use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Conversion settings, loaded from `conf.json` (or a YAML file).
///
/// Keys are PascalCase as in the classic `conf.json` layout; camelCase
/// spellings are accepted too.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Configuration {
    /// Name of the error diffusion algorithm
    #[serde(default = "default_algorithm", alias = "algorithm")]
    pub algorithm: String,

    /// Tiles the image may be quantized to, by config name. Empty means
    /// "leave colors alone".
    #[serde(default, alias = "included")]
    pub included: Vec<String>,

    /// Dithering strength (kernel weight multiplier). Left out, no error
    /// is diffused and every pixel snaps to its nearest tile color.
    #[serde(default = "default_strength", alias = "strength")]
    pub strength: f32,

    /// Alternate scan direction per row while dithering
    #[serde(default, alias = "serpentine")]
    pub serpentine: bool,

    /// Keep pixels that already carry an included tile color
    #[serde(default, alias = "preserveExact")]
    pub preserve_exact: bool,

    /// Overrides the map name shown in game
    #[serde(default, alias = "mapName")]
    pub map_name: Option<String>,

    /// Overrides the (empty) map description
    #[serde(default, alias = "description")]
    pub description: Option<String>,
}

fn default_algorithm() -> String {
    "SierraLite".to_string()
}

fn default_strength() -> f32 {
    0.0
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            included: Vec::new(),
            strength: default_strength(),
            serpentine: false,
            preserve_exact: false,
            map_name: None,
            description: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Configuration {
    /// Load from a file. `.yaml`/`.yml` files are parsed as YAML, anything
    /// else as JSON.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let config = if is_yaml {
            Self::from_yaml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };

        tracing::info!(
            path = %path.display(),
            algorithm = %config.algorithm,
            included = config.included.len(),
            strength = config.strength,
            "Loaded configuration"
        );

        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classic_conf_json() {
        let json = r#"{
            "Algorithm": "FloydSteinberg",
            "Included": ["deep_ocean", "sand", "grass_low"],
            "Strength": 0.75
        }"#;
        let config = Configuration::from_json_str(json).unwrap();
        assert_eq!(config.algorithm, "FloydSteinberg");
        assert_eq!(config.included, vec!["deep_ocean", "sand", "grass_low"]);
        assert_eq!(config.strength, 0.75);
        assert!(!config.serpentine);
        assert_eq!(config.map_name, None);
    }

    #[test]
    fn test_camel_case_keys() {
        let json = r#"{"algorithm": "Atkinson", "included": [], "strength": 1, "mapName": "Isles"}"#;
        let config = Configuration::from_json_str(json).unwrap();
        assert_eq!(config.algorithm, "Atkinson");
        assert_eq!(config.strength, 1.0);
        assert_eq!(config.map_name.as_deref(), Some("Isles"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = Configuration::from_json_str("{}").unwrap();
        assert_eq!(config, Configuration::default());
        assert_eq!(config.algorithm, "SierraLite");
        assert_eq!(config.strength, 0.0);
    }

    #[test]
    fn test_strength_is_not_implied_by_algorithm() {
        let config = Configuration::from_json_str(r#"{"Algorithm": "Atkinson"}"#).unwrap();
        assert_eq!(config.strength, 0.0);
        assert_eq!(config.algorithm, "Atkinson");
    }

    #[test]
    fn test_yaml() {
        let yaml = "Algorithm: Sierra2\nIncluded:\n  - hills\n  - mountains\nSerpentine: true\n";
        let config = Configuration::from_yaml_str(yaml).unwrap();
        assert_eq!(config.algorithm, "Sierra2");
        assert_eq!(config.included, vec!["hills", "mountains"]);
        assert!(config.serpentine);
    }

    #[test]
    fn test_invalid_json() {
        let err = Configuration::from_json_str(r#"{"Included": "sand"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().starts_with("Invalid JSON configuration"));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("conf.json");
        std::fs::write(&json_path, r#"{"Strength": 0.5}"#).unwrap();
        assert_eq!(Configuration::load(&json_path).unwrap().strength, 0.5);

        let yaml_path = dir.path().join("conf.yml");
        std::fs::write(&yaml_path, "Strength: 0.25\n").unwrap();
        assert_eq!(Configuration::load(&yaml_path).unwrap().strength, 0.25);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Configuration::load(Path::new("/nonexistent/conf.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/conf.json"));
    }
}
