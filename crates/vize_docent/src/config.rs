//! Configuration file loading for docent.
//!
//! Reads `docent.config.json` from a project directory. The file provides
//! plugin bindings and per-component prop defaults and choices, which are
//! installed as the default and enumeration hooks of [`GenerateOptions`].

use crate::generate::GenerateOptions;
use crate::palette::Enumeration;
use crate::types::PropContext;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "docent.config.json";

/// Top-level docent configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocentConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Extra bindings merged into every template-style story.
    #[serde(default)]
    pub plugins: Map<String, Value>,

    /// Prop defaults, keyed by component name then prop name.
    #[serde(default)]
    pub defaults: FxHashMap<String, FxHashMap<String, Value>>,

    /// Prop choices, keyed by component name then prop name.
    #[serde(default)]
    pub enums: FxHashMap<String, FxHashMap<String, Enumeration>>,
}

impl DocentConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Configured default of a prop.
    pub fn default_for(&self, component: &str, prop: &str) -> Option<&Value> {
        self.defaults.get(component)?.get(prop)
    }

    /// Configured choices of a prop.
    pub fn enum_for(&self, component: &str, prop: &str) -> Option<&Enumeration> {
        self.enums.get(component)?.get(prop)
    }

    /// Install plugins and hooks on generation options.
    ///
    /// Configured plugins are added on top of the ones already set.
    pub fn apply(self, mut options: GenerateOptions<'_>) -> GenerateOptions<'_> {
        let config = Rc::new(self);

        for (key, value) in &config.plugins {
            options.plugins.insert(key.clone(), value.clone());
        }

        let defaults = Rc::clone(&config);
        options.define_default = Box::new(move |context: &PropContext<'_>| {
            defaults
                .default_for(&context.component.name, context.prop_name)
                .cloned()
        });

        let enums = config;
        options.define_enum = Box::new(move |context: &PropContext<'_>| {
            enums
                .enum_for(&context.component.name, context.prop_name)
                .cloned()
        });

        options
    }
}

/// Failure to read or parse a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl DocentConfig {
    /// Read a configuration file. `Ok(None)` when the file does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::from_json(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Load [`CONFIG_FILE_NAME`] from `dir`, or from the working directory.
///
/// Never fails: a missing file yields the default configuration, and an
/// unreadable or malformed one is logged before falling back to it.
pub fn load_config(dir: Option<&Path>) -> DocentConfig {
    let path = match dir {
        Some(dir) => dir.join(CONFIG_FILE_NAME),
        None => PathBuf::from(CONFIG_FILE_NAME),
    };

    DocentConfig::read(&path)
        .unwrap_or_else(|err| {
            tracing::warn!("{}", err);
            None
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE: &str = r#"{
        "plugins": { "i18n": { "locale": "en" } },
        "defaults": { "Button": { "label": "Press" } },
        "enums": { "Button": { "size": { "Small": "sm", "Large": "lg" } } }
    }"#;

    #[test]
    fn test_parse_config() {
        let config = DocentConfig::from_json(SAMPLE).unwrap();

        assert_eq!(config.plugins["i18n"], json!({ "locale": "en" }));
        assert_eq!(config.default_for("Button", "label"), Some(&json!("Press")));
        assert!(config.default_for("Button", "size").is_none());
        assert!(config.default_for("Card", "label").is_none());

        let sizes = config.enum_for("Button", "size").unwrap();
        assert_eq!(sizes.keys().collect::<Vec<_>>(), vec!["Small", "Large"]);
    }

    #[test]
    fn test_empty_config() {
        let config = DocentConfig::from_json("{}").unwrap();
        assert!(config.plugins.is_empty());
        assert!(config.defaults.is_empty());
        assert!(config.enums.is_empty());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = std::env::temp_dir().join("vize_docent_config_missing");
        let config = load_config(Some(&dir));
        assert!(config.schema.is_none());
        assert!(config.plugins.is_empty());

        assert!(DocentConfig::read(&dir.join(CONFIG_FILE_NAME))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_directory_is_unreadable() {
        let dir = std::env::temp_dir().join(format!("vize_docent_config_dir_{}", std::process::id()));
        std::fs::create_dir_all(dir.join(CONFIG_FILE_NAME)).unwrap();

        let err = DocentConfig::read(&dir.join(CONFIG_FILE_NAME)).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(load_config(Some(&dir)).plugins.is_empty());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_from_directory() {
        let dir = std::env::temp_dir().join(format!("vize_docent_config_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(CONFIG_FILE_NAME), SAMPLE).unwrap();

        let config = load_config(Some(&dir));
        assert_eq!(config.default_for("Button", "label"), Some(&json!("Press")));

        std::fs::write(dir.join(CONFIG_FILE_NAME), "{ not json").unwrap();
        let config = load_config(Some(&dir));
        assert!(config.defaults.is_empty());

        let err = DocentConfig::read(&dir.join(CONFIG_FILE_NAME)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("Failed to parse"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
