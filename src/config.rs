//! Generator configuration.
//!
//! Handles loading and validating `resgen.toml`. Every option has a
//! default, so a project with no config file gets a full generation run
//! over the current directory. The core modules consume the resolved
//! [`GeneratorConfig`] — they never read the CLI or the environment.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_path = "."            # Project root scanned for resources
//! output_dir = "."           # Where <class_name>.h / <class_name>.m land
//! class_name = "R"           # Name of the generated aggregate class
//! excluded = ["Pods", "Carthage"]  # Directory names / path prefixes to skip
//!
//! [templates]
//! # declaration = "templates/custom.h.template"  # override embedded template
//! # definition = "templates/custom.m.template"
//!
//! [resources]                # The resource kinds to generate
//! strings = true
//! images = true
//! storyboards = true
//! segues = true              # Segue accessors on storyboard classes
//! ```
//!
//! Config files are sparse — override just the values you want. Unknown
//! keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Name of the config file looked up in the base directory.
pub const CONFIG_FILENAME: &str = "resgen.toml";

/// Which resource kinds a run generates.
///
/// The selection travels as plain booleans — the original tool's option
/// bitmask with the bits named.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResourceSelection {
    pub strings: bool,
    pub images: bool,
    pub storyboards: bool,
    /// Segue accessors are part of the storyboard classes; disabling this
    /// drops them while keeping scene accessors.
    pub segues: bool,
}

impl Default for ResourceSelection {
    fn default() -> Self {
        Self {
            strings: true,
            images: true,
            storyboards: true,
            segues: true,
        }
    }
}

impl ResourceSelection {
    pub fn any_enabled(&self) -> bool {
        self.strings || self.images || self.storyboards
    }
}

/// Template override paths, relative to the base path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplatesConfig {
    pub declaration: Option<String>,
    pub definition: Option<String>,
}

/// Generator configuration loaded from `resgen.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Project root to scan for resources.
    pub base_path: String,
    /// Directory receiving the generated header and implementation.
    pub output_dir: String,
    /// Name of the generated aggregate class.
    pub class_name: String,
    /// Directory names or path prefixes excluded from the scan.
    pub excluded: Vec<String>,
    pub templates: TemplatesConfig,
    pub resources: ResourceSelection,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_path: ".".to_string(),
            output_dir: ".".to_string(),
            class_name: "R".to_string(),
            excluded: vec!["Pods".to_string(), "Carthage".to_string()],
            templates: TemplatesConfig::default(),
            resources: ResourceSelection::default(),
        }
    }
}

impl GeneratorConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_class_name(&self.class_name) {
            return Err(ConfigError::Validation(format!(
                "class_name {:?} is not a valid Objective-C class name",
                self.class_name
            )));
        }
        if self.output_dir.is_empty() {
            return Err(ConfigError::Validation(
                "output_dir must not be empty".into(),
            ));
        }
        if !self.resources.any_enabled() {
            return Err(ConfigError::Validation(
                "at least one resource kind must be enabled".into(),
            ));
        }
        Ok(())
    }
}

/// Load config from `resgen.toml` in `dir`, falling back to defaults when
/// the file doesn't exist. The result is validated either way.
pub fn load_config(dir: &Path) -> Result<GeneratorConfig, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    let config = if path.exists() {
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content)?
    } else {
        GeneratorConfig::default()
    };
    config.validate()?;
    Ok(config)
}

fn is_valid_class_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Stock `resgen.toml` with all options documented, for `gen-config`.
pub fn stock_config_toml() -> String {
    let stock = "\
# resgen configuration - all options are optional, defaults shown

base_path = \".\"            # Project root scanned for resources
output_dir = \".\"           # Where <class_name>.h / <class_name>.m land
class_name = \"R\"           # Name of the generated aggregate class
excluded = [\"Pods\", \"Carthage\"]  # Directory names / path prefixes to skip

[templates]
# declaration = \"templates/custom.h.template\"  # override embedded template
# definition = \"templates/custom.m.template\"

[resources]                # The resource kinds to generate
strings = true
images = true
storyboards = true
segues = true              # Segue accessors on storyboard classes
";
    stock.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_valid() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.class_name, "R");
        assert!(config.resources.strings);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.base_path, ".");
    }

    #[test]
    fn partial_config_overrides_only_named_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            "class_name = \"Res\"\n[resources]\nstoryboards = false\n",
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.class_name, "Res");
        assert!(!config.resources.storyboards);
        // Untouched values keep their defaults.
        assert!(config.resources.strings);
        assert_eq!(config.excluded, vec!["Pods", "Carthage"]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "clas_name = \"R\"\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn invalid_class_name_fails_validation() {
        let config = GeneratorConfig {
            class_name: "2R".to_string(),
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn all_kinds_disabled_fails_validation() {
        let config = GeneratorConfig {
            resources: ResourceSelection {
                strings: false,
                images: false,
                storyboards: false,
                segues: false,
            },
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn stock_config_parses_back_to_defaults() {
        let parsed: GeneratorConfig = toml::from_str(&stock_config_toml()).unwrap();
        assert_eq!(parsed.class_name, GeneratorConfig::default().class_name);
        assert_eq!(parsed.excluded, GeneratorConfig::default().excluded);
    }
}
