//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/ordtree/ordtree.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `ORDTREE_*` prefix, `__` between nested keys
//!    (e.g. `ORDTREE_BENCH__LOOKUPS=500`)

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Lookup routine used on the random and balanced trees.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LookupStrategy {
    /// `find`: recursive descent
    #[default]
    Recursive,
    /// `find_iterative`: loop, constant stack
    Iterative,
}

/// How `show` prints a tree.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Rotated 90 degrees, right subtree on top
    #[default]
    Rotated,
    /// Box-drawing tree, root on top
    Tree,
}

/// Benchmark configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BenchSettings {
    /// Number of probe words looked up per scenario
    pub lookups: usize,
    /// Shuffle seed; random when unset
    pub seed: Option<u64>,
    /// Lowercase words before building the alphabetical tree
    pub lowercase: bool,
    /// Lookup routine for the random and balanced trees
    pub strategy: LookupStrategy,
}

impl Default for BenchSettings {
    fn default() -> Self {
        Self {
            lookups: 10_000,
            seed: None,
            lowercase: true,
            strategy: LookupStrategy::default(),
        }
    }
}

/// Unified configuration for ordtree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub bench: BenchSettings,
    /// Default style for `show`
    pub render: RenderStyle,
}

/// Get the XDG config directory for ordtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ordtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("ordtree.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist when given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let defaults = Config::try_from(&Settings::default()).map_err(config_err)?;
        let mut builder = Config::builder().add_source(defaults);

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(path) = config_file {
            if !path.is_file() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("ORDTREE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# ordtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/ordtree/ordtree.toml
#   Explicit: --config <FILE>
#   Env:      ORDTREE_* environment variables, e.g. ORDTREE_BENCH__LOOKUPS=500

# Default style for `ordtree show`: "rotated" or "tree"
# render = "rotated"

[bench]
# Probe words looked up in every scenario
# lookups = 10000

# Fixed shuffle seed for reproducible runs
# seed = 42

# Lowercase words before building the alphabetical tree
# lowercase = true

# Lookup on the random and balanced trees: "recursive" or "iterative"
# strategy = "recursive"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_bench_settings_when_created_then_has_expected_values() {
        let bench = BenchSettings::default();
        assert_eq!(bench.lookups, 10_000);
        assert_eq!(bench.seed, None);
        assert!(bench.lowercase);
        assert_eq!(bench.strategy, LookupStrategy::Recursive);
    }

    #[test]
    fn given_settings_when_serialized_then_round_trips_through_toml() {
        let settings = Settings {
            bench: BenchSettings {
                lookups: 7,
                seed: Some(3),
                lowercase: false,
                strategy: LookupStrategy::Iterative,
            },
            render: RenderStyle::Tree,
        };
        let text = settings.to_toml().expect("serialize");
        assert!(text.contains("strategy = \"iterative\""), "{text}");
        let parsed: Settings = toml::from_str(&text).expect("parse");
        assert_eq!(parsed, settings);
    }

    #[test]
    fn given_template_when_parsed_then_yields_defaults() {
        let parsed: Settings = toml::from_str(&Settings::template()).expect("template parses");
        assert_eq!(parsed, Settings::default());
    }
}
