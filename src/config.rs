//! Runtime settings and their resolution from explicit values, a YAML config
//! file, and built-in defaults (in that order of precedence).

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "dist";
pub const CONFIG_FILENAME: &str = "flowcast.yaml";

/// How edges whose endpoints name undeclared nodes are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointPolicy {
    /// Dangling endpoints are accepted and take part in analysis as bare ids.
    #[default]
    Tolerate,
    /// Dangling endpoints abort the conversion with a validation error.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub output_dir: PathBuf,
    pub config_file: Option<PathBuf>,
    pub endpoint_policy: EndpointPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            config_file: None,
            endpoint_policy: EndpointPolicy::default(),
        }
    }
}

/// Explicit inputs for `Settings::from_sources`, typically CLI flags.
#[derive(Debug, Clone, Default)]
pub struct SettingsSources {
    pub output_dir: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    /// Directories probed for `flowcast.yaml` when no config file is given.
    pub search_paths: Vec<PathBuf>,
    pub strict_endpoints: Option<bool>,
}

// --- Config file layout ---

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    paths: PathsSection,
    #[serde(default)]
    analysis: AnalysisSection,
}

#[derive(Debug, Default, Deserialize)]
struct PathsSection {
    output_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct AnalysisSection {
    strict_endpoints: Option<bool>,
}

impl Settings {
    /// Builds settings with a deterministic precedence: explicit value, then
    /// config file, then default.
    pub fn from_sources(sources: SettingsSources) -> Result<Self, ConfigError> {
        let config_file = select_config_path(sources.config_file, &sources.search_paths);
        let file = match &config_file {
            Some(path) => load_config(path)?,
            None => ConfigFile::default(),
        };

        let output_dir = sources
            .output_dir
            .or(file.paths.output_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let strict = sources
            .strict_endpoints
            .or(file.analysis.strict_endpoints)
            .unwrap_or(false);

        Ok(Self {
            output_dir,
            config_file,
            endpoint_policy: if strict {
                EndpointPolicy::Strict
            } else {
                EndpointPolicy::Tolerate
            },
        })
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_endpoint_policy(mut self, policy: EndpointPolicy) -> Self {
        self.endpoint_policy = policy;
        self
    }

    /// Returns the absolute output directory without touching the filesystem.
    /// Relative directories resolve against `base`, or the current directory.
    pub fn resolve_output_dir(&self, base: Option<&Path>) -> PathBuf {
        if self.output_dir.is_absolute() {
            return self.output_dir.clone();
        }
        match base {
            Some(base) => base.join(&self.output_dir),
            None => std::path::absolute(&self.output_dir).unwrap_or_else(|_| self.output_dir.clone()),
        }
    }
}

fn select_config_path(explicit: Option<PathBuf>, search_paths: &[PathBuf]) -> Option<PathBuf> {
    explicit.or_else(|| {
        search_paths
            .iter()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    })
}

fn load_config(path: &Path) -> Result<ConfigFile, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let yaml_error = |source: serde_yaml::Error| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    };
    let value: serde_yaml::Value = serde_yaml::from_str(&text).map_err(yaml_error)?;
    match value {
        serde_yaml::Value::Null => Ok(ConfigFile::default()),
        serde_yaml::Value::Mapping(_) => serde_yaml::from_value(value).map_err(yaml_error),
        _ => Err(ConfigError::InvalidShape(path.to_path_buf())),
    }
}
