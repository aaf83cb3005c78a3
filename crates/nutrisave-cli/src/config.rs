use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use nutrisave_generate::{DEFAULT_OUTPUT, DEFAULT_PER_STORE, default_stores};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
}

/// Generation settings read from a TOML file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub output: Option<PathBuf>,
    pub per_store: Option<i64>,
    pub seed: Option<u64>,
    pub stores: Option<Vec<String>>,
    pub reference: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

impl GeneratorConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Layer `overrides` on top of `self`; values set in `overrides` win.
    pub fn merge(self, overrides: GeneratorConfig) -> GeneratorConfig {
        GeneratorConfig {
            output: overrides.output.or(self.output),
            per_store: overrides.per_store.or(self.per_store),
            seed: overrides.seed.or(self.seed),
            stores: overrides.stores.or(self.stores),
            reference: overrides.reference.or(self.reference),
            report: overrides.report.or(self.report),
        }
    }

    pub fn output_or_default(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    pub fn per_store_or_default(&self) -> i64 {
        self.per_store.unwrap_or(DEFAULT_PER_STORE as i64)
    }

    pub fn stores_or_default(&self) -> Vec<String> {
        self.stores.clone().unwrap_or_else(default_stores)
    }
}

pub fn load_config(path: &Path) -> Result<GeneratorConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    GeneratorConfig::from_toml(&content)
}
