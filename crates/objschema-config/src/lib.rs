//! Normalization settings, loaded from TOML.
//!
//! ```toml
//! [schema]
//! allow_property_arrays = false
//! ```

use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// NormalizeConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizeConfig {
    pub schema: SchemaConfig,
}

impl NormalizeConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str(content)?;

        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    /// Strict settings with the deprecated array-of-properties shape enabled.
    #[must_use]
    pub const fn with_property_arrays() -> Self {
        Self {
            schema: SchemaConfig {
                allow_property_arrays: true,
            },
        }
    }

    #[must_use]
    pub const fn allow_property_arrays(&self) -> bool {
        self.schema.allow_property_arrays
    }
}

///
/// SchemaConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaConfig {
    /// Accept object schemas that declare `properties` as an array of
    /// named property objects. Deprecated.
    pub allow_property_arrays: bool,
}
