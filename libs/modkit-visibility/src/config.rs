//! Configuration for visibility parameter handling.

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::VisibilityError;

/// Figment key under which the visibility settings live.
pub const CONFIG_KEY: &str = "visibility";

/// Prefix for environment overrides, e.g. `VISIBILITY_DELIMITER`.
pub const ENV_PREFIX: &str = "VISIBILITY_";

/// Keys read from the environment. Other `VISIBILITY_*` variables are ignored.
const ENV_KEYS: [&str; 3] = ["param", "delimiter", "max_entries"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisibilityConfig {
    /// Query parameter carrying visibility flags (`visibility[imported]=only`).
    pub param: String,
    /// Separator between flag and mode in `"imported|only"`.
    pub delimiter: String,
    /// Upper bound on entries taken from a single input. Extra entries are dropped.
    pub max_entries: usize,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            param: "visibility".to_owned(),
            delimiter: "|".to_owned(),
            max_entries: 64,
        }
    }
}

impl VisibilityConfig {
    /// Extract the `visibility` section of an existing figment.
    ///
    /// A missing section yields the defaults.
    ///
    /// # Errors
    /// Returns `VisibilityError::Config` if the section cannot be deserialized
    /// and `VisibilityError::InvalidConfig` if it fails validation.
    pub fn from_figment(figment: &Figment) -> Result<Self, VisibilityError> {
        let cfg: Self = figment.focus(CONFIG_KEY).extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from defaults, then an optional YAML file, then `VISIBILITY_PARAM`,
    /// `VISIBILITY_DELIMITER` and `VISIBILITY_MAX_ENTRIES`.
    ///
    /// # Errors
    /// Same as [`VisibilityConfig::from_figment`].
    pub fn load(yaml: Option<&Path>) -> Result<Self, VisibilityError> {
        let mut figment =
            Figment::new().merge(Serialized::defaults(Self::default()).key(CONFIG_KEY));
        if let Some(path) = yaml {
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).only(&ENV_KEYS).map(|k| {
            format!("{CONFIG_KEY}.{}", k.as_str().to_ascii_lowercase()).into()
        }));
        Self::from_figment(&figment)
    }

    /// # Errors
    /// Returns `VisibilityError::InvalidConfig` on an empty parameter name or delimiter.
    pub fn validate(&self) -> Result<(), VisibilityError> {
        if self.param.trim().is_empty() {
            return Err(VisibilityError::InvalidConfig("param must not be empty"));
        }
        if self.delimiter.is_empty() {
            return Err(VisibilityError::InvalidConfig("delimiter must not be empty"));
        }
        Ok(())
    }
}
