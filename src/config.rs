//! Query configuration.
//!
//! Settings are read from TOML and may be overlaid by environment variables:
//! - `ROSQUERY_CASE_MODE` (`kebab` | `snake`)
//! - `ROSQUERY_STRICT` (`1` | `true` | `yes` enables local expression validation)

use crate::errors::{QueryError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

pub const ENV_CASE_MODE: &str = "ROSQUERY_CASE_MODE";
pub const ENV_STRICT: &str = "ROSQUERY_STRICT";

/// Naming convention applied to attribute names by the row wrapper.
///
/// The device speaks kebab-case (`mac-address`); `Snake` renames keys to
/// `mac_address` when rows are wrapped into items. Tokens sent to the device are
/// never rewritten.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    #[default]
    Kebab,
    Snake,
}

impl CaseMode {
    pub fn field_name(self, key: &str) -> String {
        match self {
            Self::Kebab => key.to_string(),
            Self::Snake => key.replace('-', "_"),
        }
    }
}

impl FromStr for CaseMode {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kebab" | "dash" => Ok(Self::Kebab),
            "snake" | "snake_case" => Ok(Self::Snake),
            other => Err(QueryError::Config(format!("unknown case mode: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub case_mode: CaseMode,
    /// Check operator/operand balance of the filter stack before sending.
    pub strict_expressions: bool,
}

impl QueryConfig {
    /// # Errors
    /// Returns an error if the string is not valid TOML for this structure.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .map_err(|e| QueryError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&s)
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    pub fn with_env(self) -> Self {
        self.with_vars(|k| std::env::var(k).ok())
    }

    /// Overlay settings from an arbitrary variable lookup. Unparseable values are
    /// logged and ignored.
    pub fn with_vars<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(s) = lookup(ENV_CASE_MODE) {
            match s.parse::<CaseMode>() {
                Ok(mode) => self.case_mode = mode,
                Err(e) => log::warn!("ignoring {ENV_CASE_MODE}: {e}"),
            }
        }
        if let Some(s) = lookup(ENV_STRICT) {
            self.strict_expressions = matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        self
    }
}
