//! Run configuration.
//!
//! Describes which transform to run and where the images live. Loading and
//! decoding the images is left to the caller; the paths are only carried.
//!
//! Example TOML:
//!
//! ```toml
//! method = "specification"
//! source_path = "input.jpg"
//! reference_path = "reference.jpg"
//! require_matching_shape = false
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::error::{config_error, HistogramError, Result};

/// Histogram transform to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Equalization,
    Specification,
}

impl FromStr for Method {
    type Err = HistogramError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "equalization" => Ok(Method::Equalization),
            "specification" => Ok(Method::Specification),
            _ => Err(HistogramError::UnknownMethod(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Equalization => write!(f, "equalization"),
            Method::Specification => write!(f, "specification"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistogramConfig {
    pub method: Method,
    pub source_path: PathBuf,
    /// Required for specification, ignored for equalization.
    #[serde(default)]
    pub reference_path: Option<PathBuf>,
    /// Reject references whose height/width differ from the source.
    #[serde(default)]
    pub require_matching_shape: bool,
}

impl HistogramConfig {
    pub fn equalization(source_path: impl Into<PathBuf>) -> Self {
        Self {
            method: Method::Equalization,
            source_path: source_path.into(),
            reference_path: None,
            require_matching_shape: false,
        }
    }

    pub fn specification(
        source_path: impl Into<PathBuf>,
        reference_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            method: Method::Specification,
            source_path: source_path.into(),
            reference_path: Some(reference_path.into()),
            require_matching_shape: false,
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: HistogramConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), method = %config.method, "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.source_path.as_os_str().is_empty() {
            return Err(config_error("source_path is empty"));
        }
        if self.method == Method::Specification && self.reference_path.is_none() {
            return Err(config_error("specification requires reference_path"));
        }
        Ok(())
    }
}
