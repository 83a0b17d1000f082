//! Parser configuration
//!
//! Every field has a default, so `{}` is a valid configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::extractors::FieldTable;
use crate::logging::LoggingConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Field name -> ordered candidate locators
    #[serde(default)]
    pub fields: FieldTable,
    /// Size variant requested for product images
    #[serde(default = "default_image_variant")]
    pub image_variant: String,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_image_variant() -> String {
    "_AC_SL1500_".to_string()
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            fields: FieldTable::default(),
            image_variant: default_image_variant(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ParserConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
