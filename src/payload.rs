use std::path::Path;

use serde::Deserialize;

use crate::error::OrasqlError;

/// Structured encoding of a payload file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    Json,
    Yaml,
}

/// Connection credentials and query bundled in one file.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Payload {
    #[serde(default)]
    pub db: Option<String>,
    pub dsn: String,
    pub user: String,
    #[serde(alias = "password")]
    pub pwd: String,
    pub query: String,
}

impl Payload {
    pub fn parse(content: &str, format: PayloadFormat) -> Result<Self, OrasqlError> {
        match format {
            PayloadFormat::Json => serde_json::from_str(content).map_err(|e| OrasqlError::Config {
                message: format!("invalid json payload: {e}"),
            }),
            PayloadFormat::Yaml => serde_yaml::from_str(content).map_err(|e| OrasqlError::Config {
                message: format!("invalid yaml payload: {e}"),
            }),
        }
    }

    pub fn load(path: &Path, format: PayloadFormat) -> Result<Self, OrasqlError> {
        let content = std::fs::read_to_string(path).map_err(|e| OrasqlError::Config {
            message: format!("cannot read payload file {}: {}", path.display(), e),
        })?;
        Self::parse(&content, format)
    }
}
