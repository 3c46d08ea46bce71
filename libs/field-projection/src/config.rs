use std::{fmt, fs, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unsupported projection type: {0}")]
    UnsupportedProjectionType(String),

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Settings parse error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

/// How a document half is projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionType {
    #[default]
    None,
    Whitelist,
}

impl ProjectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectionType::None => "none",
            ProjectionType::Whitelist => "whitelist",
        }
    }
}

impl fmt::Display for ProjectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectionType {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(ProjectionType::None),
            "whitelist" => Ok(ProjectionType::Whitelist),
            other => Err(ConfigError::UnsupportedProjectionType(other.to_string())),
        }
    }
}

/// Projection settings for the key and value halves of a sink document.
///
/// Field lists are comma separated; see
/// [`WhitelistSet::from_field_list`](crate::WhitelistSet::from_field_list).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSettings {
    pub key_projection_type: ProjectionType,
    pub key_projection_list: String,
    pub value_projection_type: ProjectionType,
    pub value_projection_list: String,
}

impl ProjectionSettings {
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let settings: ProjectionSettings = serde_json::from_str(&contents)?;

        info!(
            path = %path.display(),
            key_projection = %settings.key_projection_type,
            value_projection = %settings.value_projection_type,
            "Projection settings loaded"
        );

        Ok(settings)
    }
}
