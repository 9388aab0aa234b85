//! Concrete [`ConfigSource`](super::ConfigSource) implementations.
//!
//! Provides the environment-variable source and the file source, whose
//! document formats (YAML, JSON, TOML) are gated by feature flags and
//! parsed through [`FileFormat`].

pub mod env;
pub mod file_source;

use std::path::Path;

use super::model::RawConfig;
use super::ConfigSource;
use crate::error::ConfigError;
use file_source::FileSource;

/// A structured document format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    #[cfg(feature = "yaml")]
    Yaml,
    #[cfg(feature = "json")]
    Json,
    #[cfg(feature = "toml")]
    Toml,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Result<Self, ConfigError> {
        match ext {
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Ok(Self::Yaml),
            #[cfg(feature = "json")]
            "json" => Ok(Self::Json),
            #[cfg(feature = "toml")]
            "toml" => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            #[cfg(feature = "yaml")]
            Self::Yaml => "yaml",
            #[cfg(feature = "json")]
            Self::Json => "json",
            #[cfg(feature = "toml")]
            Self::Toml => "toml",
        }
    }

    /// Deserialize `content`; `origin` names the document in parse errors.
    pub fn parse(self, content: &str, origin: &str) -> Result<RawConfig, ConfigError> {
        let parsed: Result<RawConfig, Box<dyn std::error::Error + Send + Sync>> = match self {
            #[cfg(feature = "yaml")]
            Self::Yaml => serde_yml::from_str(content).map_err(Into::into),
            #[cfg(feature = "json")]
            Self::Json => serde_json::from_str(content).map_err(Into::into),
            #[cfg(feature = "toml")]
            Self::Toml => toml::from_str(content).map_err(Into::into),
        };

        parsed.map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }
}

/// Pick a file source for `path` by its extension.
pub fn create_file_source(path: &Path) -> Result<Box<dyn ConfigSource>, ConfigError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let format = FileFormat::from_extension(ext)?;
    Ok(Box::new(FileSource::new(path.to_path_buf(), format)))
}
