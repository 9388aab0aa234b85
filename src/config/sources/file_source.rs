//! Async file-based config source.
//!
//! [`FileSource`] reads the file via Tokio and hands the text to its
//! [`FileFormat`] for deserialization. Field validation happens later in
//! [`config::load`](crate::config::load).

use std::path::PathBuf;

use async_trait::async_trait;

use super::FileFormat;
use crate::config::model::RawConfig;
use crate::config::ConfigSource;
use crate::error::ConfigError;

pub struct FileSource {
    path: PathBuf,
    format: FileFormat,
}

impl FileSource {
    #[must_use]
    pub const fn new(path: PathBuf, format: FileFormat) -> Self {
        Self { path, format }
    }

    /// Any failure to obtain the text, missing file or not, is `NotFound`.
    async fn read_content(&self) -> Result<String, ConfigError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ConfigError::NotFound {
                path: self.path.clone(),
                source,
            })
    }
}

#[async_trait]
impl ConfigSource for FileSource {
    fn name(&self) -> &'static str {
        self.format.name()
    }

    async fn read(&self) -> Result<RawConfig, ConfigError> {
        let content = self.read_content().await?;
        self.format.parse(&content, &self.path.display().to_string())
    }
}
