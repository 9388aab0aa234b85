//! Configuration loading and validation.
//!
//! Defines the [`ConfigSource`] trait for pluggable config sources and the
//! [`load`] entry point that reads a source and validates the result
//! against a [`PatternRegistry`]. Submodules provide the data model,
//! validation logic, and concrete source implementations.

pub mod model;
pub mod sources;
pub mod validation;

use async_trait::async_trait;

use crate::broker::registry::PatternRegistry;
use crate::error::ConfigError;
use model::{BrokerConfig, RawConfig};

// async_trait is required here because ConfigSource is used as Box<dyn ConfigSource>
// and native async fn in traits does not support dyn dispatch.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Read the source into an unvalidated document.
    async fn read(&self) -> Result<RawConfig, ConfigError>;
}

/// Read `source` and resolve it into a [`BrokerConfig`].
///
/// Read failures (missing file, malformed document) are reported before any
/// field-level validation runs.
pub async fn load(
    source: &dyn ConfigSource,
    registry: &PatternRegistry,
) -> Result<BrokerConfig, ConfigError> {
    let raw = source.read().await?;
    let config = validation::resolve(raw, registry)?;
    tracing::debug!(source = source.name(), pattern = config.pattern(), "config loaded");
    Ok(config)
}
