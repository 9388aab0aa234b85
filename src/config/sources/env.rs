//! Environment-variable config source.
//!
//! Reads `PATTERN`, `SUB_ADDR`, `SUB_HWM`, `SUB_TIMEOUT`, `PUB_ADDR`,
//! `PUB_HWM` and `PUB_TIMEOUT`. Absent and empty variables are treated the
//! same way. A numeric variable that does not parse is logged and treated
//! as unset, so its default applies.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::config::model::{RawConfig, RawSocket};
use crate::config::ConfigSource;
use crate::error::ConfigError;

pub const PATTERN: &str = "PATTERN";
pub const SUB_ADDR: &str = "SUB_ADDR";
pub const SUB_HWM: &str = "SUB_HWM";
pub const SUB_TIMEOUT: &str = "SUB_TIMEOUT";
pub const PUB_ADDR: &str = "PUB_ADDR";
pub const PUB_HWM: &str = "PUB_HWM";
pub const PUB_TIMEOUT: &str = "PUB_TIMEOUT";

pub const ALL_VARS: &[&str] = &[
    PATTERN,
    SUB_ADDR,
    SUB_HWM,
    SUB_TIMEOUT,
    PUB_ADDR,
    PUB_HWM,
    PUB_TIMEOUT,
];

#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    vars: HashMap<String, String>,
}

impl EnvSource {
    /// Snapshot the broker variables from the process environment.
    #[must_use]
    pub fn from_process() -> Self {
        Self::from_vars(
            ALL_VARS
                .iter()
                .filter_map(|name| std::env::var(name).ok().map(|v| ((*name).to_string(), v))),
        )
    }

    #[must_use]
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    fn string(&self, name: &str) -> Option<String> {
        self.vars
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Only blank values are dropped; the name itself is passed on verbatim.
    fn pattern(&self) -> Option<String> {
        self.vars
            .get(PATTERN)
            .filter(|v| !v.trim().is_empty())
            .cloned()
    }

    fn integer(&self, name: &str) -> Option<i64> {
        let raw = self.string(name)?;
        match raw.parse::<i64>() {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(var = name, value = %raw, error = %e, "ignoring non-numeric value");
                None
            }
        }
    }

    fn socket(&self, addr: &str, hwm: &str, timeout: &str) -> RawSocket {
        RawSocket {
            addr: self.string(addr),
            hwm: self.integer(hwm),
            timeo: self.integer(timeout),
        }
    }

    #[must_use]
    pub fn to_raw(&self) -> RawConfig {
        RawConfig {
            pattern: self.pattern(),
            sub: Some(self.socket(SUB_ADDR, SUB_HWM, SUB_TIMEOUT)),
            publ: Some(self.socket(PUB_ADDR, PUB_HWM, PUB_TIMEOUT)),
        }
    }
}

#[async_trait]
impl ConfigSource for EnvSource {
    fn name(&self) -> &'static str {
        "env"
    }

    async fn read(&self) -> Result<RawConfig, ConfigError> {
        Ok(self.to_raw())
    }
}
