//! Data structures for broker configuration.
//!
//! [`RawConfig`] is what a source produces: every field optional, so that
//! missing keys are reported by validation in a fixed order rather than by
//! serde. [`BrokerConfig`] is the canonical, fully resolved result. It can
//! only be built by [`validation::resolve`](super::validation::resolve) and
//! exposes read-only accessors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_HWM: i32 = 1_000_000;
pub const DEFAULT_TIMEOUT_MS: i32 = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<RawSocket>,

    #[serde(default, rename = "pub", skip_serializing_if = "Option::is_none")]
    pub publ: Option<RawSocket>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawSocket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addr: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hwm: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeo: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokerConfig {
    pattern: String,
    ingress_addr: String,
    ingress_recv_hwm: i32,
    ingress_recv_timeout_ms: i32,
    egress_addr: String,
    egress_send_hwm: i32,
    egress_send_timeout_ms: i32,
}

impl BrokerConfig {
    pub(crate) const fn from_resolved(
        pattern: String,
        ingress_addr: String,
        ingress_recv_hwm: i32,
        ingress_recv_timeout_ms: i32,
        egress_addr: String,
        egress_send_hwm: i32,
        egress_send_timeout_ms: i32,
    ) -> Self {
        Self {
            pattern,
            ingress_addr,
            ingress_recv_hwm,
            ingress_recv_timeout_ms,
            egress_addr,
            egress_send_hwm,
            egress_send_timeout_ms,
        }
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn ingress_addr(&self) -> &str {
        &self.ingress_addr
    }

    #[must_use]
    pub const fn ingress_recv_hwm(&self) -> i32 {
        self.ingress_recv_hwm
    }

    #[must_use]
    pub const fn ingress_recv_timeout_ms(&self) -> i32 {
        self.ingress_recv_timeout_ms
    }

    #[must_use]
    pub fn egress_addr(&self) -> &str {
        &self.egress_addr
    }

    #[must_use]
    pub const fn egress_send_hwm(&self) -> i32 {
        self.egress_send_hwm
    }

    #[must_use]
    pub const fn egress_send_timeout_ms(&self) -> i32 {
        self.egress_send_timeout_ms
    }

    /// How long one ingress receive may wait before the loop re-polls.
    #[must_use]
    pub fn ingress_wait(&self) -> Duration {
        Duration::from_millis(u64::from(self.ingress_recv_timeout_ms.unsigned_abs()))
    }
}
