//! Validation and default substitution.
//!
//! [`resolve`] turns a [`RawConfig`] into a [`BrokerConfig`], checking in a
//! fixed order: pattern present, pattern registered, ingress address,
//! egress address. Integer fields never fail; anything absent, non-positive
//! or too large for the transport falls back to its default.

use super::model::{BrokerConfig, RawConfig, DEFAULT_HWM, DEFAULT_TIMEOUT_MS};
use crate::broker::registry::PatternRegistry;
use crate::error::ConfigError;

pub fn resolve(raw: RawConfig, registry: &PatternRegistry) -> Result<BrokerConfig, ConfigError> {
    // Matched as given: padding makes a name unknown rather than missing.
    let pattern = raw
        .pattern
        .filter(|p| !p.trim().is_empty())
        .ok_or(ConfigError::MissingPattern)?;
    registry.check(&pattern)?;

    let sub = raw.sub.unwrap_or_default();
    let publ = raw.publ.unwrap_or_default();

    let ingress_addr =
        non_empty(sub.addr).ok_or(ConfigError::MissingField { field: "sub.addr" })?;
    let egress_addr =
        non_empty(publ.addr).ok_or(ConfigError::MissingField { field: "pub.addr" })?;

    Ok(BrokerConfig::from_resolved(
        pattern,
        ingress_addr,
        positive_or_default("sub.hwm", sub.hwm, DEFAULT_HWM),
        positive_or_default("sub.timeo", sub.timeo, DEFAULT_TIMEOUT_MS),
        egress_addr,
        positive_or_default("pub.hwm", publ.hwm, DEFAULT_HWM),
        positive_or_default("pub.timeo", publ.timeo, DEFAULT_TIMEOUT_MS),
    ))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn positive_or_default(field: &'static str, value: Option<i64>, default: i32) -> i32 {
    match value {
        Some(v) if v > 0 => i32::try_from(v).unwrap_or_else(|_| {
            tracing::warn!(
                key = field,
                value = v,
                default,
                "value exceeds transport limit, using default"
            );
            default
        }),
        _ => default,
    }
}

#[must_use]
pub fn format_validation_report(source: &str, config: &BrokerConfig) -> String {
    let lines = [
        format!("  pattern: {}", config.pattern()),
        format!(
            "  ingress: {}  (recv hwm {}, recv timeout {}ms)",
            config.ingress_addr(),
            config.ingress_recv_hwm(),
            config.ingress_recv_timeout_ms()
        ),
        format!(
            "  egress:  {}  (send hwm {}, send timeout {}ms)",
            config.egress_addr(),
            config.egress_send_hwm(),
            config.egress_send_timeout_ms()
        ),
    ];
    format!("{source} is valid\n{}", lines.join("\n"))
}
