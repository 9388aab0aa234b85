//! pubrelay is a configuration-driven XSUB/XPUB message broker.
//!
//! Publishers connect to the broker's ingress endpoint, subscribers to its
//! egress endpoint. The broker relays messages downstream and subscription
//! frames upstream, so neither side needs to know where the other lives.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, validate, init, patterns).
//! - [`config`] -- Config sources (environment, YAML/JSON/TOML files),
//!   validation, and default substitution into a
//!   [`BrokerConfig`](config::model::BrokerConfig).
//! - [`broker`] -- Pattern registry, the [`Endpoint`](broker::endpoint::Endpoint)
//!   seam over ZeroMQ, and the relay loop.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`shutdown`] -- Signal handling and cancellation of the relay loop.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML config file support _(enabled by default)_ |
//! | `json` | JSON config file support _(enabled by default)_ |
//! | `toml` | TOML config file support |
//! | `sentry-integration` | Sentry error tracking |
//! | `file-backends` | All file format backends |
//! | `full` | All features |

// Public functions are consumed by the binary and the integration tests only.
#![allow(clippy::missing_errors_doc)]

pub mod broker;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod logging;
pub mod shutdown;

#[cfg(feature = "sentry-integration")]
pub mod sentry_integration;
