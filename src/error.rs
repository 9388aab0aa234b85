//! Unified error types for pubrelay.
//!
//! [`ConfigError`] covers everything that can go wrong while turning a
//! config source into a [`BrokerConfig`](crate::config::model::BrokerConfig).
//! [`UnknownPattern`] is raised by the pattern registry, [`TransportError`]
//! by endpoints once the broker is running, and [`BrokerError`] is the
//! top-level enum returned by every subcommand. All use `thiserror`.

use std::fmt;
use std::path::PathBuf;

/// Which side of the broker an endpoint or error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Faces upstream publishers (XSUB).
    Ingress,
    /// Faces downstream subscribers (XPUB).
    Egress,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ingress => "ingress",
            Self::Egress => "egress",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pattern '{pattern}' (known: {})", known.join(", "))]
pub struct UnknownPattern {
    pub pattern: String,
    pub known: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("pattern is not set (set PATTERN or the top-level \"pattern\" key)")]
    MissingPattern,

    #[error(transparent)]
    UnknownPattern(#[from] UnknownPattern),

    #[error("required field '{field}' is missing or empty")]
    MissingField { field: &'static str },

    #[error("Config parse error in {path}:\n  {source}")]
    Parse {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Config file not found or unreadable: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported config format: '{0}'")]
    UnsupportedFormat(String),
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TransportError {
    #[error("{role} {op} failed: {source}")]
    Zmq {
        role: Role,
        op: &'static str,
        #[source]
        source: zmq::Error,
    },

    #[error("{role} endpoint closed")]
    Closed { role: Role },
}

impl TransportError {
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Zmq { role, .. } | Self::Closed { role } => *role,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BrokerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    UnknownPattern(#[from] UnknownPattern),

    #[error("No config source found.\n\n  {hint}")]
    NoConfigSource { hint: String },

    #[error("failed to set up {role} socket: {source}")]
    Socket {
        role: Role,
        #[source]
        source: zmq::Error,
    },

    #[error("failed to bind {role} socket to '{addr}': {source}")]
    Bind {
        role: Role,
        addr: String,
        #[source]
        source: zmq::Error,
    },

    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("File already exists: {}", path.display())]
    FileExists { path: PathBuf },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("broker thread failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
