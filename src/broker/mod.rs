//! The forwarding engine.
//!
//! A [`ForwardingStrategy`] binds the two broker endpoints for one pattern
//! and relays between them until shutdown. Strategies are looked up by name
//! in the [`PatternRegistry`](registry::PatternRegistry).
//!
//! - [`endpoint`] -- the [`Endpoint`](endpoint::Endpoint) seam and its ZeroMQ
//!   implementation.
//! - [`forward`] -- the relay loop shared by all strategies.
//! - [`registry`] -- name to strategy lookup.
//! - [`xsub_xpub`] -- the `XSUB_XPUB` bridge.

pub mod endpoint;
pub mod forward;
pub mod registry;
pub mod xsub_xpub;

use crate::config::model::BrokerConfig;
use crate::error::BrokerError;
use crate::shutdown::Shutdown;
use forward::ForwardStats;

pub trait ForwardingStrategy: Send + Sync {
    /// Registry name, e.g. `XSUB_XPUB`.
    fn name(&self) -> &'static str;

    /// One-line summary for `pubrelay patterns`.
    fn describe(&self) -> &'static str;

    /// Create and bind both endpoints, then relay until `shutdown` fires.
    ///
    /// Blocks the calling thread. Setup failures are returned before any
    /// traffic is relayed; a transport failure afterwards ends the relay.
    fn bind_and_run(
        &self,
        config: &BrokerConfig,
        shutdown: Shutdown,
    ) -> Result<ForwardStats, BrokerError>;
}
