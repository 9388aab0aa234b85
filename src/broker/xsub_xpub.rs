//! The `XSUB_XPUB` pattern.
//!
//! Publishers connect to the ingress XSUB socket, subscribers to the egress
//! XPUB socket. Application messages flow downstream and subscription
//! frames flow upstream, so publishers only send topics someone wants.

use super::endpoint::ZmqEndpoint;
use super::forward::{relay, ForwardStats};
use super::ForwardingStrategy;
use crate::config::model::BrokerConfig;
use crate::error::BrokerError;
use crate::shutdown::Shutdown;

pub const NAME: &str = "XSUB_XPUB";

#[derive(Clone)]
pub struct XsubXpub {
    ctx: zmq::Context,
}

impl XsubXpub {
    #[must_use]
    pub fn new() -> Self {
        Self::with_context(zmq::Context::new())
    }

    /// Share an existing context, e.g. to reach the broker over `inproc://`.
    #[must_use]
    pub fn with_context(ctx: zmq::Context) -> Self {
        Self { ctx }
    }
}

impl Default for XsubXpub {
    fn default() -> Self {
        Self::new()
    }
}

#[must_use]
pub fn create() -> Box<dyn ForwardingStrategy> {
    Box::new(XsubXpub::new())
}

impl ForwardingStrategy for XsubXpub {
    fn name(&self) -> &'static str {
        NAME
    }

    fn describe(&self) -> &'static str {
        "XSUB ingress for publishers, XPUB egress for subscribers; subscriptions propagate upstream"
    }

    fn bind_and_run(
        &self,
        config: &BrokerConfig,
        shutdown: Shutdown,
    ) -> Result<ForwardStats, BrokerError> {
        let mut ingress = ZmqEndpoint::ingress(&self.ctx, config)?;
        tracing::info!(
            role = "ingress",
            socket = ingress.kind(),
            addr = ingress.bound_addr(),
            hwm = config.ingress_recv_hwm(),
            timeout_ms = config.ingress_recv_timeout_ms(),
            "endpoint bound"
        );

        // On failure here `ingress` is dropped, closing its socket.
        let mut egress = ZmqEndpoint::egress(&self.ctx, config)?;
        tracing::info!(
            role = "egress",
            socket = egress.kind(),
            addr = egress.bound_addr(),
            hwm = config.egress_send_hwm(),
            timeout_ms = config.egress_send_timeout_ms(),
            "endpoint bound"
        );

        let stats = relay(&mut ingress, &mut egress, config.ingress_wait(), &shutdown)?;
        Ok(stats)
    }
}
