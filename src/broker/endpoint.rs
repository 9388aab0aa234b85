//! Broker endpoints.
//!
//! [`Endpoint`] is the only surface the relay loop needs from the transport:
//! a combined wait over both sides, a non-blocking receive and a send that
//! may time out. [`ZmqEndpoint`] implements it over a bound `zmq::Socket`.

use std::time::Duration;

use crate::config::model::BrokerConfig;
use crate::error::{BrokerError, Role, TransportError};

/// One multipart message, frames in order.
pub type Message = Vec<Vec<u8>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// The transport did not accept the message within its send timeout.
    TimedOut,
}

/// Which endpoints have a message waiting after [`Endpoint::wait_either`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ready {
    pub ingress: bool,
    pub egress: bool,
}

pub trait Endpoint {
    fn role(&self) -> Role;

    /// Block until either endpoint has a message or `wait` elapses.
    fn wait_either(
        ingress: &mut Self,
        egress: &mut Self,
        wait: Duration,
    ) -> Result<Ready, TransportError>
    where
        Self: Sized;

    /// Take one message if one is queued. `Ok(None)` means nothing arrived.
    fn recv(&mut self) -> Result<Option<Message>, TransportError>;

    fn send(&mut self, msg: Message) -> Result<Delivery, TransportError>;
}

pub struct ZmqEndpoint {
    socket: zmq::Socket,
    role: Role,
    kind: &'static str,
    addr: String,
}

impl ZmqEndpoint {
    /// XSUB socket facing upstream publishers, bound to `ingress_addr`.
    pub fn ingress(ctx: &zmq::Context, config: &BrokerConfig) -> Result<Self, BrokerError> {
        let role = Role::Ingress;
        let socket = open(ctx, zmq::XSUB, role)?;
        socket
            .set_rcvhwm(config.ingress_recv_hwm())
            .map_err(setup_error(role))?;
        socket
            .set_rcvtimeo(config.ingress_recv_timeout_ms())
            .map_err(setup_error(role))?;
        Self::bind(socket, role, "XSUB", config.ingress_addr())
    }

    /// XPUB socket facing downstream subscribers, bound to `egress_addr`.
    pub fn egress(ctx: &zmq::Context, config: &BrokerConfig) -> Result<Self, BrokerError> {
        let role = Role::Egress;
        let socket = open(ctx, zmq::XPUB, role)?;
        socket
            .set_sndhwm(config.egress_send_hwm())
            .map_err(setup_error(role))?;
        socket
            .set_sndtimeo(config.egress_send_timeout_ms())
            .map_err(setup_error(role))?;
        Self::bind(socket, role, "XPUB", config.egress_addr())
    }

    fn bind(
        socket: zmq::Socket,
        role: Role,
        kind: &'static str,
        addr: &str,
    ) -> Result<Self, BrokerError> {
        socket.bind(addr).map_err(|source| BrokerError::Bind {
            role,
            addr: addr.to_string(),
            source,
        })?;

        // Wildcard ports resolve to the concrete port here.
        let addr = socket
            .get_last_endpoint()
            .ok()
            .and_then(Result::ok)
            .unwrap_or_else(|| addr.to_string());

        Ok(Self {
            socket,
            role,
            kind,
            addr,
        })
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    #[must_use]
    pub fn bound_addr(&self) -> &str {
        &self.addr
    }

    fn error(&self, op: &'static str, source: zmq::Error) -> TransportError {
        TransportError::Zmq {
            role: self.role,
            op,
            source,
        }
    }
}

fn open(
    ctx: &zmq::Context,
    kind: zmq::SocketType,
    role: Role,
) -> Result<zmq::Socket, BrokerError> {
    let socket = ctx.socket(kind).map_err(setup_error(role))?;
    // Undelivered messages are discarded on close so shutdown never blocks.
    socket.set_linger(0).map_err(setup_error(role))?;
    Ok(socket)
}

fn setup_error(role: Role) -> impl Fn(zmq::Error) -> BrokerError {
    move |source| BrokerError::Socket { role, source }
}

impl Endpoint for ZmqEndpoint {
    fn role(&self) -> Role {
        self.role
    }

    fn wait_either(
        ingress: &mut Self,
        egress: &mut Self,
        wait: Duration,
    ) -> Result<Ready, TransportError> {
        let timeout_ms = i64::try_from(wait.as_millis()).unwrap_or(i64::MAX);
        let mut items = [
            ingress.socket.as_poll_item(zmq::POLLIN),
            egress.socket.as_poll_item(zmq::POLLIN),
        ];
        match zmq::poll(&mut items, timeout_ms) {
            Ok(_) => Ok(Ready {
                ingress: items[0].is_readable(),
                egress: items[1].is_readable(),
            }),
            Err(zmq::Error::EINTR) => Ok(Ready::default()),
            Err(source) => Err(ingress.error("poll", source)),
        }
    }

    fn recv(&mut self) -> Result<Option<Message>, TransportError> {
        match self.socket.recv_multipart(zmq::DONTWAIT) {
            Ok(frames) => Ok(Some(frames)),
            Err(zmq::Error::EAGAIN | zmq::Error::EINTR) => Ok(None),
            Err(source) => Err(self.error("recv", source)),
        }
    }

    fn send(&mut self, msg: Message) -> Result<Delivery, TransportError> {
        match self.socket.send_multipart(msg, 0) {
            Ok(()) => Ok(Delivery::Sent),
            Err(zmq::Error::EAGAIN) => Ok(Delivery::TimedOut),
            Err(source) => Err(self.error("send", source)),
        }
    }
}
