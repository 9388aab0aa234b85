//! The relay loop.
//!
//! [`relay`] moves application messages from ingress to egress and
//! subscription messages from egress back to ingress, without looking at or
//! changing the frames. Each iteration waits on both endpoints at once and
//! forwards one message from every side that is ready, so subscriptions
//! never queue behind an idle ingress. The loop ends when the shutdown
//! signal is seen or when either endpoint reports a transport error.

use std::time::Duration;

use serde::Serialize;

use super::endpoint::{Delivery, Endpoint, Message};
use crate::error::TransportError;
use crate::shutdown::Shutdown;

/// Upper bound on one wait, and so on how long shutdown can go unnoticed.
pub const MAX_WAIT: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ForwardStats {
    /// Messages relayed from ingress to egress.
    pub downstream: u64,
    /// Subscription messages relayed from egress to ingress.
    pub upstream: u64,
    /// Messages the receiving side did not accept within its send timeout.
    pub dropped: u64,
}

pub fn relay<E: Endpoint>(
    ingress: &mut E,
    egress: &mut E,
    wait: Duration,
    shutdown: &Shutdown,
) -> Result<ForwardStats, TransportError> {
    let wait = wait.min(MAX_WAIT);
    let mut stats = ForwardStats::default();

    while !shutdown.is_triggered() {
        let ready = E::wait_either(ingress, egress, wait)?;

        if ready.ingress {
            if let Some(msg) = ingress.recv()? {
                match egress.send(msg)? {
                    Delivery::Sent => stats.downstream += 1,
                    Delivery::TimedOut => dropped(&mut stats, egress),
                }
            }
        }

        if ready.egress {
            if let Some(msg) = egress.recv()? {
                tracing::trace!(kind = subscription_kind(&msg), "relaying subscription upstream");
                match ingress.send(msg)? {
                    Delivery::Sent => stats.upstream += 1,
                    Delivery::TimedOut => dropped(&mut stats, ingress),
                }
            }
        }
    }

    Ok(stats)
}

fn dropped<T: Endpoint>(stats: &mut ForwardStats, to: &T) {
    stats.dropped += 1;
    tracing::debug!(role = %to.role(), "send timed out, message dropped");
}

/// XPUB control frames start with 1 (subscribe) or 0 (unsubscribe).
fn subscription_kind(msg: &Message) -> &'static str {
    match msg.first().and_then(|frame| frame.first()) {
        Some(1) => "subscribe",
        Some(0) => "unsubscribe",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::broker::endpoint::Ready;
    use crate::error::Role;
    use crate::shutdown::{self, ShutdownTrigger};

    /// Scripted endpoint: `inbox` feeds `recv`, `sent` records `send`.
    /// Both sides running out of input trips the shutdown trigger so the
    /// loop ends.
    struct Scripted {
        role: Role,
        inbox: VecDeque<Result<Option<Message>, TransportError>>,
        sent: Vec<Message>,
        send_results: VecDeque<Delivery>,
        stop_when_empty: Option<ShutdownTrigger>,
        last_wait: Option<Duration>,
    }

    impl Scripted {
        fn new(role: Role) -> Self {
            Self {
                role,
                inbox: VecDeque::new(),
                sent: Vec::new(),
                send_results: VecDeque::new(),
                stop_when_empty: None,
                last_wait: None,
            }
        }

        fn push(mut self, msg: Message) -> Self {
            self.inbox.push_back(Ok(Some(msg)));
            self
        }
    }

    impl Endpoint for Scripted {
        fn role(&self) -> Role {
            self.role
        }

        fn wait_either(
            ingress: &mut Self,
            egress: &mut Self,
            wait: Duration,
        ) -> Result<Ready, TransportError> {
            ingress.last_wait = Some(wait);
            let ready = Ready {
                ingress: !ingress.inbox.is_empty(),
                egress: !egress.inbox.is_empty(),
            };
            if ready == Ready::default() {
                for trigger in [&ingress.stop_when_empty, &egress.stop_when_empty]
                    .into_iter()
                    .flatten()
                {
                    trigger.trigger();
                }
            }
            Ok(ready)
        }

        fn recv(&mut self) -> Result<Option<Message>, TransportError> {
            self.inbox.pop_front().unwrap_or(Ok(None))
        }

        fn send(&mut self, msg: Message) -> Result<Delivery, TransportError> {
            let result = self.send_results.pop_front().unwrap_or(Delivery::Sent);
            if result == Delivery::Sent {
                self.sent.push(msg);
            }
            Ok(result)
        }
    }

    fn frames(parts: &[&[u8]]) -> Message {
        parts.iter().map(|p| p.to_vec()).collect()
    }

    #[test]
    fn relays_both_directions_unchanged() {
        let (trigger, shutdown) = shutdown::channel();
        let mut ingress = Scripted::new(Role::Ingress).push(frames(&[b"topic", b"payload"]));
        ingress.stop_when_empty = Some(trigger);
        let mut egress = Scripted::new(Role::Egress).push(frames(&[b"\x01topic"]));

        let stats = relay(&mut ingress, &mut egress, Duration::ZERO, &shutdown).unwrap();

        assert_eq!(egress.sent, vec![frames(&[b"topic", b"payload"])]);
        assert_eq!(ingress.sent, vec![frames(&[b"\x01topic"])]);
        assert_eq!(
            stats,
            ForwardStats {
                downstream: 1,
                upstream: 1,
                dropped: 0
            }
        );
    }

    #[test]
    fn stops_immediately_when_already_cancelled() {
        let (trigger, shutdown) = shutdown::channel();
        trigger.trigger();
        let mut ingress = Scripted::new(Role::Ingress).push(frames(&[b"never"]));
        let mut egress = Scripted::new(Role::Egress);

        let stats = relay(&mut ingress, &mut egress, Duration::ZERO, &shutdown).unwrap();

        assert_eq!(stats, ForwardStats::default());
        assert!(egress.sent.is_empty());
        assert_eq!(ingress.inbox.len(), 1);
    }

    #[test]
    fn timed_out_send_is_counted_and_loop_continues() {
        let (trigger, shutdown) = shutdown::channel();
        let mut ingress = Scripted::new(Role::Ingress)
            .push(frames(&[b"first"]))
            .push(frames(&[b"second"]));
        ingress.stop_when_empty = Some(trigger);
        let mut egress = Scripted::new(Role::Egress);
        egress.send_results.push_back(Delivery::TimedOut);

        let stats = relay(&mut ingress, &mut egress, Duration::ZERO, &shutdown).unwrap();

        assert_eq!(stats.dropped, 1);
        assert_eq!(stats.downstream, 1);
        assert_eq!(egress.sent, vec![frames(&[b"second"])]);
    }

    #[test]
    fn transport_error_ends_the_loop() {
        let (_trigger, shutdown) = shutdown::channel();
        let mut ingress = Scripted::new(Role::Ingress);
        ingress.inbox.push_back(Err(TransportError::Closed {
            role: Role::Ingress,
        }));
        let mut egress = Scripted::new(Role::Egress);

        let err = relay(&mut ingress, &mut egress, Duration::ZERO, &shutdown).unwrap_err();
        assert_eq!(err.role(), Role::Ingress);
    }

    #[test]
    fn egress_error_ends_the_loop() {
        let (_trigger, shutdown) = shutdown::channel();
        let mut ingress = Scripted::new(Role::Ingress);
        let mut egress = Scripted::new(Role::Egress);
        egress.inbox.push_back(Err(TransportError::Closed { role: Role::Egress }));

        let err = relay(&mut ingress, &mut egress, Duration::ZERO, &shutdown).unwrap_err();
        assert_eq!(err.role(), Role::Egress);
    }

    #[test]
    fn drains_all_queued_subscriptions() {
        let (trigger, shutdown) = shutdown::channel();
        let mut ingress = Scripted::new(Role::Ingress);
        ingress.stop_when_empty = Some(trigger);
        let mut egress = Scripted::new(Role::Egress)
            .push(frames(&[b"\x01a"]))
            .push(frames(&[b"\x01b"]))
            .push(frames(&[b"\x00a"]));

        let stats = relay(&mut ingress, &mut egress, Duration::ZERO, &shutdown).unwrap();

        assert_eq!(stats.upstream, 3);
        assert_eq!(ingress.sent.len(), 3);
        assert_eq!(ingress.sent[2], frames(&[b"\x00a"]));
    }

    #[test]
    fn subscription_is_relayed_while_ingress_is_idle() {
        let (trigger, shutdown) = shutdown::channel();
        let mut ingress = Scripted::new(Role::Ingress);
        ingress.stop_when_empty = Some(trigger);
        let mut egress = Scripted::new(Role::Egress).push(frames(&[b"\x01w"]));

        let stats = relay(&mut ingress, &mut egress, Duration::from_secs(3), &shutdown).unwrap();

        assert_eq!(ingress.sent, vec![frames(&[b"\x01w"])]);
        assert_eq!(stats.upstream, 1);
        assert_eq!(stats.downstream, 0);
    }

    #[test]
    fn long_receive_timeouts_are_capped() {
        let (trigger, shutdown) = shutdown::channel();
        let mut ingress = Scripted::new(Role::Ingress);
        ingress.stop_when_empty = Some(trigger);
        let mut egress = Scripted::new(Role::Egress);

        relay(&mut ingress, &mut egress, Duration::from_secs(3), &shutdown).unwrap();

        assert_eq!(ingress.last_wait, Some(MAX_WAIT));
    }

    #[test]
    fn classifies_subscription_frames() {
        assert_eq!(subscription_kind(&frames(&[b"\x01news"])), "subscribe");
        assert_eq!(subscription_kind(&frames(&[b"\x00news"])), "unsubscribe");
        assert_eq!(subscription_kind(&frames(&[b""])), "other");
        assert_eq!(subscription_kind(&Vec::new()), "other");
    }
}
