//! Observable forwarding notifications.
//!
//! The only externally observable surface of the simulation is this
//! structured event stream plus queue-length inspection. Console or log
//! formatting is the observer's concern; the [`Network`] only publishes
//! [`Event`] values on the channel returned by [`Network::subscribe`]
//! (and mirrors them as `tracing` records).
//!
//! [`Network`]: crate::network::Network
//! [`Network::subscribe`]: crate::network::Network::subscribe

use crate::{
    node::NodeId,
    packet::PacketId,
    size::PacketSize,
};
use std::sync::mpsc;

/// A notification emitted by a forwarding policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A core-optimized node delivered a packet.
    ForwardedOptimized { node: NodeId, packet: PacketId },
    /// An edge node admitted and delivered a packet.
    ForwardedQos { node: NodeId, packet: PacketId },
    /// An edge node consumed and discarded a packet whose size exceeded
    /// the admission limit. The packet was removed from the queue and
    /// never reached the destination.
    DroppedSizeLimit {
        node: NodeId,
        packet: PacketId,
        size: PacketSize,
        limit: PacketSize,
    },
}

/// Publishing side of the event stream, held by the [`Network`].
///
/// [`Network`]: crate::network::Network
pub(crate) struct EventSender {
    sender: mpsc::Sender<Event>,
}

/// Consuming side of the event stream, handed to the observer by
/// [`Network::subscribe`].
///
/// [`Network::subscribe`]: crate::network::Network::subscribe
pub struct EventReceiver {
    receiver: mpsc::Receiver<Event>,
}

pub(crate) fn event_channel() -> (EventSender, EventReceiver) {
    let (sender, receiver) = mpsc::channel();
    (EventSender { sender }, EventReceiver { receiver })
}

impl EventSender {
    /// publish an event; returns `false` once the receiver is gone so the
    /// caller can stop publishing.
    pub(crate) fn send(&self, event: Event) -> bool {
        self.sender.send(event).is_ok()
    }
}

impl EventReceiver {
    /// the next pending event, if any.
    ///
    /// Never blocks: the simulation is synchronous, every event caused by
    /// a forward call is already in the channel when the call returns.
    pub fn try_receive(&mut self) -> Option<Event> {
        self.receiver.try_recv().ok()
    }

    /// drain every pending event.
    pub fn drain(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some(event) = self.try_receive() {
            events.push(event);
        }
        events
    }
}
