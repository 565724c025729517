mod id;

pub use self::id::NodeId;
use crate::{packet::Packet, policy::ForwardPolicy, routing::RoutingTable};
use std::collections::VecDeque;

/// A simulated forwarding endpoint managed by the [`Network`].
///
/// `Node` owns an inbound FIFO queue of [`Packet`]s, the [`ForwardPolicy`]
/// applied to the head packet on a forward call, and an advisory
/// [`RoutingTable`]. Nodes are registered through [`Network::new_node`],
/// which hands out a [`NodeBuilder`]; all mutation goes through the
/// [`Network`].
///
/// ## Data flow
///
/// ```text
/// Network::inject()                    Network::forward(from, to)
///      │                                        │
///      ▼                                        ▼
/// [ tail ◄── FIFO queue ── head ] ── policy ──► dst queue (delivered)
///                                       │
///                                       └─────► discarded (EdgeQos drop)
/// ```
///
/// The queue is unbounded and only ever shrinks from the front; forwarding
/// from an empty queue is a defined no-op ([`ForwardOutcome::Idle`]).
///
/// [`Network`]: crate::network::Network
/// [`Network::new_node`]: crate::network::Network::new_node
/// [`NodeBuilder`]: crate::network::NodeBuilder
pub struct Node {
    id: NodeId,

    policy: ForwardPolicy,

    /// arrival order is queue order; removal happens at the front only
    queue: VecDeque<Packet>,

    routes: RoutingTable,
}

/// The result of a forward call.
///
/// Exactly one packet leaves the source queue unless the queue was empty.
/// The packet carried by [`Forwarded`] is a copy of what was delivered to
/// the destination queue; the one carried by [`Dropped`] is the original,
/// consumed without delivery.
///
/// [`Forwarded`]: ForwardOutcome::Forwarded
/// [`Dropped`]: ForwardOutcome::Dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardOutcome {
    /// the head packet was dequeued and delivered to the destination.
    Forwarded(Packet),
    /// the head packet was dequeued and discarded by the admission policy.
    Dropped(Packet),
    /// the queue was empty; nothing happened.
    Idle,
}

impl ForwardOutcome {
    /// the packet that left the queue, delivered or not.
    pub fn packet(&self) -> Option<&Packet> {
        match self {
            Self::Forwarded(packet) | Self::Dropped(packet) => Some(packet),
            Self::Idle => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl Node {
    pub(crate) fn new(id: NodeId, policy: ForwardPolicy) -> Self {
        Self {
            id,
            policy,
            queue: VecDeque::new(),
            routes: RoutingTable::new(),
        }
    }

    /// Returns the identifier of this node.
    #[inline]
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Returns the forwarding policy of this node.
    #[inline]
    pub fn policy(&self) -> ForwardPolicy {
        self.policy
    }

    pub(crate) fn set_policy(&mut self, policy: ForwardPolicy) {
        self.policy = policy;
    }

    /// Append a packet at the tail of the inbound queue.
    ///
    /// Always succeeds; the queue is unbounded and no admission rule runs
    /// on arrival. Admission is evaluated when the packet is forwarded.
    pub(crate) fn receive(&mut self, packet: Packet) {
        self.queue.push_back(packet);
    }

    /// Returns how many packets are currently queued.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the packet that the next forward call would dequeue.
    pub fn peek(&self) -> Option<&Packet> {
        self.queue.front()
    }

    /// Dequeue the head packet, apply this node's policy and, if the
    /// packet is admitted, deliver it into `dst`'s queue.
    ///
    /// This is the shared baseline every policy variant goes through; the
    /// variants only differ in the admission rule and in the notification
    /// the [`Network`] emits for the outcome.
    ///
    /// [`Network`]: crate::network::Network
    pub(crate) fn forward_into(&mut self, dst: &mut Node) -> ForwardOutcome {
        let Some(packet) = self.queue.pop_front() else {
            return ForwardOutcome::Idle;
        };

        if !self.policy.admits(&packet) {
            return ForwardOutcome::Dropped(packet);
        }

        dst.receive(packet.clone());
        ForwardOutcome::Forwarded(packet)
    }

    /// the advisory routing table of this node.
    pub fn routes(&self) -> &RoutingTable {
        &self.routes
    }

    pub(crate) fn routes_mut(&mut self) -> &mut RoutingTable {
        &mut self.routes
    }

    /// Recompute this node's routing table.
    ///
    /// Extension point, currently a no-op: no route computation is
    /// performed, the call only leaves a trace record.
    pub(crate) fn optimize_routing(&mut self) {
        tracing::debug!(node = %self.id, "optimizing routing table");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::Timestamp,
        packet::{Packet, PacketId},
    };

    fn node(id: &str, policy: ForwardPolicy) -> Node {
        Node::new(NodeId::from(id), policy)
    }

    // fixed timestamp so that packets built from the same arguments
    // compare equal
    fn packet(id: u64, bytes: u64) -> Packet {
        Packet::builder()
            .id(PacketId::new(id))
            .source("H1")
            .destination("H2")
            .size(bytes)
            .timestamp(Timestamp::from_millis(1_000))
            .build()
            .unwrap()
    }

    #[test]
    fn new_node_is_empty() {
        let node = node("n1", ForwardPolicy::Plain);
        assert!(node.is_empty());
        assert_eq!(node.queue_len(), 0);
        assert_eq!(node.peek(), None);
    }

    #[test]
    fn receive_grows_the_queue() {
        let mut node = node("n1", ForwardPolicy::Plain);
        for i in 0..5 {
            node.receive(packet(i, 100));
        }
        assert_eq!(node.queue_len(), 5);
    }

    #[test]
    fn forward_from_empty_queue_is_idle() {
        let mut src = node("n1", ForwardPolicy::Plain);
        let mut dst = node("n2", ForwardPolicy::Plain);

        for _ in 0..3 {
            assert_eq!(src.forward_into(&mut dst), ForwardOutcome::Idle);
        }
        assert_eq!(src.queue_len(), 0);
        assert_eq!(dst.queue_len(), 0);
    }

    #[test]
    fn forward_moves_the_head_packet() {
        let mut src = node("n1", ForwardPolicy::Plain);
        let mut dst = node("n2", ForwardPolicy::Plain);
        src.receive(packet(1, 100));

        let outcome = src.forward_into(&mut dst);

        assert_eq!(outcome, ForwardOutcome::Forwarded(packet(1, 100)));
        assert_eq!(src.queue_len(), 0);
        assert_eq!(dst.queue_len(), 1);
    }

    #[test]
    fn forward_is_fifo() {
        let mut src = node("n1", ForwardPolicy::Plain);
        let mut dst = node("n2", ForwardPolicy::Plain);
        for i in 1..=4 {
            src.receive(packet(i, 100));
        }

        for expected in 1..=4 {
            let outcome = src.forward_into(&mut dst);
            let forwarded = outcome.packet().unwrap();
            assert_eq!(forwarded.id(), PacketId::new(expected));
        }

        // delivered in arrival order
        let delivered: Vec<_> = dst.queue.iter().map(|p| p.id()).collect();
        assert_eq!(
            delivered,
            (1..=4).map(PacketId::new).collect::<Vec<_>>()
        );
    }

    #[test]
    fn queue_length_conservation() {
        // after N receives and M non-idle forwards, len == N - M
        let mut src = node("n1", ForwardPolicy::Plain);
        let mut dst = node("n2", ForwardPolicy::Plain);

        const N: u64 = 7;
        const M: u64 = 3;
        for i in 0..N {
            src.receive(packet(i, 100));
        }
        for _ in 0..M {
            assert!(!src.forward_into(&mut dst).is_idle());
        }

        assert_eq!(src.queue_len() as u64, N - M);
        assert_eq!(dst.queue_len() as u64, M);
    }

    #[test]
    fn edge_drop_consumes_without_delivery() {
        let mut src = node("edge-1", ForwardPolicy::edge_qos());
        let mut dst = node("core-1", ForwardPolicy::Plain);
        src.receive(packet(1, 3_000_000));

        let outcome = src.forward_into(&mut dst);

        assert!(matches!(outcome, ForwardOutcome::Dropped(_)));
        assert_eq!(src.queue_len(), 0, "dropped packet must be consumed");
        assert_eq!(dst.queue_len(), 0, "dropped packet must not be delivered");
    }

    #[test]
    fn edge_pass_delivers() {
        let mut src = node("edge-1", ForwardPolicy::edge_qos());
        let mut dst = node("core-1", ForwardPolicy::Plain);
        src.receive(packet(1, 1_000_000));

        let outcome = src.forward_into(&mut dst);

        assert!(matches!(outcome, ForwardOutcome::Forwarded(_)));
        assert_eq!(dst.queue_len(), 1);
    }

    #[test]
    fn edge_drop_only_affects_the_head() {
        let mut src = node("edge-1", ForwardPolicy::edge_qos());
        let mut dst = node("core-1", ForwardPolicy::Plain);
        src.receive(packet(1, 3_000_000));
        src.receive(packet(2, 1_000));

        assert!(matches!(
            src.forward_into(&mut dst),
            ForwardOutcome::Dropped(_)
        ));
        assert_eq!(src.queue_len(), 1, "second packet stays queued");

        assert!(matches!(
            src.forward_into(&mut dst),
            ForwardOutcome::Forwarded(_)
        ));
        assert_eq!(dst.queue_len(), 1);
    }

    #[test]
    fn routing_table_does_not_change_forwarding() {
        let mut plain = node("n1", ForwardPolicy::Plain);
        let mut routed = node("n2", ForwardPolicy::Plain);
        routed
            .routes_mut()
            .update("H2".into(), "core-1".into());

        let mut dst_a = node("a", ForwardPolicy::Plain);
        let mut dst_b = node("b", ForwardPolicy::Plain);

        plain.receive(packet(1, 100));
        routed.receive(packet(1, 100));

        assert_eq!(
            plain.forward_into(&mut dst_a),
            routed.forward_into(&mut dst_b)
        );
        assert_eq!(dst_a.queue_len(), dst_b.queue_len());
    }

    #[test]
    fn outcome_packet_accessor() {
        assert_eq!(ForwardOutcome::Idle.packet(), None);
        assert!(ForwardOutcome::Idle.is_idle());

        let p = packet(1, 100);
        assert_eq!(ForwardOutcome::Forwarded(p.clone()).packet(), Some(&p));
        assert_eq!(ForwardOutcome::Dropped(p.clone()).packet(), Some(&p));
    }
}
