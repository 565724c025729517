use crate::{
    event::{Event, EventReceiver, EventSender, event_channel},
    node::{ForwardOutcome, Node, NodeId},
    packet::{Address, Packet},
    policy::ForwardPolicy,
    stats::{NetworkStats, NodeStats},
};
use std::collections::HashMap;
use thiserror::Error;

/// This is the entry point for all activities with [`fwdsim`].
///
/// The [`Network`] owns every [`Node`] and mediates all queue mutation:
/// packets enter a node's queue through [`inject`], and move between
/// queues through [`forward`]. Every mutation funnels through
/// `&mut Network`, so FIFO-per-node ordering holds by construction.
///
/// There is no driver inside the crate: any test harness, bench or
/// service composes nodes and issues forward calls itself.
///
/// ```
/// use fwdsim::{network::Network, packet::{Packet, PacketId}, policy::ForwardPolicy};
///
/// let mut network = Network::new();
/// let edge = network.new_node("edge-1").set_policy(ForwardPolicy::edge_qos()).build().unwrap();
/// let core = network.new_node("core-1").set_policy(ForwardPolicy::CoreOptimized).build().unwrap();
///
/// let packet = Packet::builder()
///     .id(PacketId::new(401))
///     .source("H1")
///     .destination("H2")
///     .size(1_000_000)
///     .build()
///     .unwrap();
///
/// network.inject(&edge, packet).unwrap();
/// let outcome = network.forward(&edge, &core).unwrap();
/// assert!(outcome.packet().is_some());
/// assert_eq!(network.queue_len(&core).unwrap(), 1);
/// ```
///
/// [`fwdsim`]: crate
/// [`inject`]: Network::inject
/// [`forward`]: Network::forward
pub struct Network {
    nodes: HashMap<NodeId, Node>,

    /// present while an observer holds the matching [`EventReceiver`];
    /// cleared on the first failed send
    events: Option<EventSender>,
}

/// Builder for configuring a new node before registering it with the
/// network.
///
/// Obtained via [`Network::new_node`]. Configure the forwarding policy and
/// optionally seed routing entries, then call [`build`](NodeBuilder::build)
/// to register the node.
///
/// ## Defaults
///
/// | Setting | Default |
/// |---------|---------|
/// | Policy  | [`ForwardPolicy::Plain`] |
/// | Routes  | empty |
pub struct NodeBuilder<'a> {
    node: Node,

    network: &'a mut Network,
}

/// Error returned when registering a node fails.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// A node with this identifier already exists in the network.
    ///
    /// Node identifiers are caller-assigned; reusing one is a programmer
    /// error and fails fast rather than silently replacing the node.
    #[error("Node ({id}) already registered")]
    Duplicate { id: NodeId },
}

/// Error returned when [`Network::forward`] cannot resolve its endpoints.
///
/// An empty source queue is **not** an error — it is the defined
/// [`ForwardOutcome::Idle`] no-op. These variants are programmer errors:
/// nothing in the simulation creates or removes nodes behind the caller's
/// back.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The forwarding node ID was not found in the network.
    #[error("Sender ({sender}) Not Found")]
    SenderNotFound { sender: NodeId },
    /// The receiving node ID was not found in the network.
    #[error("Recipient ({recipient}) Not Found")]
    RecipientNotFound { recipient: NodeId },
    /// Source and destination are the same node.
    #[error("Cannot forward from node ({node}) to itself")]
    SelfForward { node: NodeId },
}

/// Error returned by the per-node accessors ([`Network::inject`],
/// [`Network::queue_len`], ...) when the node does not exist.
#[derive(Debug, Error)]
#[error("Node ({id}) Not Found")]
pub struct NodeNotFound {
    pub id: NodeId,
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeBuilder<'_> {
    /// Set the forwarding policy for this node.
    ///
    /// Defaults to [`ForwardPolicy::Plain`].
    pub fn set_policy(mut self, policy: ForwardPolicy) -> Self {
        self.node.set_policy(policy);
        self
    }

    /// Seed an advisory routing entry (see [`RoutingTable`]).
    ///
    /// [`RoutingTable`]: crate::routing::RoutingTable
    pub fn set_route(mut self, destination: impl Into<Address>, next_hop: impl Into<Address>) -> Self {
        self.node
            .routes_mut()
            .update(destination.into(), next_hop.into());
        self
    }

    /// Finalise the node configuration and register it with the network.
    ///
    /// # Errors
    ///
    /// [`RegisterError::Duplicate`] if a node with this identifier is
    /// already registered.
    pub fn build(self) -> Result<NodeId, RegisterError> {
        let Self { node, network } = self;

        let id = node.id().clone();
        if network.nodes.contains_key(&id) {
            return Err(RegisterError::Duplicate { id });
        }

        network.nodes.insert(id.clone(), node);

        Ok(id)
    }
}

impl Network {
    /// Create a new, empty simulated network.
    ///
    /// The network has no nodes. Add some with [`new_node`](Network::new_node).
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            events: None,
        }
    }

    /// Create a new node and return a builder to configure it.
    ///
    /// The identifier is caller-assigned and must be unique within this
    /// network; [`NodeBuilder::build`] rejects duplicates.
    pub fn new_node(&mut self, id: impl Into<NodeId>) -> NodeBuilder<'_> {
        NodeBuilder {
            node: Node::new(id.into(), ForwardPolicy::default()),
            network: self,
        }
    }

    /// Subscribe to the structured event stream.
    ///
    /// Forwarding notifications ([`Event`]) are published on the returned
    /// receiver from this call on. Subscribing again replaces the previous
    /// subscription. Dropping the receiver silently stops emission — it
    /// never turns into an error on the forwarding path.
    pub fn subscribe(&mut self) -> EventReceiver {
        let (sender, receiver) = event_channel();
        self.events = Some(sender);
        receiver
    }

    fn emit(&mut self, event: Event) {
        let delivered = match &self.events {
            Some(events) => events.send(event),
            None => return,
        };
        if !delivered {
            self.events = None;
        }
    }

    /// Returns a shared reference to a node, if it exists.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Enqueue a packet into a node's inbound queue from outside the
    /// network (the producer side of the simulation).
    ///
    /// # Errors
    ///
    /// [`NodeNotFound`] if the node does not exist.
    pub fn inject(&mut self, node: &NodeId, packet: Packet) -> Result<(), NodeNotFound> {
        let Some(node) = self.nodes.get_mut(node) else {
            return Err(NodeNotFound { id: node.clone() });
        };
        node.receive(packet);
        Ok(())
    }

    /// Returns the current queue length of a node.
    ///
    /// # Errors
    ///
    /// [`NodeNotFound`] if the node does not exist.
    pub fn queue_len(&self, node: &NodeId) -> Result<usize, NodeNotFound> {
        let Some(node) = self.nodes.get(node) else {
            return Err(NodeNotFound { id: node.clone() });
        };
        Ok(node.queue_len())
    }

    /// Upsert an advisory routing entry on a node.
    ///
    /// This never changes forwarding behavior — the table is metadata
    /// only (see [`RoutingTable`]).
    ///
    /// # Errors
    ///
    /// [`NodeNotFound`] if the node does not exist.
    ///
    /// [`RoutingTable`]: crate::routing::RoutingTable
    pub fn update_route(
        &mut self,
        node: &NodeId,
        destination: impl Into<Address>,
        next_hop: impl Into<Address>,
    ) -> Result<(), NodeNotFound> {
        let Some(node) = self.nodes.get_mut(node) else {
            return Err(NodeNotFound { id: node.clone() });
        };
        node.routes_mut().update(destination.into(), next_hop.into());
        Ok(())
    }

    /// Trigger the routing optimization extension point on a node.
    ///
    /// No-op today (see [`Node::optimize_routing`]).
    ///
    /// # Errors
    ///
    /// [`NodeNotFound`] if the node does not exist.
    pub fn optimize_routing(&mut self, node: &NodeId) -> Result<(), NodeNotFound> {
        let Some(node) = self.nodes.get_mut(node) else {
            return Err(NodeNotFound { id: node.clone() });
        };
        node.optimize_routing();
        Ok(())
    }

    /// Forward one packet from `from`'s queue into `to`'s queue.
    ///
    /// The head packet of `from` is dequeued and handled according to
    /// `from`'s [`ForwardPolicy`]; the matching [`Event`] is published on
    /// the subscribed stream. An empty source queue yields
    /// [`ForwardOutcome::Idle`] — calling again any number of times stays
    /// a no-op.
    ///
    /// # Errors
    ///
    /// - [`ForwardError::SenderNotFound`] / [`ForwardError::RecipientNotFound`]
    ///   if either node does not exist.
    /// - [`ForwardError::SelfForward`] if `from == to`; a node cannot be
    ///   its own destination.
    pub fn forward(&mut self, from: &NodeId, to: &NodeId) -> Result<ForwardOutcome, ForwardError> {
        if from == to {
            return Err(ForwardError::SelfForward { node: from.clone() });
        }

        let [src, dst] = self.nodes.get_disjoint_mut([from, to]);
        let Some(src) = src else {
            return Err(ForwardError::SenderNotFound {
                sender: from.clone(),
            });
        };
        let Some(dst) = dst else {
            return Err(ForwardError::RecipientNotFound {
                recipient: to.clone(),
            });
        };

        let policy = src.policy();
        let outcome = src.forward_into(dst);

        match (&outcome, policy) {
            (ForwardOutcome::Forwarded(packet), ForwardPolicy::CoreOptimized) => {
                tracing::debug!(node = %from, packet = %packet.id(), "forwarded packet via optimized path");
                self.emit(Event::ForwardedOptimized {
                    node: from.clone(),
                    packet: packet.id(),
                });
            }
            (ForwardOutcome::Forwarded(packet), ForwardPolicy::EdgeQos { .. }) => {
                tracing::debug!(node = %from, packet = %packet.id(), "forwarded packet with QoS rules");
                self.emit(Event::ForwardedQos {
                    node: from.clone(),
                    packet: packet.id(),
                });
            }
            (ForwardOutcome::Dropped(packet), ForwardPolicy::EdgeQos { size_limit }) => {
                tracing::debug!(
                    node = %from,
                    packet = %packet.id(),
                    size = %packet.size(),
                    limit = %size_limit,
                    "dropped packet due to size limit"
                );
                self.emit(Event::DroppedSizeLimit {
                    node: from.clone(),
                    packet: packet.id(),
                    size: packet.size(),
                    limit: size_limit,
                });
            }
            _ => {}
        }

        Ok(outcome)
    }

    /// Returns a point-in-time snapshot of the network state.
    ///
    /// Includes per-node policy, queue length and routing-table size.
    pub fn stats(&self) -> NetworkStats {
        let mut nodes: Vec<NodeStats> = self
            .nodes
            .values()
            .map(|node| NodeStats {
                id: node.id().clone(),
                policy: node.policy(),
                queue_len: node.queue_len(),
                routes: node.routes().len(),
            })
            .collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));

        NetworkStats { nodes }
    }
}
