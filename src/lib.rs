//! Deterministic packet-forwarding simulation primitives.
//!
//! `fwdsim` models a small network of forwarding nodes. Each [`Node`]
//! holds an unbounded FIFO queue of [`Packet`]s and a [`ForwardPolicy`]
//! applied when the head packet is forwarded: plain delivery, core
//! delivery with a notification, or edge admission control that drops
//! packets over a size limit.
//!
//! Everything is synchronous and single-threaded. The [`Network`] owns
//! all nodes, and the observable effects (queue lengths, the [`Event`]
//! stream from [`Network::subscribe`]) are deterministic for a given
//! call sequence.
//!
//! ```
//! use fwdsim::{
//!     Event, ForwardPolicy, Network, Packet, PacketId,
//! };
//!
//! let mut network = Network::new();
//! let edge = network
//!     .new_node("edge-1")
//!     .set_policy(ForwardPolicy::edge_qos())
//!     .build()
//!     .unwrap();
//! let core = network
//!     .new_node("core-1")
//!     .set_policy(ForwardPolicy::CoreOptimized)
//!     .build()
//!     .unwrap();
//! let mut events = network.subscribe();
//!
//! let packet = Packet::builder()
//!     .id(PacketId::new(401))
//!     .source("H1")
//!     .destination("H2")
//!     .size(3_000_000)
//!     .build()
//!     .unwrap();
//! network.inject(&edge, packet).unwrap();
//!
//! // 3_000_000 bytes > 2 MiB: consumed by the edge, never delivered.
//! network.forward(&edge, &core).unwrap();
//! assert_eq!(network.queue_len(&core).unwrap(), 0);
//! assert!(matches!(
//!     events.try_receive(),
//!     Some(Event::DroppedSizeLimit { .. })
//! ));
//! ```

pub mod clock;
pub mod defaults;
pub mod event;
pub mod network;
pub mod node;
pub mod packet;
pub mod policy;
pub mod routing;
pub mod size;
pub mod stats;

pub use self::{
    clock::{Clock, ManualClock, SystemClock, Timestamp},
    event::{Event, EventReceiver},
    network::{ForwardError, Network, NodeBuilder, NodeNotFound, RegisterError},
    node::{ForwardOutcome, Node, NodeId},
    packet::{Address, Packet, PacketBuilder, PacketId},
    policy::ForwardPolicy,
    routing::RoutingTable,
    size::PacketSize,
    stats::{NetworkStats, NodeStats},
};
