//! Network statistics and observability types.
//!
//! [`NetworkStats`] provides a point-in-time snapshot of the network state.
//! Obtain one via [`Network::stats`](crate::network::Network::stats).

use crate::{node::NodeId, policy::ForwardPolicy};

/// Snapshot of statistics for a single node.
#[derive(Debug, Clone)]
pub struct NodeStats {
    /// The node's identifier.
    pub id: NodeId,
    /// The node's forwarding policy.
    pub policy: ForwardPolicy,
    /// Packets currently held in the inbound queue.
    pub queue_len: usize,
    /// Number of advisory routing entries on this node.
    pub routes: usize,
}

/// Point-in-time snapshot of the entire network state.
#[derive(Debug, Clone)]
pub struct NetworkStats {
    /// Per-node statistics, ordered by node identifier.
    pub nodes: Vec<NodeStats>,
}
