use crate::packet::Address;
use std::collections::HashMap;

/// An advisory mapping from destination [`Address`] to next-hop [`Address`].
///
/// Every [`Node`] carries one, but **no forwarding decision consults it**:
/// packets go wherever the caller points the forward call. The table is an
/// extension point for a future path-selection feature, kept observable so
/// that callers can verify routing updates never change forwarding
/// outcomes.
///
/// [`Node`]: crate::node::Node
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RoutingTable {
    routes: HashMap<Address, Address>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// upsert the next hop for a destination.
    ///
    /// Returns the previously recorded next hop, if any.
    pub fn update(&mut self, destination: Address, next_hop: Address) -> Option<Address> {
        self.routes.insert(destination, next_hop)
    }

    /// the recorded next hop for a destination, if any.
    pub fn next_hop(&self, destination: &Address) -> Option<&Address> {
        self.routes.get(destination)
    }

    pub fn remove(&mut self, destination: &Address) -> Option<Address> {
        self.routes.remove(destination)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
