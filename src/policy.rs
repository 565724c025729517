use crate::{defaults::DEFAULT_SIZE_LIMIT, packet::Packet, size::PacketSize};

/// The forwarding policy of a [`Node`].
///
/// The FIFO dequeue-and-deliver baseline is shared by every variant;
/// a variant only contributes its delta (a notification class, an
/// admission rule).
///
/// | Variant         | Forwarding                      | Event on success       |
/// |-----------------|---------------------------------|------------------------|
/// | `Plain`         | FIFO dequeue-and-deliver        | none                   |
/// | `CoreOptimized` | FIFO dequeue-and-deliver        | `ForwardedOptimized`   |
/// | `EdgeQos`       | size-based admission, then FIFO | `ForwardedQos`         |
///
/// [`Node`]: crate::node::Node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForwardPolicy {
    /// Baseline FIFO forwarding, no admission rule, no event.
    #[default]
    Plain,
    /// Baseline FIFO forwarding. Every successfully forwarded packet is
    /// reported with an [`Event::ForwardedOptimized`] notification.
    ///
    /// [`Event::ForwardedOptimized`]: crate::event::Event::ForwardedOptimized
    CoreOptimized,
    /// Admission-controlled forwarding: the head packet is dropped
    /// (consumed, not delivered) when its size is **strictly** greater
    /// than `size_limit`. A packet of exactly `size_limit` is forwarded.
    EdgeQos {
        /// maximum admissible packet size
        size_limit: PacketSize,
    },
}

impl ForwardPolicy {
    /// the edge admission policy with the default 2 MiB size limit
    /// ([`DEFAULT_SIZE_LIMIT`]).
    pub const fn edge_qos() -> Self {
        Self::EdgeQos {
            size_limit: DEFAULT_SIZE_LIMIT,
        }
    }

    /// does this policy let the given packet through?
    ///
    /// Always `true` for [`Plain`] and [`CoreOptimized`]; the size
    /// comparison only exists for [`EdgeQos`].
    ///
    /// [`Plain`]: ForwardPolicy::Plain
    /// [`CoreOptimized`]: ForwardPolicy::CoreOptimized
    /// [`EdgeQos`]: ForwardPolicy::EdgeQos
    pub fn admits(&self, packet: &Packet) -> bool {
        match self {
            Self::Plain | Self::CoreOptimized => true,
            Self::EdgeQos { size_limit } => packet.size() <= *size_limit,
        }
    }
}
