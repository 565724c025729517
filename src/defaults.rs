use crate::size::PacketSize;

/// Default admission size limit for [`ForwardPolicy::EdgeQos`]
///
/// Packets strictly larger than this are dropped at an edge node
/// instead of being delivered. A packet of exactly this size is
/// still forwarded.
///
/// ```
/// # use fwdsim::defaults::*;
/// assert_eq!(
///     DEFAULT_SIZE_LIMIT.to_string(),
///     "2mb"
/// );
/// ```
///
/// [`ForwardPolicy::EdgeQos`]: crate::policy::ForwardPolicy::EdgeQos
pub const DEFAULT_SIZE_LIMIT: PacketSize = PacketSize::new(2 * 1_024 * 1_024);
