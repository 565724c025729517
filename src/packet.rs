use crate::{
    clock::{Clock, SystemClock, Timestamp},
    size::PacketSize,
};
use anyhow::{Result, bail};
use std::{fmt, str};

/// # [`Packet`] Identifier
///
/// During the lifetime of the packet, this identifier can uniquely
/// identify the packet.
///
/// Unlike node identifiers, packet identifiers are assigned by the
/// caller. Uniqueness is the caller's responsibility and is not
/// enforced by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PacketId(u64);

impl PacketId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PacketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

impl str::FromStr for PacketId {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let id = u64::from_str_radix(s, 16)?;
        Ok(Self(id))
    }
}

/// An endpoint address as carried by packets and routing tables.
///
/// Addresses are opaque to the simulation: they name the origin and the
/// intended destination of a [`Packet`], and they key the advisory
/// [`RoutingTable`] entries. No forwarding decision is derived from them.
///
/// [`RoutingTable`]: crate::routing::RoutingTable
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(Box<str>);

impl Address {
    pub fn new(address: impl Into<Box<str>>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Address {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<String> for Address {
    fn from(address: String) -> Self {
        Self::new(address)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// # A unit of data in transit
///
/// A [`Packet`] is immutable once built: an identifier, the source and
/// destination [`Address`]es, the payload [`PacketSize`] and the
/// [`Timestamp`] recorded at construction. It moves between node queues
/// as a whole; the simulation never rewrites any of its fields.
///
/// Build one with [`Packet::builder`]:
///
/// ```
/// use fwdsim::packet::{Packet, PacketId};
///
/// let packet = Packet::builder()
///     .id(PacketId::new(401))
///     .source("H1")
///     .destination("H2")
///     .size(1_000_000)
///     .build()
///     .unwrap();
///
/// assert_eq!(packet.size().into_bytes(), 1_000_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    id: PacketId,
    source: Address,
    destination: Address,
    size: PacketSize,
    timestamp: Timestamp,
}

/// Builder for a [`Packet`].
///
/// `id`, `source`, `destination` and `size` are mandatory. The creation
/// [`Timestamp`] is read from the configured [`Clock`] at [`build`] time,
/// defaulting to [`SystemClock`]; tests inject a
/// [`ManualClock`](crate::clock::ManualClock) instead.
///
/// [`build`]: PacketBuilder::build
pub struct PacketBuilder {
    id: Option<PacketId>,
    source: Option<Address>,
    destination: Option<Address>,
    size: Option<PacketSize>,
    timestamp: Option<Timestamp>,
}

impl Packet {
    pub fn builder() -> PacketBuilder {
        PacketBuilder::new()
    }

    pub fn id(&self) -> PacketId {
        self.id
    }

    pub fn source(&self) -> &Address {
        &self.source
    }

    pub fn destination(&self) -> &Address {
        &self.destination
    }

    pub fn size(&self) -> PacketSize {
        self.size
    }

    /// the time this packet was built, as read from the builder's clock.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

impl Default for PacketBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            source: None,
            destination: None,
            size: None,
            timestamp: None,
        }
    }

    pub fn id(mut self, id: PacketId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn source(mut self, source: impl Into<Address>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn destination(mut self, destination: impl Into<Address>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn size(mut self, bytes: u64) -> Self {
        self.size = Some(PacketSize::new(bytes));
        self
    }

    /// read the creation time from the given clock instead of the
    /// system clock.
    pub fn clock(mut self, clock: &impl Clock) -> Self {
        self.timestamp = Some(clock.now());
        self
    }

    /// set the creation time explicitly.
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn build(self) -> Result<Packet> {
        let Some(id) = self.id else {
            bail!("Missing packet identifier (`id')")
        };
        let Some(source) = self.source else {
            bail!("Missing origin information (`source')")
        };
        let Some(destination) = self.destination else {
            bail!("Missing recipient information (`destination')")
        };
        let Some(size) = self.size else {
            bail!("Missing payload size (`size')")
        };
        let timestamp = self.timestamp.unwrap_or_else(|| SystemClock.now());

        Ok(Packet {
            id,
            source,
            destination,
            size,
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn packet() -> PacketBuilder {
        Packet::builder()
            .id(PacketId::new(401))
            .source("H1")
            .destination("H2")
            .size(1_000_000)
    }

    #[test]
    fn packet_id_display() {
        let id = PacketId::new(42);
        assert_eq!(id.to_string(), "0x000000000000002a");
    }

    #[test]
    fn packet_id_parse() {
        assert_eq!(
            "0x000000000000002a".parse::<PacketId>().unwrap(),
            PacketId::new(42)
        );
        assert_eq!("2a".parse::<PacketId>().unwrap(), PacketId::new(42));
        assert!("not an id".parse::<PacketId>().is_err());
    }

    #[test]
    fn builder_missing_id() {
        let Err(error) = Packet::builder().build() else {
            panic!("Expecting an error because missing the `id'")
        };

        assert_eq!(error.to_string(), "Missing packet identifier (`id')");
    }

    #[test]
    fn builder_missing_source() {
        let Err(error) = Packet::builder().id(PacketId::new(1)).build() else {
            panic!("Expecting an error because missing the `source'")
        };

        assert_eq!(error.to_string(), "Missing origin information (`source')");
    }

    #[test]
    fn builder_missing_destination() {
        let Err(error) = Packet::builder()
            .id(PacketId::new(1))
            .source("H1")
            .build()
        else {
            panic!("Expecting an error because missing the `destination'")
        };

        assert_eq!(
            error.to_string(),
            "Missing recipient information (`destination')"
        );
    }

    #[test]
    fn builder_missing_size() {
        let Err(error) = Packet::builder()
            .id(PacketId::new(1))
            .source("H1")
            .destination("H2")
            .build()
        else {
            panic!("Expecting an error because missing the `size'")
        };

        assert_eq!(error.to_string(), "Missing payload size (`size')");
    }

    #[test]
    fn builder_complete() {
        let packet = packet().build().unwrap();

        assert_eq!(packet.id(), PacketId::new(401));
        assert_eq!(packet.source(), &Address::from("H1"));
        assert_eq!(packet.destination(), &Address::from("H2"));
        assert_eq!(packet.size(), PacketSize::new(1_000_000));
    }

    #[test]
    fn builder_with_manual_clock() {
        let clock = ManualClock::new(Timestamp::from_millis(1_234));
        let packet = packet().clock(&clock).build().unwrap();

        assert_eq!(packet.timestamp(), Timestamp::from_millis(1_234));
    }

    #[test]
    fn builder_with_explicit_timestamp() {
        let packet = packet()
            .timestamp(Timestamp::from_millis(99))
            .build()
            .unwrap();

        assert_eq!(packet.timestamp(), Timestamp::from_millis(99));
    }

    #[test]
    fn builder_defaults_to_system_clock() {
        let packet = packet().build().unwrap();
        assert!(packet.timestamp() > Timestamp::ZERO);
    }

    #[test]
    fn address_display() {
        assert_eq!(Address::from("edge-1").to_string(), "edge-1");
        assert_eq!(Address::new(String::from("H2")).as_str(), "H2");
    }
}
