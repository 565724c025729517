use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, SystemTime},
};

/// A point in time, in milliseconds since the Unix epoch.
///
/// Packets record a [`Timestamp`] at construction. The resolution matches
/// what the forwarding policies need: none of them compare timestamps, the
/// value is carried as packet metadata for observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const ZERO: Self = Self(0);

    #[inline(always)]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    #[inline(always)]
    pub const fn as_millis(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// A source of [`Timestamp`]s.
///
/// The clock is injected wherever the simulation needs the current time
/// (today: [`PacketBuilder::clock`]) so that tests can supply a
/// deterministic [`ManualClock`] instead of reading the system clock.
///
/// [`PacketBuilder::clock`]: crate::packet::PacketBuilder::clock
pub trait Clock {
    /// the current time according to this clock.
    fn now(&self) -> Timestamp;
}

/// The wall clock. This is the default [`Clock`] used when building packets.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let since_epoch = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default();
        Timestamp::from_millis(since_epoch.as_millis() as u64)
    }
}

/// A clock that only moves when told to.
///
/// ```
/// use fwdsim::clock::{Clock as _, ManualClock, Timestamp};
/// use std::time::Duration;
///
/// let clock = ManualClock::new(Timestamp::from_millis(1_000));
/// assert_eq!(clock.now(), Timestamp::from_millis(1_000));
///
/// clock.advance(Duration::from_millis(250));
/// assert_eq!(clock.now(), Timestamp::from_millis(1_250));
/// ```
#[derive(Debug, Default)]
pub struct ManualClock(AtomicU64);

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self(AtomicU64::new(start.as_millis()))
    }

    /// move the clock forward by the given duration.
    pub fn advance(&self, duration: Duration) {
        self.0
            .fetch_add(duration.as_millis() as u64, Ordering::SeqCst);
    }

    /// set the clock to an absolute time, which may be in the past.
    pub fn set(&self, timestamp: Timestamp) {
        self.0.store(timestamp.as_millis(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.0.load(Ordering::SeqCst))
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
