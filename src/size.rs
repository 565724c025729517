use anyhow::{bail, ensure};
use logos::{Lexer, Logos};
use std::{fmt, str::FromStr};

/// The size of a [`Packet`]'s payload, in bytes.
///
/// The derived [`megabytes`] measure is what the edge admission policy
/// compares against its size limit (see [`ForwardPolicy::EdgeQos`]).
///
/// # Example
///
/// ```
/// use fwdsim::size::PacketSize;
///
/// let size = PacketSize::new(3_000_000);
/// assert!(size.megabytes() > 2.0);
///
/// let parsed: PacketSize = "2mb".parse().unwrap();
/// assert_eq!(parsed, PacketSize::new(2 * 1_024 * 1_024));
/// ```
///
/// [`Packet`]: crate::packet::Packet
/// [`megabytes`]: PacketSize::megabytes
/// [`ForwardPolicy::EdgeQos`]: crate::policy::ForwardPolicy::EdgeQos
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PacketSize(
    /// bytes
    u64,
);

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\n\f]+")] // Ignore this regex pattern between tokens
enum SizeToken {
    #[regex("b")]
    B,
    #[regex("kb")]
    Kb,
    #[regex("mb")]
    Mb,
    #[regex("gb")]
    Gb,

    #[regex("[0-9]+")]
    Value,
}

const K: u64 = 1_024;
const M: u64 = 1_024 * 1_024;
const G: u64 = 1_024 * 1_024 * 1_024;

impl PacketSize {
    /// The `0` bytes size.
    ///
    /// An empty packet still transits through the simulation; only the
    /// admission policies care about the size.
    pub const ZERO: Self = Self::new(0);

    /// create a new [`PacketSize`] from a number of bytes.
    #[inline(always)]
    pub const fn new(bytes: u64) -> Self {
        Self(bytes)
    }

    /// the number of bytes.
    #[inline(always)]
    pub const fn into_bytes(self) -> u64 {
        self.0
    }

    /// the size expressed in megabytes (bytes / 1024²).
    ///
    /// Pure and deterministic for a given byte count.
    ///
    /// ```
    /// # use fwdsim::size::PacketSize;
    /// assert_eq!(PacketSize::new(2 * 1_024 * 1_024).megabytes(), 2.0);
    /// ```
    pub fn megabytes(self) -> f64 {
        self.0 as f64 / M as f64
    }
}

impl fmt::Display for PacketSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        let k = self.0 / K;
        let m = self.0 / M;
        let g = self.0 / G;

        let v_r = self.0 % K;
        let k_r = self.0 % M;
        let m_r = self.0 % G;

        if v < K || v_r != 0 {
            write!(f, "{v}b")
        } else if v < M || k_r != 0 {
            write!(f, "{k}kb")
        } else if v < G || m_r != 0 {
            write!(f, "{m}mb")
        } else {
            write!(f, "{g}gb")
        }
    }
}

impl FromStr for PacketSize {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lex = Lexer::<'_, SizeToken>::new(s);

        let Some(Ok(SizeToken::Value)) = lex.next() else {
            bail!("Expecting to parse a number")
        };
        let number: u64 = lex.slice().parse()?;
        let Some(Ok(token)) = lex.next() else {
            bail!("Expecting to parse a unit")
        };
        let bytes = match token {
            SizeToken::B => number,
            SizeToken::Kb => number * K,
            SizeToken::Mb => number * M,
            SizeToken::Gb => number * G,
            SizeToken::Value => bail!("Expecting to parse a unit (b, kb, ...)"),
        };

        ensure!(
            lex.next().is_none(),
            "Not expecting any other tokens to parse a packet size"
        );

        Ok(Self(bytes))
    }
}
