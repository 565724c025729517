use std::{convert::Infallible, fmt, str};

/// The identifier of a node in the simulated network.
///
/// Node identifiers are chosen by the caller (`"edge-1"`, `"core-1"`, ...)
/// and must be unique within a [`Network`]: registering the same identifier
/// twice is rejected with [`RegisterError::Duplicate`].
///
/// [`Network`]: crate::network::Network
/// [`RegisterError::Duplicate`]: crate::network::RegisterError::Duplicate
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(Box<str>);

impl NodeId {
    pub fn new(id: impl Into<Box<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl str::FromStr for NodeId {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
