/// One fixed-step simulation frame. Ticks only ever increase.
pub type Tick = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostType {
    Server,
    Client,
}

impl HostType {
    /// Whether this host produces the authoritative state
    pub fn is_authority(self) -> bool {
        self == HostType::Server
    }
}

/// Delivery guarantee requested from the transport
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Unreliable,
    Reliable,
}

/// Identifies one live connection on the authoritative side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionKey(u64);

impl ConnectionKey {
    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}
