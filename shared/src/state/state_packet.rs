use crate::{pool::PooledBuffer, Channel, Tick};

/// One authoritative snapshot boundary: everything the server sent that
/// should be applied after `client_tick`'s speculative step
#[derive(Debug)]
pub struct StatePacket {
    client_tick: Tick,
    server_tick: Tick,
    fragments: Vec<(PooledBuffer, Channel)>,
}

impl StatePacket {
    pub fn new(client_tick: Tick, server_tick: Tick, fragment: PooledBuffer, channel: Channel) -> Self {
        Self {
            client_tick,
            server_tick,
            fragments: vec![(fragment, channel)],
        }
    }

    /// Appends another fragment targeting the same client tick. The server
    /// tick recorded on first arrival is kept.
    pub fn add_fragment(&mut self, fragment: PooledBuffer, channel: Channel) {
        self.fragments.push((fragment, channel));
    }

    pub fn client_tick(&self) -> Tick {
        self.client_tick
    }

    pub fn server_tick(&self) -> Tick {
        self.server_tick
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Fragments in arrival order
    pub fn fragments(&self) -> impl Iterator<Item = (&[u8], Channel)> {
        self.fragments
            .iter()
            .map(|(bytes, channel)| (bytes.as_slice(), *channel))
    }
}
