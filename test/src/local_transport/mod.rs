/// In-memory transport for E2E testing
/// Queues packets per connection without network I/O, optionally through a
/// lossy, reordering link

use std::collections::{HashMap, HashSet, VecDeque};

use log::trace;

use tether_shared::{Channel, ConnectionKey, Transport, TransportError, MTU_SIZE_BYTES};

/// Seeded loss & reordering applied to unreliable packets. Reliable packets
/// always arrive, in order.
pub struct LinkConditioner {
    rng: fastrand::Rng,
    /// Chance in `0.0..=1.0` that an unreliable packet is lost
    pub loss: f32,
    /// Chance in `0.0..=1.0` that an unreliable packet overtakes the one
    /// queued before it
    pub reorder: f32,
}

impl LinkConditioner {
    pub fn new(seed: u64, loss: f32, reorder: f32) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            loss,
            reorder,
        }
    }

    fn should_lose(&mut self) -> bool {
        self.rng.f32() < self.loss
    }

    fn should_reorder(&mut self) -> bool {
        self.rng.f32() < self.reorder
    }
}

pub struct LocalTransport {
    queues: HashMap<ConnectionKey, VecDeque<(Channel, Vec<u8>)>>,
    disconnected: HashSet<ConnectionKey>,
    max_unreliable_payload: usize,
    conditioner: Option<LinkConditioner>,
    lost: usize,
}

impl Default for LocalTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalTransport {
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
            disconnected: HashSet::new(),
            max_unreliable_payload: MTU_SIZE_BYTES,
            conditioner: None,
            lost: 0,
        }
    }

    pub fn with_max_unreliable_payload(mut self, max_unreliable_payload: usize) -> Self {
        self.max_unreliable_payload = max_unreliable_payload;
        self
    }

    pub fn with_conditioner(mut self, conditioner: LinkConditioner) -> Self {
        self.conditioner = Some(conditioner);
        self
    }

    /// Sends to `key` fail from now on
    pub fn disconnect(&mut self, key: ConnectionKey) {
        self.disconnected.insert(key);
    }

    pub fn receive(&mut self, key: &ConnectionKey) -> Option<(Channel, Vec<u8>)> {
        self.queues.get_mut(key)?.pop_front()
    }

    pub fn drain(&mut self, key: &ConnectionKey) -> Vec<(Channel, Vec<u8>)> {
        self.queues
            .get_mut(key)
            .map(|queue| queue.drain(..).collect())
            .unwrap_or_default()
    }

    pub fn queued(&self, key: &ConnectionKey) -> usize {
        self.queues.get(key).map_or(0, VecDeque::len)
    }

    /// Unreliable packets the conditioner has thrown away
    pub fn lost(&self) -> usize {
        self.lost
    }
}

impl Transport for LocalTransport {
    fn send(
        &mut self,
        channel: Channel,
        connection: ConnectionKey,
        bytes: &[u8],
    ) -> Result<(), TransportError> {
        if self.disconnected.contains(&connection) {
            return Err(TransportError::NotConnected {
                connection: connection.to_u64(),
            });
        }

        let queue = self.queues.entry(connection).or_default();
        let packet = (channel, bytes.to_vec());

        if channel == Channel::Unreliable {
            if let Some(conditioner) = self.conditioner.as_mut() {
                if conditioner.should_lose() {
                    trace!("link conditioner lost {} bytes", bytes.len());
                    self.lost += 1;
                    return Ok(());
                }
                if !queue.is_empty() && conditioner.should_reorder() {
                    let index = queue.len() - 1;
                    queue.insert(index, packet);
                    return Ok(());
                }
            }
        }

        queue.push_back(packet);
        Ok(())
    }

    fn max_unreliable_payload(&self) -> usize {
        self.max_unreliable_payload
    }
}
