use std::collections::{HashMap, VecDeque};

use crate::{state::state_packet::StatePacket, Tick};

/// FIFO of buffered [`StatePacket`]s in arrival order, paired with a tick
/// lookup so several fragments for the same client tick coalesce.
///
/// Every tick in the queue has exactly one packet in the lookup and vice
/// versa. Queue order follows arrival, not `client_tick`.
#[derive(Default)]
pub struct StateBuffer {
    order: VecDeque<Tick>,
    packets: HashMap<Tick, StatePacket>,
}

impl StateBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, client_tick: Tick) -> bool {
        self.packets.contains_key(&client_tick)
    }

    pub fn get_mut(&mut self, client_tick: Tick) -> Option<&mut StatePacket> {
        self.packets.get_mut(&client_tick)
    }

    /// Appends a packet for a tick not yet buffered. Hands the packet back if
    /// that tick is already present.
    pub fn push(&mut self, packet: StatePacket) -> Result<(), StatePacket> {
        let client_tick = packet.client_tick();
        if self.packets.contains_key(&client_tick) {
            return Err(packet);
        }
        self.order.push_back(client_tick);
        self.packets.insert(client_tick, packet);
        Ok(())
    }

    /// Oldest buffered packet by arrival
    pub fn front(&self) -> Option<&StatePacket> {
        self.order
            .front()
            .and_then(|client_tick| self.packets.get(client_tick))
    }

    /// Removes the oldest packet from both the queue and the lookup
    pub fn pop_front(&mut self) -> Option<StatePacket> {
        let client_tick = self.order.pop_front()?;
        self.packets.remove(&client_tick)
    }

    /// Ticks in arrival order
    pub fn ticks(&self) -> impl Iterator<Item = Tick> + '_ {
        self.order.iter().copied()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.packets.clear();
    }
}
