use crate::{pool::PooledBuffer, ConnectionKey, Tick};

/// A connection the authoritative side flushes state updates to
pub trait OutgoingConnection {
    fn key(&self) -> ConnectionKey;

    /// Latest local tick the peer has reported to us
    fn last_known_local_tick(&self) -> Tick;

    /// Latest peer tick whose input has been consumed, if any has been
    fn last_replicate_tick(&self) -> Option<Tick>;

    /// Object fragments accumulated since the previous flush, in write order
    fn pending_fragments(&self) -> &[PooledBuffer];

    fn clear_pending_fragments(&mut self);
}

/// The tick written into a connection's next state update. Without a consumed
/// input to go on, backs off twice the interpolation depth from the peer's
/// last reported tick.
pub fn estimated_replicate_tick<C: OutgoingConnection + ?Sized>(
    connection: &C,
    interpolation: u8,
) -> Tick {
    match connection.last_replicate_tick() {
        Some(tick) => tick,
        None => connection
            .last_known_local_tick()
            .saturating_sub(2 * Tick::from(interpolation)),
    }
}
