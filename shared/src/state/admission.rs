use crate::Tick;

/// Why an incoming fragment was not buffered. None of these are faults: they
/// are the expected steady state of lossy, bursty delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscardReason {
    /// This host is the authority and never reconciles against its own output
    Authority,
    /// The packet was sent before one that has already been admitted
    Stale,
    /// A state for this client tick, or a later one, was already consumed
    Consumed,
}

/// Outcome of ingesting one fragment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    /// A new packet was created for the tick
    Created { evicted: usize },
    /// The fragment was appended to an already buffered packet
    Coalesced { evicted: usize },
    Discarded(DiscardReason),
}

impl Admission {
    pub fn is_buffered(&self) -> bool {
        !matches!(self, Admission::Discarded(_))
    }
}

/// Decides whether a newly arrived fragment is stale or must be queued
#[derive(Default)]
pub struct AdmissionPolicy {
    last_ordered_tick: Option<Tick>,
    last_consumed_client_tick: Option<Tick>,
}

impl AdmissionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks a fragment for `client_tick` that arrived while the remote tick
    /// was estimated at `remote_tick`. On success the remote tick becomes the
    /// new ordering watermark.
    pub fn admit(
        &mut self,
        is_authority: bool,
        client_tick: Tick,
        remote_tick: Tick,
    ) -> Result<(), DiscardReason> {
        if is_authority {
            return Err(DiscardReason::Authority);
        }
        if let Some(last_ordered) = self.last_ordered_tick {
            if remote_tick < last_ordered {
                return Err(DiscardReason::Stale);
            }
        }
        self.last_ordered_tick = Some(remote_tick);

        if self.is_consumed(client_tick) {
            return Err(DiscardReason::Consumed);
        }
        Ok(())
    }

    /// Whether a state for `client_tick` would arrive too late to apply
    pub fn is_consumed(&self, client_tick: Tick) -> bool {
        self.last_consumed_client_tick
            .is_some_and(|consumed| client_tick <= consumed)
    }

    pub fn mark_consumed(&mut self, client_tick: Tick) {
        let consumed = self
            .last_consumed_client_tick
            .map_or(client_tick, |previous| previous.max(client_tick));
        self.last_consumed_client_tick = Some(consumed);
    }

    pub fn last_ordered_tick(&self) -> Option<Tick> {
        self.last_ordered_tick
    }

    pub fn last_consumed_client_tick(&self) -> Option<Tick> {
        self.last_consumed_client_tick
    }
}
