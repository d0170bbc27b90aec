use std::default::Default;

use crate::error::ConfigError;

/// Extra ticks of remote-side slack required before a buffered state is
/// considered ready while running in [`StateOrder::Appended`]
pub const APPENDED_STATE_VARIANCE: u32 = 2;

/// When buffered authoritative states take effect relative to reconciliation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum StateOrder {
    /// Every buffered state is applied through the reconciliation cycle only
    #[default]
    Inserted,
    /// States may also be consumed eagerly into per-object future queues,
    /// which makes readiness wait for a little more remote progress
    Appended,
}

impl StateOrder {
    pub fn variance(self) -> u32 {
        match self {
            StateOrder::Inserted => 0,
            StateOrder::Appended => APPENDED_STATE_VARIANCE,
        }
    }
}

/// Contains Config properties which control how authoritative states are
/// buffered, reconciled & replayed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconciliationConfig {
    /// Number of ticks worth of authoritative states to hold back before
    /// reconciling. Higher values are more resilient to jitter but add latency.
    pub state_interpolation: u8,
    /// On the server, whether replicates beyond `maximum_server_replicates`
    /// are discarded (true) or consumed faster until the backlog clears (false)
    pub drop_excessive_replicates: bool,
    /// Most replicates the server buffers per connection before applying
    /// `drop_excessive_replicates`
    pub maximum_server_replicates: u8,
    /// See [`StateOrder`]
    pub state_order: StateOrder,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            state_interpolation: 1,
            drop_excessive_replicates: true,
            maximum_server_replicates: 15,
            state_order: StateOrder::Inserted,
        }
    }
}

impl ReconciliationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.maximum_server_replicates == 0 {
            return Err(ConfigError::ZeroServerReplicates {
                value: self.maximum_server_replicates,
            });
        }
        Ok(())
    }

    /// Largest number of buffered states tolerated before the oldest are
    /// evicted. Scaled from `state_interpolation` so bursty delivery does not
    /// immediately cause evictions, with a floor for small interpolation values.
    pub fn max_buffered_states(&self) -> usize {
        let interpolation = usize::from(self.state_interpolation);
        let base = (interpolation * 4 + 2).max(4);
        base + self.state_order.variance() as usize
    }
}
