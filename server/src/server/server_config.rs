use std::default::Default;

use tether_shared::{ConfigError, ReconciliationConfig};

/// Contains Config properties which will be used by the Server
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bounds the per-connection replicate queues. `state_interpolation` is
    /// also used to estimate a client's replicate tick before any of its
    /// input has been consumed.
    pub reconciliation: ReconciliationConfig,
    /// Number of server ticks between state update flushes
    pub flush_interval_ticks: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            reconciliation: ReconciliationConfig::default(),
            flush_interval_ticks: 1,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.reconciliation.validate()?;
        if self.flush_interval_ticks == 0 {
            return Err(ConfigError::ZeroFlushInterval {
                value: self.flush_interval_ticks,
            });
        }
        Ok(())
    }
}
