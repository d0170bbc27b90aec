use std::default::Default;

use tether_shared::{ConfigError, ReconciliationConfig};

/// Contains Config properties which will be used by a Client
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Used to configure how received states are buffered & reconciled
    pub reconciliation: ReconciliationConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            reconciliation: ReconciliationConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.reconciliation.validate()
    }
}
