/// Skips a bounded run of ready reconciliations while the host is running at
/// a sustained low frame rate.
///
/// Up to `max(1, tick_rate / 3)` consecutive reconciliations are dropped, then
/// one goes through and the count restarts. Leaving low-performance mode
/// resets the count. A dropped reconciliation discards its state.
#[derive(Default)]
pub struct DropThrottle {
    dropped: u32,
}

impl DropThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reconcile_value(tick_rate: u32) -> u32 {
        (tick_rate / 3).max(1)
    }

    /// Whether the next ready reconciliation should be dropped
    pub fn should_drop(&mut self, low_performance: bool, tick_rate: u32) -> bool {
        if !low_performance {
            self.dropped = 0;
            return false;
        }

        if self.dropped >= Self::reconcile_value(tick_rate) {
            self.dropped = 0;
            false
        } else {
            self.dropped += 1;
            true
        }
    }

    pub fn dropped_in_a_row(&self) -> u32 {
        self.dropped
    }
}
