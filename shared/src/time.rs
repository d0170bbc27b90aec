use std::time::Duration;

use crate::Tick;

/// Fixed-step clock the reconciliation core reads from. Implemented by the
/// host application's time manager.
pub trait TickClock {
    /// Current local tick. Its live simulation step has not run yet when the
    /// scheduler is invoked.
    fn local_tick(&self) -> Tick;

    /// Duration of one fixed tick
    fn tick_duration(&self) -> Duration;

    /// Remote tick estimated from the timestamp of the last received packet
    fn estimated_remote_tick(&self) -> Tick;

    /// Whether the host is sustaining a frame rate too low to keep up
    fn is_low_performance(&self) -> bool {
        false
    }

    /// Ticks per second, rounded, never below 1
    fn tick_rate(&self) -> u32 {
        tick_rate(self.tick_duration())
    }
}

/// Ticks per second for the given tick duration, rounded, never below 1
pub fn tick_rate(tick_duration: Duration) -> u32 {
    let seconds = tick_duration.as_secs_f64();
    if seconds <= 0.0 {
        return 1;
    }
    ((1.0 / seconds).round() as u32).max(1)
}
