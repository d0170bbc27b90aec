/// Tick clock driven by hand from tests

use std::time::Duration;

use tether_shared::{Tick, TickClock};

#[derive(Clone, Debug)]
pub struct ManualClock {
    pub local_tick: Tick,
    pub estimated_remote_tick: Tick,
    pub tick_duration: Duration,
    pub low_performance: bool,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl ManualClock {
    /// 60 ticks per second, starting at the given ticks
    pub fn new(local_tick: Tick, estimated_remote_tick: Tick) -> Self {
        Self {
            local_tick,
            estimated_remote_tick,
            tick_duration: Duration::from_micros(16_667),
            low_performance: false,
        }
    }

    pub fn with_tick_duration(mut self, tick_duration: Duration) -> Self {
        self.tick_duration = tick_duration;
        self
    }

    /// Moves both clocks forward one tick
    pub fn advance(&mut self) {
        self.local_tick += 1;
        self.estimated_remote_tick += 1;
    }

    pub fn set(&mut self, local_tick: Tick, estimated_remote_tick: Tick) {
        self.local_tick = local_tick;
        self.estimated_remote_tick = estimated_remote_tick;
    }
}

impl TickClock for ManualClock {
    fn local_tick(&self) -> Tick {
        self.local_tick
    }

    fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    fn estimated_remote_tick(&self) -> Tick {
        self.estimated_remote_tick
    }

    fn is_low_performance(&self) -> bool {
        self.low_performance
    }
}
