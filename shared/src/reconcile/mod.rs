pub mod drop_throttle;
pub mod hooks;
pub mod replay_driver;
pub mod replay_window;
pub mod scheduler;
pub mod stats;
