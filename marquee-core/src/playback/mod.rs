//! Playback domain
//!
//! Owns play/pause/buffering/position state and issues transport commands to
//! the engine.

pub mod controller;
pub mod format;
pub mod state;
pub mod watchdog;

pub use controller::{PlaybackController, SkipDirection};
pub use format::format_duration;
pub use state::{PlaybackEvent, PlaybackState, TransitionResult};
pub use watchdog::BufferingWatchdog;
