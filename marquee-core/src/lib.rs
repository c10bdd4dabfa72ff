//! # marquee core
//!
//! State and sequencing for a full-screen playback screen. The native engine
//! decodes and renders; this crate decides what to tell it and how to present
//! what it reports.
//!
//! ## Components
//!
//! - [`playback`]: play/pause/buffering/position state machine, seeking and
//!   time formatting
//! - [`tracks`]: track catalog and the draft/commit selection protocol
//! - [`display`]: mute, volume, resize, background and picture-in-picture
//!   flags
//! - [`lifecycle`]: orientation lock and navigation bar bound to mount,
//!   unmount and hardware back
//! - [`overlay`]: controls visibility and the mutually exclusive overlay
//!   presentations
//! - [`screen`]: the screen controller composing all of the above
//!
//! Everything runs on one logical thread. Engine commands are fire-and-forget
//! and engine events may arrive in any order relative to them; a seek is only
//! guaranteed visible after the next progress report.

pub mod display;
pub mod error;
pub mod lifecycle;
pub mod overlay;
pub mod playback;
pub mod screen;
pub mod tracks;

pub use display::{DisplayModeManager, ZoomAffordance};
pub use error::{CommandError, LifecycleError};
pub use lifecycle::LifecycleOrientationGuard;
pub use overlay::{ControlsOverlay, OverlayPresentation};
pub use playback::{
    BufferingWatchdog, PlaybackController, PlaybackState, SkipDirection,
    format_duration,
};
pub use screen::{Platform, PlayerScreen};
pub use tracks::TrackSelectionNegotiator;
