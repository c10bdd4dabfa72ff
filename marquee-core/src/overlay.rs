//! Controls overlay
//!
//! Only one of the loading spinner, buffering spinner, transport controls or
//! failure message is ever on screen. [`OverlayPresentation`] encodes that as
//! a single enum derived from playback state and the overlay's own visibility.

use std::time::{Duration, Instant};

use marquee_model::FailureKind;

use crate::playback::{PlaybackController, PlaybackState};

/// What the overlay layer renders over the video
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPresentation {
    /// Waiting for the engine's load report
    Loading,

    /// Stall in progress; transport controls are hidden
    Buffering,

    Transport {
        visible: bool,
        playing: bool,
        ended: bool,
    },

    /// Terminal failure; transport controls are disabled
    Failed {
        kind: FailureKind,
        message: &'static str,
    },
}

impl OverlayPresentation {
    pub fn derive(playback: &PlaybackController, overlay: &ControlsOverlay) -> Self {
        match playback.state() {
            PlaybackState::Idle | PlaybackState::Loading => Self::Loading,
            PlaybackState::Buffering { .. } => Self::Buffering,
            PlaybackState::Failed(failure) => Self::Failed {
                kind: failure.kind,
                message: failure.kind.user_message(),
            },
            // Ended keeps the controls up so the user can restart
            PlaybackState::Ended => Self::Transport {
                visible: true,
                playing: false,
                ended: true,
            },
            state => Self::Transport {
                visible: overlay.is_visible(),
                playing: state.is_playing(),
                ended: false,
            },
        }
    }

    pub fn shows_transport(&self) -> bool {
        matches!(self, Self::Transport { visible: true, .. })
    }
}

/// Tap-to-toggle controls with optional auto-hide while playing.
#[derive(Debug, Clone)]
pub struct ControlsOverlay {
    visible: bool,
    last_interaction: Option<Instant>,
    autohide: Option<Duration>,
}

impl ControlsOverlay {
    pub fn new(autohide: Option<Duration>) -> Self {
        Self {
            visible: true,
            last_interaction: None,
            autohide,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn autohide(&self) -> Option<Duration> {
        self.autohide
    }

    /// Tap on the video surface.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.last_interaction = None;
        self.visible
    }

    /// Any interaction with a control keeps the overlay up. The idle period
    /// restarts at the next tick.
    pub fn touch(&mut self) {
        self.visible = true;
        self.last_interaction = None;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Hide after the configured idle period, but only while playing.
    /// Returns whether visibility changed.
    pub fn tick(&mut self, now: Instant, is_playing: bool) -> bool {
        let Some(autohide) = self.autohide else {
            return false;
        };
        if !self.visible || !is_playing {
            return false;
        }

        let idle_since = *self.last_interaction.get_or_insert(now);
        if now.saturating_duration_since(idle_since) >= autohide {
            self.visible = false;
            return true;
        }
        false
    }
}

impl Default for ControlsOverlay {
    fn default() -> Self {
        Self::new(None)
    }
}
