//! Screen controller
//!
//! [`PlayerScreen`] owns one playback session for the lifetime of one mounted
//! screen. It routes engine events and user gestures to the component that
//! owns the concern and reports fatal failures to the host exactly once.

use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use marquee_contracts::back::{BackDisposition, BackHandlerRegistry};
use marquee_contracts::device::OrientationGuard;
use marquee_contracts::engine::VideoEngine;
use marquee_contracts::host::{DismissReason, HostNavigator};
use marquee_model::{
    EngineEvent, FailureKind, PlaybackFailure, PlaybackSession, PlayerFeatures,
    ResizeMode, TrackChoice, TrackKind, secs_to_millis,
};
use tracing::{debug, error, info, warn};

use crate::display::DisplayModeManager;
use crate::error::{CommandError, LifecycleError};
use crate::lifecycle::LifecycleOrientationGuard;
use crate::overlay::{ControlsOverlay, OverlayPresentation};
use crate::playback::{
    BufferingWatchdog, PlaybackController, SkipDirection, TransitionResult,
};
use crate::tracks::TrackSelectionNegotiator;

/// Host-provided collaborators shared with the rest of the app.
#[derive(Clone)]
pub struct Platform {
    pub device: Rc<dyn OrientationGuard>,
    pub back: Rc<dyn BackHandlerRegistry>,
    pub host: Rc<dyn HostNavigator>,
}

impl fmt::Debug for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Platform").finish_non_exhaustive()
    }
}

pub struct PlayerScreen {
    session: PlaybackSession,
    features: PlayerFeatures,
    engine: Box<dyn VideoEngine>,
    host: Rc<dyn HostNavigator>,

    playback: PlaybackController,
    tracks: TrackSelectionNegotiator,
    display: DisplayModeManager,
    lifecycle: LifecycleOrientationGuard,
    overlay: ControlsOverlay,
    watchdog: BufferingWatchdog,
}

impl PlayerScreen {
    /// Build the screen. Features must be fully resolved here; nothing is
    /// looked up later.
    pub fn new(
        session: PlaybackSession,
        features: PlayerFeatures,
        engine: Box<dyn VideoEngine>,
        platform: Platform,
    ) -> Self {
        Self {
            playback: PlaybackController::new(&features),
            tracks: TrackSelectionNegotiator::new(),
            display: DisplayModeManager::new(&features),
            lifecycle: LifecycleOrientationGuard::new(
                platform.device,
                platform.back,
            ),
            overlay: ControlsOverlay::new(features.controls_autohide),
            watchdog: BufferingWatchdog::new(features.buffering_stall_timeout),
            session,
            features,
            engine,
            host: platform.host,
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn features(&self) -> &PlayerFeatures {
        &self.features
    }

    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    pub fn tracks(&self) -> &TrackSelectionNegotiator {
        &self.tracks
    }

    pub fn display(&self) -> &DisplayModeManager {
        &self.display
    }

    pub fn overlay(&self) -> &ControlsOverlay {
        &self.overlay
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle.is_mounted()
    }

    pub fn presentation(&self) -> OverlayPresentation {
        OverlayPresentation::derive(&self.playback, &self.overlay)
    }

    /// Lock the device chrome, open the source and push display properties.
    pub fn mount(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.on_mount()?;
        info!(session = %self.session.id, "Mounting player screen");

        if let Err(err) = self.playback.load(&self.session, self.engine.as_mut()) {
            warn!("Source not opened on mount: {err}");
        }
        self.display.sync_all(self.engine.as_mut());
        Ok(())
    }

    /// Restore device chrome and release the back registration. The session
    /// and catalog go with the screen.
    pub fn unmount(mut self) -> Result<(), LifecycleError> {
        info!(session = %self.session.id, "Unmounting player screen");
        self.lifecycle.on_unmount()
    }

    pub fn hardware_back(&self) -> BackDisposition {
        debug!("Hardware back pressed");
        self.lifecycle.on_hardware_back()
    }

    /// Feed one engine event. Times arrive in seconds.
    pub fn handle_engine_event(&mut self, event: EngineEvent, now: Instant) {
        match event {
            EngineEvent::Load(info) => {
                let duration_ms = secs_to_millis(info.duration).unwrap_or_else(|| {
                    warn!("Engine reported invalid duration {}", info.duration);
                    0
                });
                let first_load = !self.playback.state().is_ready();
                if let TransitionResult::InvalidTransition { .. } =
                    self.playback.on_load(duration_ms)
                {
                    return;
                }
                self.tracks.load_catalog(info.tracks);
                if first_load {
                    self.overlay.touch();
                }
                self.sync_watchdog(now);
            }
            EngineEvent::Progress { current_time } => {
                match secs_to_millis(current_time) {
                    Some(ms) => {
                        self.playback.on_progress(ms);
                    }
                    None => warn!("Ignoring invalid progress time {current_time}"),
                }
            }
            EngineEvent::Buffer { is_buffering } => {
                self.playback.on_buffering_changed(is_buffering);
                self.sync_watchdog(now);
            }
            EngineEvent::End => {
                self.playback.on_end();
                self.watchdog.disarm();
            }
            EngineEvent::Error(err) => {
                self.fail(err.classify());
            }
        }
    }

    /// Timer pulse: stall escalation and controls auto-hide. Returns whether
    /// anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(stalled) = self.watchdog.expired(now) {
            self.fail(PlaybackFailure::new(
                FailureKind::NetworkError,
                format!("buffering stalled for {}s", stalled.as_secs()),
            ));
            return true;
        }
        self.overlay.tick(now, self.playback.is_playing())
    }

    /// Terminal failure: stop accepting commands and ask the host to dismiss
    /// the screen. Later failures are ignored.
    pub fn fail(&mut self, failure: PlaybackFailure) {
        self.watchdog.disarm();
        if !self.playback.on_fatal_error(failure.clone()) {
            debug!(
                "Ignoring failure while {}: {failure}",
                self.playback.state().name()
            );
            return;
        }
        error!(session = %self.session.id, "Playback failed: {failure}");
        self.tracks.abandon();
        self.host.dismiss(DismissReason::PlaybackFailed(failure));
    }

    fn sync_watchdog(&mut self, now: Instant) {
        if self.playback.is_stalled() {
            self.watchdog.arm(now);
        } else {
            self.watchdog.disarm();
        }
    }

    /// Tap on the video surface toggles the controls.
    pub fn tap_video(&mut self) -> bool {
        self.overlay.toggle()
    }

    pub fn toggle_play_pause(&mut self) -> Result<(), CommandError> {
        self.overlay.touch();
        self.playback.toggle_play_pause(self.engine.as_mut())
    }

    pub fn skip(&mut self, direction: SkipDirection) -> Result<u64, CommandError> {
        self.overlay.touch();
        self.playback.skip(direction, self.engine.as_mut())
    }

    pub fn seek_to(&mut self, value_ms: u64) -> Result<u64, CommandError> {
        self.overlay.touch();
        self.playback.seek_to(value_ms, self.engine.as_mut())
    }

    pub fn scrub(&mut self, value_ms: u64) -> Result<(), CommandError> {
        self.overlay.touch();
        self.playback.scrub(value_ms)
    }

    pub fn end_scrub(&mut self) -> Result<Option<u64>, CommandError> {
        self.overlay.touch();
        self.playback.end_scrub(self.engine.as_mut())
    }

    pub fn cancel_scrub(&mut self) {
        self.playback.cancel_scrub();
    }

    pub fn open_track_selector(&mut self) -> Result<bool, CommandError> {
        if !self.features.enable_track_selection {
            return Err(CommandError::FeatureDisabled("track selection"));
        }
        self.tracks
            .open_selector(&mut self.playback, self.engine.as_mut())
    }

    pub fn select_draft_track(
        &mut self,
        kind: TrackKind,
        choice: TrackChoice,
    ) -> Result<(), CommandError> {
        self.tracks.select_draft(kind, choice)
    }

    pub fn apply_track_selection(&mut self) -> Result<Vec<TrackKind>, CommandError> {
        self.tracks.apply(&mut self.playback, self.engine.as_mut())
    }

    pub fn cancel_track_selection(&mut self) -> Result<(), CommandError> {
        self.tracks.cancel(&mut self.playback, self.engine.as_mut())
    }

    pub fn toggle_muted(&mut self) -> Result<bool, CommandError> {
        self.overlay.touch();
        self.display.toggle_muted(self.engine.as_mut())
    }

    pub fn set_volume(&mut self, volume: f32) -> Result<bool, CommandError> {
        self.overlay.touch();
        self.display.set_volume(volume, self.engine.as_mut())
    }

    pub fn toggle_resize_mode(&mut self) -> Result<ResizeMode, CommandError> {
        self.overlay.touch();
        self.display.toggle_resize_mode(self.engine.as_mut())
    }

    pub fn set_background_playback(
        &mut self,
        enabled: bool,
    ) -> Result<bool, CommandError> {
        self.display
            .set_background_playback(enabled, self.engine.as_mut())
    }

    pub fn set_picture_in_picture(
        &mut self,
        enabled: bool,
    ) -> Result<bool, CommandError> {
        self.display
            .set_picture_in_picture(enabled, self.engine.as_mut())
    }
}

impl fmt::Debug for PlayerScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerScreen")
            .field("session", &self.session.id)
            .field("state", &self.playback.state().name())
            .field("position_ms", &self.playback.position_ms())
            .field("selector_open", &self.tracks.is_open())
            .field("mounted", &self.lifecycle.is_mounted())
            .finish_non_exhaustive()
    }
}
