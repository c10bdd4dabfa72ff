use marquee_contracts::engine::VideoEngine;
use marquee_model::{
    EngineCommand, PlaybackFailure, PlaybackSession, PlayerFeatures,
    SourceRequest, millis_to_secs,
};
use tracing::{debug, info, warn};

use super::state::{PlaybackEvent, PlaybackState, TransitionResult};
use crate::error::CommandError;

/// Direction of a fixed-interval skip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipDirection {
    Forward,
    Backward,
}

/// Owns transport state and translates gestures into engine commands.
///
/// Positions are optimistic: a seek updates `position_ms` immediately and the
/// next progress report from the engine overwrites it, whatever it says. The
/// engine is the last writer.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    state: PlaybackState,
    position_ms: u64,
    /// Zero until the engine reports load
    duration_ms: u64,
    skip_interval_ms: u64,
    autoplay: bool,
    /// Engine reported a stall before load completed
    buffering_during_load: bool,
    /// Slider value while the user drags; never sent to the engine
    scrub_ms: Option<u64>,
}

impl PlaybackController {
    pub fn new(features: &PlayerFeatures) -> Self {
        Self {
            state: PlaybackState::Idle,
            position_ms: 0,
            duration_ms: 0,
            skip_interval_ms: features.skip_interval_ms,
            autoplay: features.autoplay,
            buffering_during_load: false,
            scrub_ms: None,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Position to render: the scrub value while dragging, else the position.
    pub fn display_position_ms(&self) -> u64 {
        self.scrub_ms.unwrap_or(self.position_ms)
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrub_ms.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn is_buffering(&self) -> bool {
        self.state.is_buffering()
    }

    /// Buffering, or a stall reported while still loading. Nothing else
    /// counts as a stall, so reports after the end or a failure are not timed.
    pub fn is_stalled(&self) -> bool {
        match self.state {
            PlaybackState::Loading => self.buffering_during_load,
            ref state => state.is_buffering(),
        }
    }

    pub fn failure(&self) -> Option<&PlaybackFailure> {
        self.state.failure()
    }

    /// Fails unless media is loaded and the session is healthy.
    pub fn ensure_ready(&self) -> Result<(), CommandError> {
        match &self.state {
            PlaybackState::Failed(failure) => {
                Err(CommandError::SessionFailed(failure.kind))
            }
            state if state.is_ready() => Ok(()),
            _ => Err(CommandError::NotLoaded),
        }
    }

    /// Hand the session's source to the engine. `Idle → Loading`.
    pub fn load(
        &mut self,
        session: &PlaybackSession,
        engine: &mut dyn VideoEngine,
    ) -> Result<(), CommandError> {
        if let Some(failure) = self.state.failure() {
            return Err(CommandError::SessionFailed(failure.kind));
        }
        if !self.state.transition(PlaybackEvent::LoadRequested).is_changed() {
            return Err(CommandError::AlreadyLoaded);
        }

        info!(
            session = %session.id,
            url = %session.source.url,
            drm = session.requires_drm(),
            "Opening media source"
        );
        engine.open(&SourceRequest::for_session(session, !self.autoplay));
        Ok(())
    }

    /// Engine finished loading. The engine was opened with the matching
    /// paused flag, so no command is needed here.
    pub fn on_load(&mut self, duration_ms: u64) -> TransitionResult {
        self.duration_ms = duration_ms;
        self.position_ms = self.position_ms.min(duration_ms);

        let result = self.state.transition(PlaybackEvent::Loaded {
            autoplay: self.autoplay,
        });
        match &result {
            TransitionResult::InvalidTransition { from_state, .. } => {
                warn!("Ignoring load report while {from_state}");
            }
            _ => info!(
                "Media loaded: duration {}ms, now {}",
                duration_ms,
                self.state.name()
            ),
        }

        if std::mem::take(&mut self.buffering_during_load) {
            self.state.transition(PlaybackEvent::BufferingChanged(true));
        }
        result
    }

    pub fn toggle_play_pause(
        &mut self,
        engine: &mut dyn VideoEngine,
    ) -> Result<(), CommandError> {
        self.ensure_ready()?;

        if self.state == PlaybackState::Ended {
            // Restart from the top
            self.seek_unchecked(0, engine);
            return self.play(engine).map(|_| ());
        }

        if self.state.is_playing() {
            self.pause(engine).map(|_| ())
        } else {
            self.play(engine).map(|_| ())
        }
    }

    /// Returns whether the playback intent changed.
    pub fn play(
        &mut self,
        engine: &mut dyn VideoEngine,
    ) -> Result<bool, CommandError> {
        self.ensure_ready()?;
        if self.state.is_playing() {
            return Ok(false);
        }
        engine.dispatch(EngineCommand::Play);
        self.state.transition(PlaybackEvent::Play);
        debug!("Playback resumed, now {}", self.state.name());
        Ok(true)
    }

    /// Returns whether the playback intent changed.
    pub fn pause(
        &mut self,
        engine: &mut dyn VideoEngine,
    ) -> Result<bool, CommandError> {
        self.ensure_ready()?;
        if !self.state.is_playing() {
            return Ok(false);
        }
        engine.dispatch(EngineCommand::Pause);
        self.state.transition(PlaybackEvent::Pause);
        debug!("Playback paused, now {}", self.state.name());
        Ok(true)
    }

    /// Jump one skip interval, clamped to `[0, duration]`. Returns the
    /// target position.
    pub fn skip(
        &mut self,
        direction: SkipDirection,
        engine: &mut dyn VideoEngine,
    ) -> Result<u64, CommandError> {
        self.ensure_ready()?;
        let target = match direction {
            SkipDirection::Forward => self
                .position_ms
                .saturating_add(self.skip_interval_ms)
                .min(self.duration_ms),
            SkipDirection::Backward => {
                self.position_ms.saturating_sub(self.skip_interval_ms)
            }
        };
        self.seek_unchecked(target, engine);
        Ok(target)
    }

    /// Seek to an absolute position, clamped to `[0, duration]`.
    pub fn seek_to(
        &mut self,
        value_ms: u64,
        engine: &mut dyn VideoEngine,
    ) -> Result<u64, CommandError> {
        self.ensure_ready()?;
        let target = value_ms.min(self.duration_ms);
        self.seek_unchecked(target, engine);
        Ok(target)
    }

    /// Track a slider drag. Only the displayed position moves; the engine is
    /// not told until [`end_scrub`](Self::end_scrub).
    pub fn scrub(&mut self, value_ms: u64) -> Result<(), CommandError> {
        self.ensure_ready()?;
        self.scrub_ms = Some(value_ms.min(self.duration_ms));
        Ok(())
    }

    /// Drag released: issue the single seek for the final slider value.
    /// Returns `None` when no drag was in progress.
    pub fn end_scrub(
        &mut self,
        engine: &mut dyn VideoEngine,
    ) -> Result<Option<u64>, CommandError> {
        self.ensure_ready()?;
        match self.scrub_ms.take() {
            Some(value) => self.seek_to(value, engine).map(Some),
            None => Ok(None),
        }
    }

    pub fn cancel_scrub(&mut self) {
        self.scrub_ms = None;
    }

    fn seek_unchecked(&mut self, target_ms: u64, engine: &mut dyn VideoEngine) {
        engine.dispatch(EngineCommand::Seek {
            seconds: millis_to_secs(target_ms),
        });
        debug!("Seek to {}ms (was {}ms)", target_ms, self.position_ms);
        self.position_ms = target_ms;

        if target_ms < self.duration_ms {
            self.state.transition(PlaybackEvent::Rewound);
        }
    }

    /// Engine progress report. Ignored before load and after failure.
    /// Returns whether the position was applied.
    pub fn on_progress(&mut self, current_time_ms: u64) -> bool {
        if !self.state.is_ready() {
            debug!(
                "Ignoring progress {}ms while {}",
                current_time_ms,
                self.state.name()
            );
            return false;
        }

        self.position_ms = if self.duration_ms > 0 {
            current_time_ms.min(self.duration_ms)
        } else {
            current_time_ms
        };
        true
    }

    pub fn on_buffering_changed(&mut self, is_buffering: bool) -> TransitionResult {
        if self.state == PlaybackState::Loading {
            self.buffering_during_load = is_buffering;
            return TransitionResult::Unchanged;
        }

        let result = self
            .state
            .transition(PlaybackEvent::BufferingChanged(is_buffering));
        match &result {
            TransitionResult::Changed => {
                info!("Buffering {}, now {}", is_buffering, self.state.name())
            }
            TransitionResult::Unchanged => {}
            TransitionResult::InvalidTransition { from_state, .. } => {
                debug!("Ignoring buffering={is_buffering} while {from_state}")
            }
        }
        result
    }

    pub fn on_end(&mut self) -> TransitionResult {
        let result = self.state.transition(PlaybackEvent::Finished);
        if result.is_changed() {
            self.position_ms = self.duration_ms;
            self.scrub_ms = None;
            info!("Reached end of media");
        }
        result
    }

    /// Enter the terminal failed state. Returns `false` when the session had
    /// already failed or never started loading.
    pub fn on_fatal_error(&mut self, failure: PlaybackFailure) -> bool {
        let changed = self
            .state
            .transition(PlaybackEvent::Failed(failure))
            .is_changed();
        if changed {
            self.scrub_ms = None;
            self.buffering_during_load = false;
        }
        changed
    }
}
