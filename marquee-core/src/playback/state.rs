//! Playback state machine
//!
//! `Idle → Loading → {Playing, Paused} ⇄ Buffering → Ended`, with `Failed`
//! reachable from every state except `Idle` and never left again.

use marquee_model::PlaybackFailure;

/// Where the session currently stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Screen built, nothing requested from the engine yet
    #[default]
    Idle,

    /// Source handed to the engine, waiting for its load report
    Loading,

    Playing,

    Paused,

    /// Stalled waiting for data. Remembers whether playback should continue
    /// once the stall clears.
    Buffering { resume_playing: bool },

    /// Reached the end of the media
    Ended,

    /// Terminal. No further commands are accepted.
    Failed(PlaybackFailure),
}

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Source handed to the engine
    LoadRequested,

    /// Engine finished loading
    Loaded { autoplay: bool },

    Play,

    Pause,

    BufferingChanged(bool),

    /// A seek moved the position back before the end
    Rewound,

    Finished,

    Failed(PlaybackFailure),
}

/// Result of a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionResult {
    /// Transition applied, state changed
    Changed,

    /// Valid event that leaves the state as it was
    Unchanged,

    /// Event not valid from the current state
    InvalidTransition {
        from_state: &'static str,
        event: &'static str,
    },
}

impl TransitionResult {
    pub fn is_changed(&self) -> bool {
        matches!(self, TransitionResult::Changed)
    }
}

impl PlaybackEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PlaybackEvent::LoadRequested => "LoadRequested",
            PlaybackEvent::Loaded { .. } => "Loaded",
            PlaybackEvent::Play => "Play",
            PlaybackEvent::Pause => "Pause",
            PlaybackEvent::BufferingChanged(_) => "BufferingChanged",
            PlaybackEvent::Rewound => "Rewound",
            PlaybackEvent::Finished => "Finished",
            PlaybackEvent::Failed(_) => "Failed",
        }
    }
}

impl PlaybackState {
    pub fn name(&self) -> &'static str {
        match self {
            PlaybackState::Idle => "Idle",
            PlaybackState::Loading => "Loading",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
            PlaybackState::Buffering { .. } => "Buffering",
            PlaybackState::Ended => "Ended",
            PlaybackState::Failed(_) => "Failed",
        }
    }

    /// Playback intent: true while playing, or while buffering with the
    /// intent to continue.
    pub fn is_playing(&self) -> bool {
        matches!(
            self,
            PlaybackState::Playing
                | PlaybackState::Buffering {
                    resume_playing: true
                }
        )
    }

    pub fn is_buffering(&self) -> bool {
        matches!(self, PlaybackState::Buffering { .. })
    }

    /// Media loaded and not failed: transport commands make sense.
    pub fn is_ready(&self) -> bool {
        matches!(
            self,
            PlaybackState::Playing
                | PlaybackState::Paused
                | PlaybackState::Buffering { .. }
                | PlaybackState::Ended
        )
    }

    pub fn failure(&self) -> Option<&PlaybackFailure> {
        match self {
            PlaybackState::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Attempt to transition to a new state based on an event
    pub fn transition(&mut self, event: PlaybackEvent) -> TransitionResult {
        use PlaybackEvent as E;
        use PlaybackState as S;

        let next = match (&*self, &event) {
            // Nothing leaves Failed
            (S::Failed(_), _) => None,

            (S::Idle, E::LoadRequested) => Some(S::Loading),

            (S::Loading, E::Loaded { autoplay: true }) => Some(S::Playing),
            (S::Loading, E::Loaded { autoplay: false }) => Some(S::Paused),
            // Engine re-reported load (e.g. after a track switch)
            (state, E::Loaded { .. }) if state.is_ready() => {
                return TransitionResult::Unchanged;
            }

            (S::Paused | S::Ended, E::Play) => Some(S::Playing),
            (S::Playing, E::Play) => return TransitionResult::Unchanged,
            (S::Buffering { .. }, E::Play) => Some(S::Buffering {
                resume_playing: true,
            }),

            (S::Playing, E::Pause) => Some(S::Paused),
            (S::Paused | S::Ended, E::Pause) => {
                return TransitionResult::Unchanged;
            }
            (S::Buffering { .. }, E::Pause) => Some(S::Buffering {
                resume_playing: false,
            }),

            (S::Playing, E::BufferingChanged(true)) => Some(S::Buffering {
                resume_playing: true,
            }),
            (S::Paused, E::BufferingChanged(true)) => Some(S::Buffering {
                resume_playing: false,
            }),
            (S::Buffering { resume_playing }, E::BufferingChanged(false)) => {
                Some(if *resume_playing { S::Playing } else { S::Paused })
            }
            (
                S::Buffering { .. },
                E::BufferingChanged(true),
            )
            | (S::Playing | S::Paused | S::Ended, E::BufferingChanged(false)) => {
                return TransitionResult::Unchanged;
            }

            (S::Ended, E::Rewound) => Some(S::Paused),
            (S::Playing | S::Paused | S::Buffering { .. }, E::Rewound) => {
                return TransitionResult::Unchanged;
            }

            (S::Playing | S::Paused | S::Buffering { .. }, E::Finished) => {
                Some(S::Ended)
            }

            (S::Idle, E::Failed(_)) => None,
            (_, E::Failed(failure)) => Some(S::Failed(failure.clone())),

            _ => None,
        };

        match next {
            Some(state) => {
                *self = state;
                TransitionResult::Changed
            }
            None => TransitionResult::InvalidTransition {
                from_state: self.name(),
                event: event.name(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_model::FailureKind;

    fn failure() -> PlaybackFailure {
        PlaybackFailure::new(FailureKind::DecodeError, "bad frame")
    }

    #[test]
    fn test_load_flow() {
        let mut state = PlaybackState::Idle;
        assert!(state.transition(PlaybackEvent::LoadRequested).is_changed());
        assert_eq!(state, PlaybackState::Loading);

        let result = state.transition(PlaybackEvent::Loaded { autoplay: false });
        assert!(result.is_changed());
        assert_eq!(state, PlaybackState::Paused);
        assert!(state.is_ready());
    }

    #[test]
    fn test_buffering_returns_to_prior_state() {
        let mut state = PlaybackState::Playing;
        state.transition(PlaybackEvent::BufferingChanged(true));
        assert_eq!(
            state,
            PlaybackState::Buffering {
                resume_playing: true
            }
        );
        state.transition(PlaybackEvent::BufferingChanged(false));
        assert_eq!(state, PlaybackState::Playing);

        let mut state = PlaybackState::Paused;
        state.transition(PlaybackEvent::BufferingChanged(true));
        assert!(!state.is_playing());
        state.transition(PlaybackEvent::BufferingChanged(false));
        assert_eq!(state, PlaybackState::Paused);
    }

    #[test]
    fn test_play_pause_while_buffering_updates_intent() {
        let mut state = PlaybackState::Buffering {
            resume_playing: true,
        };
        state.transition(PlaybackEvent::Pause);
        state.transition(PlaybackEvent::BufferingChanged(false));
        assert_eq!(state, PlaybackState::Paused);
    }

    #[test]
    fn test_failed_is_terminal() {
        let mut state = PlaybackState::Playing;
        assert!(state.transition(PlaybackEvent::Failed(failure())).is_changed());

        for event in [
            PlaybackEvent::Play,
            PlaybackEvent::BufferingChanged(true),
            PlaybackEvent::Finished,
            PlaybackEvent::Failed(failure()),
        ] {
            assert!(matches!(
                state.transition(event),
                TransitionResult::InvalidTransition {
                    from_state: "Failed",
                    ..
                }
            ));
        }
        assert_eq!(state.failure(), Some(&failure()));
    }

    #[test]
    fn test_idle_cannot_fail_or_play() {
        let mut state = PlaybackState::Idle;
        assert!(!state.transition(PlaybackEvent::Failed(failure())).is_changed());
        assert!(!state.transition(PlaybackEvent::Play).is_changed());
        assert_eq!(state, PlaybackState::Idle);
    }

    #[test]
    fn test_loading_can_fail() {
        let mut state = PlaybackState::Loading;
        assert!(state.transition(PlaybackEvent::Failed(failure())).is_changed());
        assert!(state.failure().is_some());
    }

    #[test]
    fn test_ended_restarts_and_rewinds() {
        let mut state = PlaybackState::Ended;
        state.transition(PlaybackEvent::Rewound);
        assert_eq!(state, PlaybackState::Paused);

        let mut state = PlaybackState::Ended;
        state.transition(PlaybackEvent::Play);
        assert_eq!(state, PlaybackState::Playing);
    }
}
