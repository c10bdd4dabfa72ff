use log::{debug, info, warn};
use marquee_contracts::back::BackDisposition;
use marquee_core::{CommandError, PlayerScreen, SkipDirection};
use marquee_model::EngineEvent;

use super::messages::Message;

/// What the runtime should do after a message was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateResult {
    /// Something visible changed
    pub redraw: bool,
    /// The host should pop the screen
    pub exit: bool,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn redraw() -> Self {
        Self {
            redraw: true,
            exit: false,
        }
    }

    pub fn exit() -> Self {
        Self {
            redraw: false,
            exit: true,
        }
    }
}

/// Handle one player message. Rejected commands are logged and absorbed;
/// they never change screen state.
pub fn update(screen: &mut PlayerScreen, message: Message) -> UpdateResult {
    let name = message.name();
    match message {
        Message::Engine(event, at) => {
            // Progress arrives several times a second; the view polls it
            let quiet = matches!(event, EngineEvent::Progress { .. });
            screen.handle_engine_event(event, at);
            if quiet {
                UpdateResult::none()
            } else {
                UpdateResult::redraw()
            }
        }

        Message::PlayPause => absorb(name, screen.toggle_play_pause()),
        Message::SkipForward => absorb(name, screen.skip(SkipDirection::Forward)),
        Message::SkipBackward => {
            absorb(name, screen.skip(SkipDirection::Backward))
        }
        Message::SeekTo(value_ms) => absorb(name, screen.seek_to(value_ms)),
        Message::Scrub(value_ms) => absorb(name, screen.scrub(value_ms)),
        Message::ScrubReleased => absorb(name, screen.end_scrub()),
        Message::ScrubCancelled => {
            screen.cancel_scrub();
            UpdateResult::redraw()
        }

        Message::VideoTapped => {
            let visible = screen.tap_video();
            debug!("[Player] Controls {}", if visible { "shown" } else { "hidden" });
            UpdateResult::redraw()
        }

        Message::ToggleMute => absorb(name, screen.toggle_muted()),
        Message::SetVolume(volume) => absorb(name, screen.set_volume(volume)),
        Message::ToggleResizeMode => absorb(name, screen.toggle_resize_mode()),
        Message::SetBackgroundPlay(enabled) => {
            absorb(name, screen.set_background_playback(enabled))
        }
        Message::SetPictureInPicture(enabled) => {
            absorb(name, screen.set_picture_in_picture(enabled))
        }

        Message::OpenTrackSelector => absorb(name, screen.open_track_selector()),
        Message::SelectDraftTrack(kind, choice) => {
            absorb(name, screen.select_draft_track(kind, choice))
        }
        Message::ApplyTrackSelection => {
            absorb(name, screen.apply_track_selection())
        }
        Message::CancelTrackSelection => {
            absorb(name, screen.cancel_track_selection())
        }

        Message::HardwareBack => match screen.hardware_back() {
            BackDisposition::NotConsumed => {
                info!("[Player] Back pressed, leaving player");
                UpdateResult::exit()
            }
            BackDisposition::Consumed => UpdateResult::redraw(),
        },

        Message::Tick(now) => {
            if screen.tick(now) {
                UpdateResult::redraw()
            } else {
                UpdateResult::none()
            }
        }
    }
}

fn absorb<T>(action: &str, result: Result<T, CommandError>) -> UpdateResult {
    match result {
        Ok(_) => UpdateResult::redraw(),
        Err(err) => {
            warn!("[Player] {action} rejected: {err}");
            UpdateResult::none()
        }
    }
}
