use std::time::Instant;

use marquee_model::{EngineEvent, TrackChoice, TrackKind};

#[derive(Debug, Clone)]
pub enum Message {
    // Engine events, stamped with their arrival time
    Engine(EngineEvent, Instant),

    // Transport
    PlayPause,
    SkipForward,
    SkipBackward,
    SeekTo(u64),
    Scrub(u64),
    ScrubReleased,
    ScrubCancelled,

    // Surface
    VideoTapped,

    // Display modes
    ToggleMute,
    SetVolume(f32),
    ToggleResizeMode,
    SetBackgroundPlay(bool),
    SetPictureInPicture(bool),

    // Track selection modal
    OpenTrackSelector,
    SelectDraftTrack(TrackKind, TrackChoice),
    ApplyTrackSelection,
    CancelTrackSelection,

    // Lifecycle
    HardwareBack,
    Tick(Instant),
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Engine(..) => "Engine",
            Self::PlayPause => "PlayPause",
            Self::SkipForward => "SkipForward",
            Self::SkipBackward => "SkipBackward",
            Self::SeekTo(_) => "SeekTo",
            Self::Scrub(_) => "Scrub",
            Self::ScrubReleased => "ScrubReleased",
            Self::ScrubCancelled => "ScrubCancelled",
            Self::VideoTapped => "VideoTapped",
            Self::ToggleMute => "ToggleMute",
            Self::SetVolume(_) => "SetVolume",
            Self::ToggleResizeMode => "ToggleResizeMode",
            Self::SetBackgroundPlay(_) => "SetBackgroundPlay",
            Self::SetPictureInPicture(_) => "SetPictureInPicture",
            Self::OpenTrackSelector => "OpenTrackSelector",
            Self::SelectDraftTrack(..) => "SelectDraftTrack",
            Self::ApplyTrackSelection => "ApplyTrackSelection",
            Self::CancelTrackSelection => "CancelTrackSelection",
            Self::HardwareBack => "HardwareBack",
            Self::Tick(_) => "Tick",
        }
    }
}
