//! Payloads crossing the native engine boundary. Times here are in seconds,
//! the unit the engine speaks.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::display::ResizeMode;
use crate::failure::EngineError;
use crate::session::PlaybackSession;
use crate::source::{DrmDescriptor, MediaSource};
use crate::tracks::{TrackCatalog, TrackDirective, TrackKind};

/// Everything the engine needs to open a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRequest {
    pub source: MediaSource,
    pub drm: Option<DrmDescriptor>,
    pub paused: bool,
}

impl SourceRequest {
    pub fn for_session(session: &PlaybackSession, paused: bool) -> Self {
        Self {
            source: session.source.clone(),
            drm: session.drm.clone(),
            paused,
        }
    }
}

/// Reported once the engine has opened the source.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoadInfo {
    pub duration: f64,
    pub tracks: TrackCatalog,
}

/// Asynchronous notifications from the engine. No ordering guarantee holds
/// relative to commands sent to it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum EngineEvent {
    Load(LoadInfo),
    Progress { current_time: f64 },
    Buffer { is_buffering: bool },
    End,
    Error(EngineError),
}

/// Imperative, fire-and-forget requests. Effects show up later as events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineCommand {
    Play,
    Pause,
    Seek { seconds: f64 },
    SelectTrack {
        kind: TrackKind,
        directive: TrackDirective,
    },
}

/// Declarative surface properties. The engine applies the latest value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineProperty {
    Muted(bool),
    Volume(f32),
    ResizeMode(ResizeMode),
    PlayInBackground(bool),
    PictureInPicture(bool),
}
