use std::fmt;

use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::source::{DrmDescriptor, MediaSource};

/// Identifier used to correlate log lines of one screen instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form is plenty for log correlation
        let simple = self.0.simple().to_string();
        f.write_str(&simple[..8])
    }
}

/// One playback session per mounted screen. Built from validated route
/// parameters and never mutated afterwards; runtime state lives in the core
/// components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSession {
    pub id: SessionId,
    pub source: MediaSource,
    pub drm: Option<DrmDescriptor>,
}

impl PlaybackSession {
    pub fn new(source: MediaSource, drm: Option<DrmDescriptor>) -> Self {
        Self {
            id: SessionId::new(),
            source,
            drm,
        }
    }

    pub fn requires_drm(&self) -> bool {
        self.drm.is_some()
    }
}
