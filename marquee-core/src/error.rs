use marquee_model::{FailureKind, TrackKind};
use thiserror::Error;

/// Reasons a user or host command was not carried out. None of these change
/// any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("media has not finished loading")]
    NotLoaded,

    #[error("media is already loaded for this session")]
    AlreadyLoaded,

    #[error("session has failed ({0})")]
    SessionFailed(FailureKind),

    #[error("track selector is not open")]
    SelectorClosed,

    #[error("{kind} track {index} is out of range ({available} available)")]
    TrackOutOfRange {
        kind: TrackKind,
        index: usize,
        available: usize,
    },

    #[error("{0} is disabled for this screen")]
    FeatureDisabled(&'static str),
}

/// Misuse of the mount/unmount pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("screen is already mounted")]
    AlreadyMounted,

    #[error("screen is not mounted")]
    NotMounted,
}
