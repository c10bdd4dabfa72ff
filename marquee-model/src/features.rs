use std::time::Duration;

/// Feature switches and tunables for one screen. Fully resolved before the
/// screen is built; the core never reads configuration lazily.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerFeatures {
    /// Start playing as soon as the engine reports load
    pub autoplay: bool,
    /// Mute and volume controls
    pub enable_audio: bool,
    pub enable_track_selection: bool,
    pub enable_background_play: bool,
    pub enable_pip: bool,
    /// Cover/contain zoom toggle
    pub enable_resize: bool,
    pub skip_interval_ms: u64,
    /// Hide the transport overlay after this much inactivity while playing
    pub controls_autohide: Option<Duration>,
    /// Escalate buffering to a network error after this long. `None` waits
    /// forever.
    pub buffering_stall_timeout: Option<Duration>,
}

impl PlayerFeatures {
    pub const DEFAULT_SKIP_INTERVAL_MS: u64 = 10_000;
    pub const DEFAULT_STALL_TIMEOUT: Duration = Duration::from_secs(30);

    /// The reduced control set of the basic screen: transport only.
    pub fn minimal() -> Self {
        Self {
            enable_audio: false,
            enable_track_selection: false,
            enable_background_play: false,
            enable_pip: false,
            enable_resize: false,
            ..Self::default()
        }
    }
}

impl Default for PlayerFeatures {
    fn default() -> Self {
        Self {
            autoplay: true,
            enable_audio: true,
            enable_track_selection: true,
            enable_background_play: false,
            enable_pip: false,
            enable_resize: true,
            skip_interval_ms: Self::DEFAULT_SKIP_INTERVAL_MS,
            controls_autohide: None,
            buffering_stall_timeout: Some(Self::DEFAULT_STALL_TIMEOUT),
        }
    }
}
