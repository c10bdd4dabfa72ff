use std::time::Duration;

use marquee_model::PlayerFeatures;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::util::parse_optional_duration;

fn default_stall_timeout() -> String {
    humantime::format_duration(PlayerFeatures::DEFAULT_STALL_TIMEOUT).to_string()
}

/// Player features as written in a TOML or JSON file. Missing keys fall back
/// to the defaults of the full-featured screen.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeaturesFile {
    /// Start playing as soon as the media loads.
    pub autoplay: bool,
    /// Mute and volume controls.
    pub enable_audio: bool,
    /// Audio, video and subtitle track picker.
    pub enable_track_selection: bool,
    /// Keep audio playing when the app is backgrounded.
    pub enable_background_play: bool,
    pub enable_pip: bool,
    /// Cover/contain zoom toggle.
    pub enable_resize: bool,
    /// Distance of one skip gesture. Must be positive.
    pub skip_interval_ms: u64,
    /// Hide transport controls after this much idle time while playing.
    /// Unset keeps them up until tapped away.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls_autohide_ms: Option<u64>,
    /// How long buffering may last before the session fails with a network
    /// error. Human readable (`30s`, `2m`), or `off` to wait forever.
    #[serde(default = "default_stall_timeout")]
    pub buffering_stall_timeout: String,
}

impl Default for FeaturesFile {
    fn default() -> Self {
        let defaults = PlayerFeatures::default();
        Self {
            autoplay: defaults.autoplay,
            enable_audio: defaults.enable_audio,
            enable_track_selection: defaults.enable_track_selection,
            enable_background_play: defaults.enable_background_play,
            enable_pip: defaults.enable_pip,
            enable_resize: defaults.enable_resize,
            skip_interval_ms: defaults.skip_interval_ms,
            controls_autohide_ms: None,
            buffering_stall_timeout: default_stall_timeout(),
        }
    }
}

impl FeaturesFile {
    /// Validate and resolve into the runtime form.
    pub fn into_features(self) -> Result<PlayerFeatures, ConfigError> {
        if self.skip_interval_ms == 0 {
            return Err(ConfigError::ZeroSkipInterval);
        }

        let buffering_stall_timeout =
            parse_optional_duration(&self.buffering_stall_timeout).map_err(
                |source| ConfigError::InvalidDuration {
                    field: "buffering_stall_timeout",
                    value: self.buffering_stall_timeout.clone(),
                    source,
                },
            )?;
        if buffering_stall_timeout == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroStallTimeout);
        }

        Ok(PlayerFeatures {
            autoplay: self.autoplay,
            enable_audio: self.enable_audio,
            enable_track_selection: self.enable_track_selection,
            enable_background_play: self.enable_background_play,
            enable_pip: self.enable_pip,
            enable_resize: self.enable_resize,
            skip_interval_ms: self.skip_interval_ms,
            controls_autohide: self
                .controls_autohide_ms
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis),
            buffering_stall_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_to_default_features() {
        let features = FeaturesFile::default().into_features().unwrap();
        assert_eq!(features, PlayerFeatures::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let file: FeaturesFile = toml::from_str(
            r#"
            enable_pip = true
            controls_autohide_ms = 4000
            buffering_stall_timeout = "off"
            "#,
        )
        .unwrap();
        let features = file.into_features().unwrap();

        assert!(features.enable_pip);
        assert!(features.enable_audio);
        assert_eq!(features.controls_autohide, Some(Duration::from_secs(4)));
        assert_eq!(features.buffering_stall_timeout, None);
    }

    #[test]
    fn rejects_zero_skip_and_zero_stall() {
        let zero_skip = FeaturesFile {
            skip_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero_skip.into_features(),
            Err(ConfigError::ZeroSkipInterval)
        ));

        let zero_stall = FeaturesFile {
            buffering_stall_timeout: "0s".into(),
            ..Default::default()
        };
        assert!(matches!(
            zero_stall.into_features(),
            Err(ConfigError::ZeroStallTimeout)
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed: Result<FeaturesFile, _> =
            serde_json::from_str(r#"{"enableAudio": false}"#);
        assert!(parsed.is_err());
    }
}
