//! Display flags
//!
//! Mute, volume, resize mode, background play and picture-in-picture are
//! independent properties. None depends on another or on playback state, and
//! each travels to the engine as a property update rather than a command.

use marquee_contracts::engine::VideoEngine;
use marquee_model::{EngineProperty, PlayerFeatures, ResizeMode};
use tracing::debug;

use crate::error::CommandError;

/// Binary zoom toggle as shown to the user. Icon and label describe what a
/// tap will do, so they invert with the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomAffordance {
    pub icon: &'static str,
    pub label: &'static str,
}

impl ZoomAffordance {
    pub fn for_mode(mode: ResizeMode) -> Self {
        match mode {
            ResizeMode::Cover => Self {
                icon: "zoom-in-map",
                label: "Fit",
            },
            ResizeMode::Contain => Self {
                icon: "zoom-out-map",
                label: "Fill",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayModeManager {
    enable_audio: bool,
    enable_resize: bool,
    enable_background_play: bool,
    enable_pip: bool,

    muted: bool,
    volume: f32,
    resize_mode: ResizeMode,
    background_playback: bool,
    picture_in_picture: bool,
}

impl DisplayModeManager {
    pub fn new(features: &PlayerFeatures) -> Self {
        Self {
            enable_audio: features.enable_audio,
            enable_resize: features.enable_resize,
            enable_background_play: features.enable_background_play,
            enable_pip: features.enable_pip,
            muted: false,
            volume: 1.0,
            resize_mode: ResizeMode::Cover,
            background_playback: false,
            picture_in_picture: false,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn resize_mode(&self) -> ResizeMode {
        self.resize_mode
    }

    pub fn background_playback(&self) -> bool {
        self.background_playback
    }

    pub fn picture_in_picture(&self) -> bool {
        self.picture_in_picture
    }

    pub fn zoom_affordance(&self) -> ZoomAffordance {
        ZoomAffordance::for_mode(self.resize_mode)
    }

    /// Push every property once, used right after the source is opened.
    pub fn sync_all(&self, engine: &mut dyn VideoEngine) {
        engine.apply(EngineProperty::Volume(self.volume));
        engine.apply(EngineProperty::Muted(self.muted));
        engine.apply(EngineProperty::ResizeMode(self.resize_mode));
        engine.apply(EngineProperty::PlayInBackground(self.background_playback));
        engine.apply(EngineProperty::PictureInPicture(self.picture_in_picture));
    }

    /// Returns whether the value changed. Unchanged values are not resent.
    pub fn set_muted(
        &mut self,
        muted: bool,
        engine: &mut dyn VideoEngine,
    ) -> Result<bool, CommandError> {
        require(self.enable_audio, "audio control")?;
        Ok(update(&mut self.muted, muted, engine, EngineProperty::Muted))
    }

    pub fn toggle_muted(
        &mut self,
        engine: &mut dyn VideoEngine,
    ) -> Result<bool, CommandError> {
        let muted = !self.muted;
        self.set_muted(muted, engine)?;
        Ok(muted)
    }

    /// Volume is clamped to `0.0..=1.0`; NaN is treated as silence.
    pub fn set_volume(
        &mut self,
        volume: f32,
        engine: &mut dyn VideoEngine,
    ) -> Result<bool, CommandError> {
        require(self.enable_audio, "audio control")?;
        let volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
        Ok(update(&mut self.volume, volume, engine, EngineProperty::Volume))
    }

    pub fn set_resize_mode(
        &mut self,
        mode: ResizeMode,
        engine: &mut dyn VideoEngine,
    ) -> Result<bool, CommandError> {
        require(self.enable_resize, "resize")?;
        Ok(update(
            &mut self.resize_mode,
            mode,
            engine,
            EngineProperty::ResizeMode,
        ))
    }

    pub fn toggle_resize_mode(
        &mut self,
        engine: &mut dyn VideoEngine,
    ) -> Result<ResizeMode, CommandError> {
        let mode = self.resize_mode.toggled();
        self.set_resize_mode(mode, engine)?;
        Ok(mode)
    }

    pub fn set_background_playback(
        &mut self,
        enabled: bool,
        engine: &mut dyn VideoEngine,
    ) -> Result<bool, CommandError> {
        require(self.enable_background_play, "background playback")?;
        Ok(update(
            &mut self.background_playback,
            enabled,
            engine,
            EngineProperty::PlayInBackground,
        ))
    }

    pub fn set_picture_in_picture(
        &mut self,
        enabled: bool,
        engine: &mut dyn VideoEngine,
    ) -> Result<bool, CommandError> {
        require(self.enable_pip, "picture-in-picture")?;
        Ok(update(
            &mut self.picture_in_picture,
            enabled,
            engine,
            EngineProperty::PictureInPicture,
        ))
    }
}

fn require(enabled: bool, feature: &'static str) -> Result<(), CommandError> {
    if enabled {
        Ok(())
    } else {
        Err(CommandError::FeatureDisabled(feature))
    }
}

fn update<T: PartialEq + Copy + std::fmt::Debug>(
    slot: &mut T,
    value: T,
    engine: &mut dyn VideoEngine,
    property: fn(T) -> EngineProperty,
) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    let property = property(value);
    debug!("Display property {property:?}");
    engine.apply(property);
    true
}
