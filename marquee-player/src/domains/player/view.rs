use std::fmt;

use marquee_core::{OverlayPresentation, PlayerScreen, ZoomAffordance, format_duration};
use marquee_model::TrackChoice;

use super::track_selection::SelectorView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderView {
    pub value_ms: u64,
    pub max_ms: u64,
    pub enabled: bool,
}

/// Everything the player surface renders, derived from the screen. Holds no
/// state of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub overlay: OverlayPresentation,
    pub position_text: String,
    pub duration_text: String,
    pub slider: SliderView,
    pub play_icon: &'static str,
    /// `None` when audio controls are disabled
    pub mute_icon: Option<&'static str>,
    pub volume: f32,
    /// `None` when resizing is disabled
    pub zoom: Option<ZoomAffordance>,
    pub selector: Option<SelectorView>,
}

impl PlayerView {
    pub fn from_screen(screen: &PlayerScreen) -> Self {
        let playback = screen.playback();
        let display = screen.display();
        let features = screen.features();
        let position_ms = playback.display_position_ms();
        let duration_ms = playback.duration_ms();

        Self {
            overlay: screen.presentation(),
            position_text: format_duration(position_ms),
            duration_text: format_duration(duration_ms),
            slider: SliderView {
                value_ms: position_ms,
                max_ms: duration_ms,
                enabled: playback.ensure_ready().is_ok(),
            },
            play_icon: if playback.is_playing() { "pause" } else { "play" },
            mute_icon: features.enable_audio.then_some(if display.is_muted() {
                "volume-off"
            } else {
                "volume-up"
            }),
            volume: display.volume(),
            zoom: features.enable_resize.then(|| display.zoom_affordance()),
            selector: SelectorView::from_negotiator(screen.tracks()),
        }
    }
}

impl fmt::Display for PlayerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.overlay {
            OverlayPresentation::Loading => writeln!(f, "[loading]")?,
            OverlayPresentation::Buffering => writeln!(f, "[buffering]")?,
            OverlayPresentation::Failed { kind, message } => {
                writeln!(f, "[error: {kind}] {message}")?
            }
            OverlayPresentation::Transport { visible: false, .. } => {
                writeln!(f, "[controls hidden]")?
            }
            OverlayPresentation::Transport { ended, .. } => {
                let icon = if ended { "replay" } else { self.play_icon };
                write!(
                    f,
                    "[{icon}] {} / {}",
                    self.position_text, self.duration_text
                )?;
                if let Some(mute) = self.mute_icon {
                    write!(f, "  [{mute} {:.0}%]", self.volume * 100.0)?;
                }
                if let Some(zoom) = self.zoom {
                    write!(f, "  [{} {}]", zoom.icon, zoom.label)?;
                }
                writeln!(f)?;
            }
        }

        if let Some(selector) = &self.selector {
            for section in &selector.sections {
                writeln!(f, "  {}", section.title)?;
                for row in &section.rows {
                    let mark = if row.checked { "x" } else { " " };
                    let key = match row.choice {
                        TrackChoice::Unset => "-".to_string(),
                        TrackChoice::Index(position) => position.to_string(),
                    };
                    writeln!(f, "    [{mark}] {key}: {}", row.label)?;
                }
            }
        }
        Ok(())
    }
}
