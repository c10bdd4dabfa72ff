use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The three independently selectable track families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TrackKind {
    Audio,
    Video,
    Text,
}

impl TrackKind {
    pub const ALL: [TrackKind; 3] =
        [TrackKind::Audio, TrackKind::Video, TrackKind::Text];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackKind::Audio => "audio",
            TrackKind::Video => "video",
            TrackKind::Text => "text",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engine supplied track descriptor. `index` is the engine's own identifier
/// and is what selection directives refer to; the optional fields only feed
/// labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Track {
    pub index: usize,
    pub title: Option<String>,
    pub language: Option<String>,
    pub codec: Option<String>,
    pub channels: Option<u32>,
    pub height: Option<u32>,
    pub bitrate: Option<u64>,
}

impl Track {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_codec(mut self, codec: impl Into<String>) -> Self {
        self.codec = Some(codec.into());
        self
    }

    pub fn with_channels(mut self, channels: u32) -> Self {
        self.channels = Some(channels);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_bitrate(mut self, bitrate: u64) -> Self {
        self.bitrate = Some(bitrate);
        self
    }
}

/// Tracks reported by the engine on load. Stable for the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackCatalog {
    pub audio: Vec<Track>,
    pub video: Vec<Track>,
    pub text: Vec<Track>,
}

impl TrackCatalog {
    pub fn tracks(&self, kind: TrackKind) -> &[Track] {
        match kind {
            TrackKind::Audio => &self.audio,
            TrackKind::Video => &self.video,
            TrackKind::Text => &self.text,
        }
    }

    pub fn len(&self, kind: TrackKind) -> usize {
        self.tracks(kind).len()
    }

    pub fn is_empty(&self) -> bool {
        TrackKind::ALL.iter().all(|kind| self.len(*kind) == 0)
    }

    /// Whether `choice` is the sentinel or a position inside the sequence.
    pub fn accepts(&self, kind: TrackKind, choice: TrackChoice) -> bool {
        match choice {
            TrackChoice::Unset => true,
            TrackChoice::Index(position) => position < self.len(kind),
        }
    }

    pub fn track(&self, kind: TrackKind, choice: TrackChoice) -> Option<&Track> {
        match choice {
            TrackChoice::Unset => None,
            TrackChoice::Index(position) => self.tracks(kind).get(position),
        }
    }
}

/// Selection for one track kind. `Index` is a position inside the catalog
/// sequence; `Unset` is the "no selection" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TrackChoice {
    #[default]
    Unset,
    Index(usize),
}

impl TrackChoice {
    pub fn position(&self) -> Option<usize> {
        match self {
            TrackChoice::Unset => None,
            TrackChoice::Index(position) => Some(*position),
        }
    }
}

impl From<Option<usize>> for TrackChoice {
    fn from(value: Option<usize>) -> Self {
        value.map_or(TrackChoice::Unset, TrackChoice::Index)
    }
}

/// One choice per track kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackSelection {
    pub audio: TrackChoice,
    pub video: TrackChoice,
    pub text: TrackChoice,
}

impl TrackSelection {
    pub fn get(&self, kind: TrackKind) -> TrackChoice {
        match kind {
            TrackKind::Audio => self.audio,
            TrackKind::Video => self.video,
            TrackKind::Text => self.text,
        }
    }

    pub fn set(&mut self, kind: TrackKind, choice: TrackChoice) {
        match kind {
            TrackKind::Audio => self.audio = choice,
            TrackKind::Video => self.video = choice,
            TrackKind::Text => self.text = choice,
        }
    }

    /// Kinds whose choice differs from `other`, in [`TrackKind::ALL`] order.
    pub fn changed_kinds(&self, other: &TrackSelection) -> Vec<TrackKind> {
        TrackKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind) != other.get(*kind))
            .collect()
    }
}

/// What the engine is told for one track kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value"))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TrackDirective {
    /// Let the engine pick (system audio language, adaptive video)
    EngineDefault,
    /// Render nothing for this kind (subtitles off)
    Disabled,
    Index(usize),
    Resolution(u32),
}

impl TrackDirective {
    /// Translate a catalog choice into the engine's vocabulary. Video tracks
    /// with a known height are pinned by resolution, everything else by the
    /// engine's own track index.
    pub fn for_choice(
        kind: TrackKind,
        choice: TrackChoice,
        catalog: &TrackCatalog,
    ) -> Self {
        match catalog.track(kind, choice) {
            None if kind == TrackKind::Text => TrackDirective::Disabled,
            None => TrackDirective::EngineDefault,
            Some(track) => match (kind, track.height) {
                (TrackKind::Video, Some(height)) => {
                    TrackDirective::Resolution(height)
                }
                _ => TrackDirective::Index(track.index),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TrackCatalog {
        TrackCatalog {
            audio: vec![
                Track::new(0).with_language("en"),
                Track::new(1).with_language("es"),
                Track::new(7).with_language("fr"),
            ],
            video: vec![Track::new(0).with_height(1080), Track::new(1)],
            text: vec![Track::new(3).with_language("en")],
        }
    }

    #[test]
    fn accepts_sentinel_and_in_bounds_positions() {
        let catalog = catalog();
        assert!(catalog.accepts(TrackKind::Audio, TrackChoice::Unset));
        assert!(catalog.accepts(TrackKind::Audio, TrackChoice::Index(2)));
        assert!(!catalog.accepts(TrackKind::Audio, TrackChoice::Index(3)));
        assert!(!catalog.accepts(TrackKind::Text, TrackChoice::Index(1)));
        assert!(TrackCatalog::default().is_empty());
    }

    #[test]
    fn directives_use_engine_identifiers() {
        let catalog = catalog();
        assert_eq!(
            TrackDirective::for_choice(
                TrackKind::Audio,
                TrackChoice::Index(2),
                &catalog
            ),
            TrackDirective::Index(7)
        );
        assert_eq!(
            TrackDirective::for_choice(
                TrackKind::Video,
                TrackChoice::Index(0),
                &catalog
            ),
            TrackDirective::Resolution(1080)
        );
        assert_eq!(
            TrackDirective::for_choice(
                TrackKind::Video,
                TrackChoice::Index(1),
                &catalog
            ),
            TrackDirective::Index(1)
        );
    }

    #[test]
    fn sentinel_directive_depends_on_kind() {
        let catalog = catalog();
        assert_eq!(
            TrackDirective::for_choice(
                TrackKind::Text,
                TrackChoice::Unset,
                &catalog
            ),
            TrackDirective::Disabled
        );
        assert_eq!(
            TrackDirective::for_choice(
                TrackKind::Audio,
                TrackChoice::Unset,
                &catalog
            ),
            TrackDirective::EngineDefault
        );
    }

    #[test]
    fn changed_kinds_reports_only_differences() {
        let committed = TrackSelection::default();
        let mut draft = committed;
        draft.set(TrackKind::Text, TrackChoice::Index(0));
        assert_eq!(draft.changed_kinds(&committed), vec![TrackKind::Text]);
        assert!(committed.changed_kinds(&committed).is_empty());
    }
}
