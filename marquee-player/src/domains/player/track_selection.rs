//! Selector modal rows
//!
//! Each kind gets its sentinel row first ("Default", "Auto" or "Off"), then
//! one row per catalog track. The checked row follows the draft while the
//! modal is open.

use marquee_core::TrackSelectionNegotiator;
use marquee_core::tracks::choice_label;
use marquee_model::{TrackChoice, TrackKind, TrackSelection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorRow {
    pub choice: TrackChoice,
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorSection {
    pub kind: TrackKind,
    pub title: &'static str,
    pub rows: Vec<SelectorRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorView {
    pub sections: Vec<SelectorSection>,
}

impl SelectorView {
    /// `None` while the modal is closed.
    pub fn from_negotiator(tracks: &TrackSelectionNegotiator) -> Option<Self> {
        let draft = tracks.draft()?;
        let sections = TrackKind::ALL
            .into_iter()
            .filter(|kind| tracks.catalog().len(*kind) > 0)
            .map(|kind| section(kind, tracks, draft))
            .collect();
        Some(Self { sections })
    }

    pub fn section(&self, kind: TrackKind) -> Option<&SelectorSection> {
        self.sections.iter().find(|section| section.kind == kind)
    }
}

fn section(
    kind: TrackKind,
    tracks: &TrackSelectionNegotiator,
    draft: &TrackSelection,
) -> SelectorSection {
    let catalog = tracks.catalog();
    let selected = draft.get(kind);
    let rows = std::iter::once(TrackChoice::Unset)
        .chain((0..catalog.len(kind)).map(TrackChoice::Index))
        .map(|choice| SelectorRow {
            choice,
            label: choice_label(kind, choice, catalog),
            checked: choice == selected,
        })
        .collect();

    SelectorSection {
        kind,
        title: match kind {
            TrackKind::Audio => "Audio",
            TrackKind::Video => "Quality",
            TrackKind::Text => "Subtitles",
        },
        rows,
    }
}
