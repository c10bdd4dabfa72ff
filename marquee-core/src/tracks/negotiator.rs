use marquee_contracts::engine::VideoEngine;
use marquee_model::{
    EngineCommand, TrackCatalog, TrackChoice, TrackDirective, TrackKind,
    TrackSelection,
};
use tracing::{debug, info, warn};

use crate::error::CommandError;
use crate::playback::PlaybackController;

/// Staged selection while the selector modal is open
#[derive(Debug, Clone, PartialEq, Eq)]
struct Draft {
    selection: TrackSelection,
    /// Playback was running when the selector opened
    resume_on_close: bool,
}

/// Owns the track catalog and the two-phase selection protocol.
///
/// The engine only ever sees the committed selection. Changes are staged in a
/// draft while the selector is open and reach the engine together on
/// [`apply`](Self::apply); [`cancel`](Self::cancel) throws the draft away
/// without a single engine command.
#[derive(Debug, Clone, Default)]
pub struct TrackSelectionNegotiator {
    catalog: TrackCatalog,
    committed: TrackSelection,
    draft: Option<Draft>,
}

impl TrackSelectionNegotiator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &TrackCatalog {
        &self.catalog
    }

    pub fn committed(&self) -> &TrackSelection {
        &self.committed
    }

    pub fn draft(&self) -> Option<&TrackSelection> {
        self.draft.as_ref().map(|draft| &draft.selection)
    }

    /// Whether the selector modal is visible.
    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    /// Take the engine's load report. Any open draft is discarded. A repeated
    /// report of the same catalog keeps the committed selection, since the
    /// engine still has it applied; a new catalog falls back to the sentinel,
    /// which is what the engine plays after a fresh load.
    pub fn load_catalog(&mut self, catalog: TrackCatalog) {
        if self.draft.take().is_some() {
            warn!("Discarding open track selection draft on reload");
        }
        if catalog == self.catalog {
            debug!("Track catalog re-reported unchanged, keeping selection");
            return;
        }
        info!(
            "Track catalog: {} audio, {} video, {} text",
            catalog.audio.len(),
            catalog.video.len(),
            catalog.text.len()
        );
        self.catalog = catalog;
        self.committed = TrackSelection::default();
    }

    /// Open the selector: snapshot the committed selection into a draft and
    /// pause playback. Returns `Ok(false)` when already open, in which case
    /// nothing happens at all.
    pub fn open_selector(
        &mut self,
        playback: &mut PlaybackController,
        engine: &mut dyn VideoEngine,
    ) -> Result<bool, CommandError> {
        playback.ensure_ready()?;
        if self.draft.is_some() {
            debug!("Track selector already open");
            return Ok(false);
        }

        let resume_on_close = playback.pause(engine)?;
        self.draft = Some(Draft {
            selection: self.committed,
            resume_on_close,
        });
        debug!("Track selector opened (resume on close: {resume_on_close})");
        Ok(true)
    }

    /// Stage a choice for one kind. Touches neither the committed selection
    /// nor the engine.
    pub fn select_draft(
        &mut self,
        kind: TrackKind,
        choice: TrackChoice,
    ) -> Result<(), CommandError> {
        let draft = self.draft.as_mut().ok_or(CommandError::SelectorClosed)?;

        if !self.catalog.accepts(kind, choice) {
            return Err(CommandError::TrackOutOfRange {
                kind,
                index: choice.position().unwrap_or_default(),
                available: self.catalog.len(kind),
            });
        }

        draft.selection.set(kind, choice);
        debug!("Draft {kind} track -> {choice:?}");
        Ok(())
    }

    /// Commit the draft: one selection command per changed kind, then resume
    /// and close. Returns the kinds sent to the engine.
    pub fn apply(
        &mut self,
        playback: &mut PlaybackController,
        engine: &mut dyn VideoEngine,
    ) -> Result<Vec<TrackKind>, CommandError> {
        let draft = self.draft.take().ok_or(CommandError::SelectorClosed)?;
        let changed = draft.selection.changed_kinds(&self.committed);

        for kind in &changed {
            let directive = TrackDirective::for_choice(
                *kind,
                draft.selection.get(*kind),
                &self.catalog,
            );
            engine.dispatch(EngineCommand::SelectTrack {
                kind: *kind,
                directive,
            });
            info!("Selected {kind} track: {directive:?}");
        }
        self.committed = draft.selection;

        self.resume_after_close(draft.resume_on_close, playback, engine);
        Ok(changed)
    }

    /// Throw the draft away and close. The committed selection and the
    /// engine are untouched.
    pub fn cancel(
        &mut self,
        playback: &mut PlaybackController,
        engine: &mut dyn VideoEngine,
    ) -> Result<(), CommandError> {
        let draft = self.draft.take().ok_or(CommandError::SelectorClosed)?;
        debug!("Track selection cancelled");
        self.resume_after_close(draft.resume_on_close, playback, engine);
        Ok(())
    }

    /// Drop the draft without resuming, used when the session fails while
    /// the selector is open.
    pub fn abandon(&mut self) {
        if self.draft.take().is_some() {
            debug!("Track selector closed without applying");
        }
    }

    fn resume_after_close(
        &self,
        resume: bool,
        playback: &mut PlaybackController,
        engine: &mut dyn VideoEngine,
    ) {
        if !resume {
            return;
        }
        if let Err(err) = playback.play(engine) {
            warn!("Not resuming after track selection: {err}");
        }
    }
}
