use marquee_model::{EngineCommand, EngineProperty, SourceRequest};

/// Downward half of the native engine contract. Every call is
/// fire-and-forget: nothing is returned and effects are only observable
/// through later [`marquee_model::EngineEvent`]s.
pub trait VideoEngine {
    /// Open a source with its headers and optional DRM descriptor
    fn open(&mut self, request: &SourceRequest);

    /// Send an imperative command (play, pause, seek, select track)
    fn dispatch(&mut self, command: EngineCommand);

    /// Update a surface property (muted, volume, resize mode, ...)
    fn apply(&mut self, property: EngineProperty);
}

impl<E: VideoEngine + ?Sized> VideoEngine for Box<E> {
    fn open(&mut self, request: &SourceRequest) {
        (**self).open(request)
    }

    fn dispatch(&mut self, command: EngineCommand) {
        (**self).dispatch(command)
    }

    fn apply(&mut self, property: EngineProperty) {
        (**self).apply(property)
    }
}
