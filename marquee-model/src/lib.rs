//! Core data model definitions shared across marquee crates.
#![allow(missing_docs)]

pub mod display;
pub mod engine;
pub mod error;
pub mod failure;
pub mod features;
pub mod route;
pub mod session;
pub mod source;
pub mod time;
pub mod tracks;

// Intentionally curated re-exports for downstream consumers.
pub use display::ResizeMode;
pub use engine::{
    EngineCommand, EngineEvent, EngineProperty, LoadInfo, SourceRequest,
};
pub use error::{ModelError, Result as ModelResult};
pub use failure::{EngineError, FailureKind, PlaybackFailure};
pub use features::PlayerFeatures;
pub use route::RouteParams;
pub use session::{PlaybackSession, SessionId};
pub use source::{DrmDescriptor, DrmType, MediaSource, RequestHeaders};
pub use time::{millis_to_secs, secs_to_millis};
pub use tracks::{
    Track, TrackCatalog, TrackChoice, TrackDirective, TrackKind,
    TrackSelection,
};
