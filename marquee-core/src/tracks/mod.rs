//! Track selection domain

pub mod labels;
pub mod negotiator;

pub use labels::{choice_label, track_label};
pub use negotiator::TrackSelectionNegotiator;
