//! Configuration loading for the marquee player.
//!
//! Every switch and tunable of a screen is resolved here, once, before any
//! screen state exists. Files, inline JSON and individual environment
//! overrides all funnel through [`FeaturesLoader`] into a validated
//! [`marquee_model::PlayerFeatures`].

pub mod error;
pub mod features;
pub mod loader;
pub mod util;

pub use error::ConfigError;
pub use features::FeaturesFile;
pub use loader::{FeaturesLoad, FeaturesLoader, FeaturesSource};
