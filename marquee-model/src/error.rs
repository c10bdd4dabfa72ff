use thiserror::Error;

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("route parameter `url` is required")]
    MissingUrl,

    #[error("invalid media url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("drmKey and drmType must be provided together")]
    IncompleteDrm,

    #[error("unsupported drm type: {0}")]
    UnsupportedDrm(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
