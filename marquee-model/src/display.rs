#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the video surface fills the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ResizeMode {
    /// Fill the screen, cropping what does not fit
    #[default]
    Cover,
    /// Letterbox the whole frame
    Contain,
}

impl ResizeMode {
    pub fn toggled(self) -> Self {
        match self {
            ResizeMode::Cover => ResizeMode::Contain,
            ResizeMode::Contain => ResizeMode::Cover,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeMode::Cover => "cover",
            ResizeMode::Contain => "contain",
        }
    }
}
