use std::fmt;
use std::str::FromStr;

use url::Url;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// HTTP headers forwarded verbatim with every media request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RequestHeaders {
    pub referer: Option<String>,
    pub origin: Option<String>,
    pub cookie: Option<String>,
    pub user_agent: Option<String>,
}

impl RequestHeaders {
    /// Header name/value pairs in wire form, skipping absent values.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("Referer", self.referer.as_deref()),
            ("Origin", self.origin.as_deref()),
            ("Cookie", self.cookie.as_deref()),
            ("User-Agent", self.user_agent.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Where the media comes from. Immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MediaSource {
    pub url: Url,
    pub headers: RequestHeaders,
}

/// Key systems the engine knows how to negotiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DrmType {
    Widevine,
    PlayReady,
    ClearKey,
    FairPlay,
}

impl DrmType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrmType::Widevine => "widevine",
            DrmType::PlayReady => "playready",
            DrmType::ClearKey => "clearkey",
            DrmType::FairPlay => "fairplay",
        }
    }
}

impl fmt::Display for DrmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrmType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "widevine" => Ok(DrmType::Widevine),
            "playready" => Ok(DrmType::PlayReady),
            "clearkey" => Ok(DrmType::ClearKey),
            "fairplay" => Ok(DrmType::FairPlay),
            _ => Err(ModelError::UnsupportedDrm(s.to_string())),
        }
    }
}

/// License negotiation input. Only present when the stream is protected.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DrmDescriptor {
    pub drm_type: DrmType,
    pub license_key: String,
}

// License keys stay out of logs.
impl fmt::Debug for DrmDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrmDescriptor")
            .field("drm_type", &self.drm_type)
            .field("license_key", &"<redacted>")
            .finish()
    }
}
