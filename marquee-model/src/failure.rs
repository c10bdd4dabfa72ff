use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Every fatal condition a session can end in. None of them are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FailureKind {
    /// Bad or unreachable URL, or the server rejected the request headers
    SourceUnavailable,
    /// License negotiation failed
    DrmFailure,
    /// The engine cannot parse or decode the stream
    DecodeError,
    /// The stream was interrupted, including stalls past the buffering limit
    NetworkError,
    Unknown,
}

impl FailureKind {
    /// Short text suitable for the error overlay.
    pub fn user_message(&self) -> &'static str {
        match self {
            FailureKind::SourceUnavailable => "This video is unavailable.",
            FailureKind::DrmFailure => {
                "This video is protected and could not be unlocked."
            }
            FailureKind::DecodeError => "This video format is not supported.",
            FailureKind::NetworkError => {
                "Playback stopped because the connection was lost."
            }
            FailureKind::Unknown => "Something went wrong during playback.",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::SourceUnavailable => "source unavailable",
            FailureKind::DrmFailure => "drm failure",
            FailureKind::DecodeError => "decode error",
            FailureKind::NetworkError => "network error",
            FailureKind::Unknown => "unknown error",
        };
        f.write_str(name)
    }
}

/// A classified fatal failure, with the engine's own wording kept for the
/// host.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaybackFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl PlaybackFailure {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for PlaybackFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.detail)
    }
}

/// Raw error payload emitted by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineError {
    /// Engine error code, ExoPlayer `PlaybackException` numbering
    pub code: Option<i32>,
    pub message: String,
}

impl EngineError {
    pub fn new(code: Option<i32>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self.code {
            // IO: connection failed, connection timeout
            Some(2001 | 2002) => FailureKind::NetworkError,
            // IO: bad http status, file not found, no permission, ...
            Some(2000..=2999) => FailureKind::SourceUnavailable,
            // Parsing (3xxx) and decoding (4xxx)
            Some(3000..=4999) => FailureKind::DecodeError,
            Some(6000..=6999) => FailureKind::DrmFailure,
            _ => FailureKind::Unknown,
        }
    }

    pub fn classify(self) -> PlaybackFailure {
        let kind = self.kind();
        let detail = match self.code {
            Some(code) => format!("{} (code {code})", self.message),
            None => self.message,
        };
        PlaybackFailure { kind, detail }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_engine_codes_into_taxonomy() {
        let kind = |code| EngineError::new(Some(code), "x").kind();
        assert_eq!(kind(2001), FailureKind::NetworkError);
        assert_eq!(kind(2002), FailureKind::NetworkError);
        assert_eq!(kind(2004), FailureKind::SourceUnavailable);
        assert_eq!(kind(2005), FailureKind::SourceUnavailable);
        assert_eq!(kind(3001), FailureKind::DecodeError);
        assert_eq!(kind(4003), FailureKind::DecodeError);
        assert_eq!(kind(6004), FailureKind::DrmFailure);
        assert_eq!(kind(1000), FailureKind::Unknown);
        assert_eq!(EngineError::new(None, "x").kind(), FailureKind::Unknown);
    }

    #[test]
    fn classify_keeps_engine_wording() {
        let failure =
            EngineError::new(Some(2004), "HTTP 403 Forbidden").classify();
        assert_eq!(failure.kind, FailureKind::SourceUnavailable);
        assert_eq!(failure.detail, "HTTP 403 Forbidden (code 2004)");
        assert_eq!(
            failure.to_string(),
            "source unavailable: HTTP 403 Forbidden (code 2004)"
        );
    }
}
