#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ModelError, Result};
use crate::session::PlaybackSession;
use crate::source::{DrmDescriptor, DrmType, MediaSource, RequestHeaders};

/// Raw parameters handed over by the host navigation when the screen is
/// pushed. Nothing here is trusted until [`RouteParams::into_session`] runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct RouteParams {
    pub url: Option<String>,
    pub referer: Option<String>,
    pub origin: Option<String>,
    pub cookie: Option<String>,
    pub user_agent: Option<String>,
    pub drm_key: Option<String>,
    pub drm_type: Option<String>,
}

impl RouteParams {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Validate the parameters into an immutable session.
    pub fn into_session(self) -> Result<PlaybackSession> {
        let raw_url = non_blank(self.url).ok_or(ModelError::MissingUrl)?;
        let url =
            Url::parse(&raw_url).map_err(|err| ModelError::InvalidUrl {
                url: raw_url.clone(),
                reason: err.to_string(),
            })?;

        let drm = match (non_blank(self.drm_key), non_blank(self.drm_type)) {
            (Some(license_key), Some(drm_type)) => Some(DrmDescriptor {
                drm_type: drm_type.parse::<DrmType>()?,
                license_key,
            }),
            (None, None) => None,
            _ => return Err(ModelError::IncompleteDrm),
        };

        let headers = RequestHeaders {
            referer: non_blank(self.referer),
            origin: non_blank(self.origin),
            cookie: non_blank(self.cookie),
            user_agent: non_blank(self.user_agent),
        };

        Ok(PlaybackSession::new(MediaSource { url, headers }, drm))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_route_builds_session_without_drm() {
        let session = RouteParams::new("https://cdn.example.com/live.m3u8")
            .into_session()
            .unwrap();

        assert_eq!(
            session.source.url.as_str(),
            "https://cdn.example.com/live.m3u8"
        );
        assert!(session.source.headers.is_empty());
        assert!(!session.requires_drm());
    }

    #[test]
    fn missing_or_blank_url_is_rejected() {
        assert_eq!(
            RouteParams::default().into_session(),
            Err(ModelError::MissingUrl)
        );
        assert_eq!(
            RouteParams::new("   ").into_session(),
            Err(ModelError::MissingUrl)
        );
    }

    #[test]
    fn relative_url_is_rejected() {
        let err = RouteParams::new("/relative/path.mp4")
            .into_session()
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidUrl { .. }));
    }

    #[test]
    fn drm_fields_must_come_in_pairs() {
        let mut params = RouteParams::new("https://example.com/a.mpd");
        params.drm_key = Some("https://license.example.com".into());
        assert_eq!(params.into_session(), Err(ModelError::IncompleteDrm));

        let mut params = RouteParams::new("https://example.com/a.mpd");
        params.drm_type = Some("widevine".into());
        assert_eq!(params.into_session(), Err(ModelError::IncompleteDrm));
    }

    #[test]
    fn complete_drm_pair_is_parsed() {
        let mut params = RouteParams::new("https://example.com/a.mpd");
        params.drm_key = Some("https://license.example.com".into());
        params.drm_type = Some("Widevine".into());

        let session = params.into_session().unwrap();
        let drm = session.drm.expect("drm descriptor");
        assert_eq!(drm.drm_type, DrmType::Widevine);
        assert_eq!(drm.license_key, "https://license.example.com");
    }

    #[test]
    fn blank_headers_are_treated_as_absent() {
        let mut params = RouteParams::new("https://example.com/v.mp4");
        params.referer = Some("https://example.com/".into());
        params.cookie = Some("".into());

        let session = params.into_session().unwrap();
        assert_eq!(
            session.source.headers.referer.as_deref(),
            Some("https://example.com/")
        );
        assert_eq!(session.source.headers.cookie, None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_camel_case_route_params() {
        let params: RouteParams = serde_json::from_str(
            r#"{"url":"https://example.com/v.mp4","userAgent":"ua","drmType":"clearkey","drmKey":"k"}"#,
        )
        .unwrap();
        assert_eq!(params.user_agent.as_deref(), Some("ua"));
        assert_eq!(params.drm_type.as_deref(), Some("clearkey"));
    }
}
