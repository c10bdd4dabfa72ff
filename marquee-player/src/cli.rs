use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use marquee_model::{EngineError, RouteParams, Track, TrackCatalog};

use crate::infra::simulated_engine::SimulationScript;

#[derive(Debug, Clone, Parser)]
#[command(name = "marquee", about = "Full-screen player over a simulated engine")]
pub struct Args {
    /// Media URL
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long)]
    pub referer: Option<String>,
    #[arg(long)]
    pub origin: Option<String>,
    #[arg(long)]
    pub cookie: Option<String>,
    #[arg(long)]
    pub user_agent: Option<String>,
    #[arg(long)]
    pub drm_key: Option<String>,
    /// widevine, playready, clearkey or fairplay
    #[arg(long)]
    pub drm_type: Option<String>,
    /// JSON file with route parameters (camelCase keys); flags win
    #[arg(long)]
    pub route: Option<PathBuf>,

    /// Directory searched for marquee.toml and .env
    #[arg(long, default_value = ".")]
    pub config_root: PathBuf,

    /// Simulated media length in seconds
    #[arg(long, default_value_t = 600.0)]
    pub duration: f64,
    /// Start a buffering stall at this position (seconds)
    #[arg(long)]
    pub stall_at: Option<f64>,
    /// Length of the stall in seconds
    #[arg(long, default_value_t = 5.0)]
    pub stall_for: f64,
    /// Fail at this position (seconds)
    #[arg(long)]
    pub fail_at: Option<f64>,
    /// Engine error code reported with --fail-at
    #[arg(long, default_value_t = 2001)]
    pub fail_code: i32,
    /// Report no tracks on load
    #[arg(long)]
    pub no_tracks: bool,
}

impl Args {
    pub fn route_params(&self) -> anyhow::Result<RouteParams> {
        let mut route = match &self.route {
            Some(path) => {
                let raw = fs::read_to_string(path).with_context(|| {
                    format!("failed to read route from {}", path.display())
                })?;
                serde_json::from_str::<RouteParams>(&raw).with_context(|| {
                    format!("invalid route parameters in {}", path.display())
                })?
            }
            None => RouteParams::default(),
        };

        let overrides = [
            (&mut route.url, &self.url),
            (&mut route.referer, &self.referer),
            (&mut route.origin, &self.origin),
            (&mut route.cookie, &self.cookie),
            (&mut route.user_agent, &self.user_agent),
            (&mut route.drm_key, &self.drm_key),
            (&mut route.drm_type, &self.drm_type),
        ];
        for (slot, flag) in overrides {
            if flag.is_some() {
                slot.clone_from(flag);
            }
        }
        Ok(route)
    }

    pub fn script(&self) -> SimulationScript {
        SimulationScript {
            duration_secs: self.duration.max(0.0),
            tracks: if self.no_tracks {
                TrackCatalog::default()
            } else {
                demo_catalog()
            },
            stall: self
                .stall_at
                .map(|at| (at, Duration::from_secs_f64(self.stall_for.max(0.0)))),
            failure: self.fail_at.map(|at| {
                (
                    at,
                    EngineError::new(Some(self.fail_code), "simulated failure"),
                )
            }),
            ..SimulationScript::default()
        }
    }
}

/// Catalog reported by the simulated engine.
pub fn demo_catalog() -> TrackCatalog {
    TrackCatalog {
        audio: vec![
            Track::new(0).with_language("en").with_codec("aac").with_channels(2),
            Track::new(1)
                .with_language("en")
                .with_title("Commentary")
                .with_codec("aac")
                .with_channels(2),
            Track::new(2).with_language("es").with_codec("eac3").with_channels(6),
        ],
        video: vec![
            Track::new(0).with_height(1080).with_bitrate(6_500_000),
            Track::new(1).with_height(720).with_bitrate(3_200_000),
            Track::new(2).with_height(480).with_bitrate(1_200_000),
        ],
        text: vec![
            Track::new(0).with_language("en").with_codec("text/vtt"),
            Track::new(1).with_language("fr").with_codec("application/x-subrip"),
        ],
    }
}
