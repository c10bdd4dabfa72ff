use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use marquee_model::PlayerFeatures;
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::features::FeaturesFile;
use crate::util::{parse_bool, parse_optional_duration};

pub const FEATURES_PATH_VAR: &str = "MARQUEE_FEATURES_PATH";
pub const FEATURES_JSON_VAR: &str = "MARQUEE_FEATURES_JSON";
pub const AUTOPLAY_VAR: &str = "MARQUEE_AUTOPLAY";
pub const SKIP_INTERVAL_VAR: &str = "MARQUEE_SKIP_INTERVAL_MS";
pub const STALL_TIMEOUT_VAR: &str = "MARQUEE_STALL_TIMEOUT";

const DEFAULT_FILES: &[&str] = &[
    "marquee.toml",
    "marquee.json",
    "config/marquee.toml",
    "config/marquee.json",
];

/// Source that produced the feature configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeaturesSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// Resolved features plus where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturesLoad {
    pub features: PlayerFeatures,
    pub source: FeaturesSource,
    /// Names of the individual environment overrides that were applied
    pub overrides: Vec<&'static str>,
}

/// Resolves [`PlayerFeatures`] in this order:
/// 1) `$MARQUEE_FEATURES_PATH` (TOML or JSON file),
/// 2) `$MARQUEE_FEATURES_JSON` (inline JSON),
/// 3) `marquee.toml` / `config/marquee.toml` (or `.json`) under the root,
/// 4) defaults.
///
/// `MARQUEE_AUTOPLAY`, `MARQUEE_SKIP_INTERVAL_MS` and `MARQUEE_STALL_TIMEOUT`
/// are applied on top, then the result is validated.
#[derive(Debug, Clone)]
pub struct FeaturesLoader {
    root: PathBuf,
    /// Fixed variables instead of the process environment
    vars: Option<HashMap<String, String>>,
    env_file: Option<PathBuf>,
}

impl Default for FeaturesLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FeaturesLoader {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("."),
            vars: None,
            env_file: Some(PathBuf::from(".env")),
        }
    }

    /// Directory the default files and `.env` are looked up in.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Read variables from `vars` instead of the process environment. No
    /// `.env` file is read in this mode.
    pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.vars = Some(
            vars.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
        self.env_file = None;
        self
    }

    pub fn without_env_file(mut self) -> Self {
        self.env_file = None;
        self
    }

    /// Shorthand for `FeaturesLoader::new().load()`.
    pub fn load_from_env() -> Result<FeaturesLoad, ConfigError> {
        Self::new().load()
    }

    pub fn load(&self) -> Result<FeaturesLoad, ConfigError> {
        self.read_env_file()?;

        let (mut file, source) = self.resolve_file()?;
        let overrides = self.apply_overrides(&mut file)?;
        let features = file.into_features()?;

        info!(
            source = ?source,
            overrides = ?overrides,
            "Resolved player features"
        );
        Ok(FeaturesLoad {
            features,
            source,
            overrides,
        })
    }

    fn var(&self, name: &str) -> Option<String> {
        let value = match &self.vars {
            Some(vars) => vars.get(name).cloned(),
            None => env::var(name).ok(),
        };
        value.filter(|raw| !raw.trim().is_empty())
    }

    fn read_env_file(&self) -> Result<(), ConfigError> {
        let Some(env_file) = &self.env_file else {
            return Ok(());
        };
        let path = self.root.join(env_file);
        if !path.exists() {
            return Ok(());
        }
        dotenvy::from_path(&path)
            .map_err(|source| ConfigError::EnvFile { path: path.clone(), source })?;
        debug!("Loaded environment from {}", path.display());
        Ok(())
    }

    fn resolve_file(&self) -> Result<(FeaturesFile, FeaturesSource), ConfigError> {
        if let Some(path) = self.var(FEATURES_PATH_VAR) {
            let path = PathBuf::from(path);
            let file = load_from_file(&path).map_err(|source| {
                ConfigError::Source {
                    origin: FEATURES_PATH_VAR.to_string(),
                    source,
                }
            })?;
            return Ok((file, FeaturesSource::EnvPath(path)));
        }

        if let Some(raw) = self.var(FEATURES_JSON_VAR) {
            let file = parse_json(&raw)
                .with_context(|| format!("failed to parse {FEATURES_JSON_VAR}"))
                .map_err(|source| ConfigError::Source {
                    origin: FEATURES_JSON_VAR.to_string(),
                    source,
                })?;
            return Ok((file, FeaturesSource::EnvInline));
        }

        if let Some(path) = self.find_default_file() {
            let file = load_from_file(&path).map_err(|source| {
                ConfigError::Source {
                    origin: path.display().to_string(),
                    source,
                }
            })?;
            return Ok((file, FeaturesSource::File(path)));
        }

        Ok((FeaturesFile::default(), FeaturesSource::Default))
    }

    fn apply_overrides(
        &self,
        file: &mut FeaturesFile,
    ) -> Result<Vec<&'static str>, ConfigError> {
        let mut applied = Vec::new();

        if let Some(raw) = self.var(AUTOPLAY_VAR) {
            file.autoplay = parse_bool(&raw).ok_or(ConfigError::InvalidOverride {
                name: AUTOPLAY_VAR,
                value: raw,
            })?;
            applied.push(AUTOPLAY_VAR);
        }

        if let Some(raw) = self.var(SKIP_INTERVAL_VAR) {
            file.skip_interval_ms = raw.trim().parse().map_err(|_| {
                ConfigError::InvalidOverride {
                    name: SKIP_INTERVAL_VAR,
                    value: raw.clone(),
                }
            })?;
            applied.push(SKIP_INTERVAL_VAR);
        }

        if let Some(raw) = self.var(STALL_TIMEOUT_VAR) {
            // Parse now so the error names the variable, not the file field
            parse_optional_duration(&raw).map_err(|source| {
                ConfigError::InvalidDuration {
                    field: STALL_TIMEOUT_VAR,
                    value: raw.clone(),
                    source,
                }
            })?;
            file.buffering_stall_timeout = raw;
            applied.push(STALL_TIMEOUT_VAR);
        }

        Ok(applied)
    }

    fn find_default_file(&self) -> Option<PathBuf> {
        DEFAULT_FILES
            .iter()
            .map(|candidate| self.root.join(candidate))
            .find(|path| path.is_file())
    }
}

pub fn load_from_file(path: &Path) -> anyhow::Result<FeaturesFile> {
    let contents = fs::read_to_string(path).with_context(|| {
        format!("failed to read features from {}", path.display())
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_json(&contents)
            .with_context(|| format!("invalid features {}", path.display())),
        Some("toml") => toml::from_str(&contents).map_err(|err| {
            anyhow!("invalid features {}: {}", path.display(), err)
        }),
        _ => parse_from_str(&contents, &path.display().to_string()),
    }
}

pub fn parse_from_str(contents: &str, origin: &str) -> anyhow::Result<FeaturesFile> {
    // TOML first, then JSON
    toml::from_str(contents).or_else(|toml_err| {
        serde_json::from_str(contents).map_err(|json_err| {
            anyhow!(
                "failed to parse features {}: toml error: {}; json error: {}",
                origin,
                toml_err,
                json_err
            )
        })
    })
}

pub fn parse_json(raw: &str) -> anyhow::Result<FeaturesFile> {
    serde_json::from_str(raw).map_err(|err| anyhow!("invalid features json: {err}"))
}
