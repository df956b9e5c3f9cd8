use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use xcommon::Color;

/// Project level settings read from `icons.yaml`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Config {
    pub logo: Option<PathBuf>,
    pub res: Option<PathBuf>,
    pub background: Option<Color>,
    pub round: bool,
    pub optimize: bool,
}

impl Config {
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Default::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_yaml(&contents).with_context(|| format!("invalid {}", path.display()))
    }

    fn from_yaml(contents: &str) -> Result<Self> {
        let config: Option<RawConfig> = serde_yaml::from_str(contents)?;
        let config = config.unwrap_or_default();
        let background = config
            .background
            .as_deref()
            .map(str::parse::<Color>)
            .transpose()?;
        Ok(Self {
            logo: config.logo,
            res: config.res,
            background,
            round: config.round.unwrap_or_default(),
            optimize: config.optimize.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    logo: Option<PathBuf>,
    res: Option<PathBuf>,
    background: Option<String>,
    round: Option<bool>,
    optimize: Option<bool>,
}
