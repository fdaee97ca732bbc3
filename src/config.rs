use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::port::{Control, Select};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "ML_PLAYGROUND_CONFIG";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Startup configuration, read from an optional JSON file.
///
/// ```json
/// {
///   "seed": 42,
///   "pacing": { "training_step_ms": 100, "agent_step_ms": 250 },
///   "controls": { "sup-dataset-size": 500, "rl-grid-size": 8 },
///   "selections": { "sup-algorithm": "forest" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Fixed RNG seed; fresh entropy when absent.
    pub seed: Option<u64>,
    pub pacing: PacingConfig,
    /// Initial control values, clamped into each control's range.
    pub controls: BTreeMap<Control, f64>,
    /// Initial selector values.
    pub selections: BTreeMap<Select, String>,
}

/// Holds between visual progress steps, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub training_step_ms: u64,
    pub clustering_step_ms: u64,
    pub episode_step_ms: u64,
    pub agent_step_ms: u64,
    /// Delay before the grid is (re)built after layout changes.
    pub settle_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            training_step_ms: 100,
            clustering_step_ms: 100,
            episode_step_ms: 10,
            agent_step_ms: 500,
            settle_ms: 100,
        }
    }
}

impl PacingConfig {
    pub fn training_step(&self) -> Duration {
        Duration::from_millis(self.training_step_ms)
    }

    pub fn clustering_step(&self) -> Duration {
        Duration::from_millis(self.clustering_step_ms)
    }

    pub fn episode_step(&self) -> Duration {
        Duration::from_millis(self.episode_step_ms)
    }

    pub fn agent_step(&self) -> Duration {
        Duration::from_millis(self.agent_step_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

impl DemoConfig {
    /// Resolve the config path from the first CLI argument or [`CONFIG_ENV`].
    pub fn from_env() -> Result<Self> {
        let path = std::env::args_os()
            .nth(1)
            .map(PathBuf::from)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        match path {
            Some(path) => Self::load(&path),
            None => {
                log::debug!("no configuration file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading configuration {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("parsing configuration {}", path.display()))?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: DemoConfig = serde_json::from_str(text).context("invalid JSON")?;
        Ok(config.clamped())
    }

    /// Pull every configured control value into its range.
    fn clamped(mut self) -> Self {
        for (&control, value) in self.controls.iter_mut() {
            let clamped = control.clamp(*value);
            if clamped != *value {
                log::warn!("{control:?} = {value} is out of range, using {clamped}");
                *value = clamped;
            }
        }
        self
    }

    /// Initial value of `control`.
    pub fn control(&self, control: Control) -> f64 {
        self.controls
            .get(&control)
            .copied()
            .unwrap_or_else(|| control.default_value())
    }

    /// Initial value of `select`.
    pub fn selection(&self, select: Select) -> String {
        self.selections
            .get(&select)
            .cloned()
            .unwrap_or_else(|| select.default_value().to_string())
    }
}
