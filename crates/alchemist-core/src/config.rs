use crate::error::{AlchemistError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Generation mode. Each mode owns a disjoint model tier list and ceiling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Fast,
    Smart,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Fast => "fast",
            Mode::Smart => "smart",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = AlchemistError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" => Ok(Mode::Fast),
            "smart" => Ok(Mode::Smart),
            _ => Err(AlchemistError::InvalidMode(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ModelTier
// ---------------------------------------------------------------------------

/// Ordered model identifiers tried in sequence, plus the token ceiling above
/// which a request's context is chunked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelTier {
    pub models: Vec<String>,
    pub token_ceiling: usize,
}

impl ModelTier {
    pub fn new<I, S>(models: I, token_ceiling: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            models: models.into_iter().map(Into::into).collect(),
            token_ceiling,
        }
    }

    /// First model in the list, if any.
    pub fn lead(&self) -> Option<&str> {
        self.models.first().map(String::as_str)
    }
}

fn default_smart_tier() -> ModelTier {
    ModelTier::new(
        ["gemini-3-flash", "gemini-2.5-flash", "gemini-2.5-flash-lite"],
        230_000,
    )
}

fn default_fast_tier() -> ModelTier {
    ModelTier::new(["gemma-3-27b-it", "gemma-3-12b-it", "gemma-3-4b-it"], 12_000)
}

// ---------------------------------------------------------------------------
// ReduceOrder
// ---------------------------------------------------------------------------

/// Order in which chunk findings are concatenated for the synthesis call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReduceOrder {
    /// Batch submission order, completion order within a batch.
    #[default]
    Completion,
    /// Original chunk order, regardless of completion timing.
    Chunk,
}

// ---------------------------------------------------------------------------
// GenerationConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_fast_tier")]
    pub fast: ModelTier,
    #[serde(default = "default_smart_tier")]
    pub smart: ModelTier,
    /// Chunks analysed concurrently per batch.
    #[serde(default = "default_batch_width")]
    pub batch_width: usize,
    /// Pause between batches, in milliseconds.
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,
    #[serde(default)]
    pub reduce_order: ReduceOrder,
}

fn default_batch_width() -> usize {
    2
}

fn default_batch_delay_ms() -> u64 {
    2_000
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            fast: default_fast_tier(),
            smart: default_smart_tier(),
            batch_width: default_batch_width(),
            batch_delay_ms: default_batch_delay_ms(),
            reduce_order: ReduceOrder::default(),
        }
    }
}

impl GenerationConfig {
    pub fn tier(&self, mode: Mode) -> &ModelTier {
        match mode {
            Mode::Fast => &self.fast,
            Mode::Smart => &self.smart,
        }
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        for mode in [Mode::Fast, Mode::Smart] {
            let tier = self.tier(mode);
            if tier.models.is_empty() {
                warnings.push(error(format!("{mode} tier has no models")));
            }
            if tier.models.iter().any(|m| m.trim().is_empty()) {
                warnings.push(error(format!("{mode} tier contains an empty model id")));
            }
            if tier.token_ceiling == 0 {
                warnings.push(error(format!("{mode} tier token_ceiling must be positive")));
            }
            let mut seen = HashSet::new();
            for model in &tier.models {
                if !seen.insert(model.as_str()) {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!("{mode} tier lists '{model}' more than once"),
                    });
                }
            }
        }

        let fast: HashSet<&str> = self.fast.models.iter().map(String::as_str).collect();
        for model in &self.smart.models {
            if fast.contains(model.as_str()) {
                warnings.push(error(format!(
                    "model '{model}' appears in both fast and smart tiers"
                )));
            }
        }

        if self.batch_width == 0 {
            warnings.push(error("batch_width must be at least 1".to_string()));
        }

        warnings
    }

    /// Collapse [`validate`](Self::validate) errors into a single failure.
    pub fn ensure_valid(&self) -> Result<()> {
        let errors: Vec<String> = self
            .validate()
            .into_iter()
            .filter(|w| w.level == WarnLevel::Error)
            .map(|w| w.message)
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AlchemistError::InvalidConfig(errors.join("; ")))
        }
    }
}

fn error(message: String) -> ConfigWarning {
    ConfigWarning {
        level: WarnLevel::Error,
        message,
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub generation: GenerationConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            generation: GenerationConfig::default(),
        }
    }
}

impl Config {
    /// Load `.alchemist/config.yaml` under `root`, falling back to defaults
    /// when the file does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        self.generation.validate()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
