//! Application configuration from `BLOCKFALL_*` environment variables.

use anyhow::{bail, Context, Result};

use crate::core::SessionConfig;
use crate::types::{DEFAULT_COLS, DEFAULT_ROWS, FRAME_MS, MAX_BOARD_EDGE, MIN_BOARD_EDGE};

pub const ENV_COLS: &str = "BLOCKFALL_COLS";
pub const ENV_ROWS: &str = "BLOCKFALL_ROWS";
pub const ENV_SEED: &str = "BLOCKFALL_SEED";
pub const ENV_FRAME_MS: &str = "BLOCKFALL_FRAME_MS";
pub const ENV_LOG: &str = "BLOCKFALL_LOG";
pub const ENV_LOG_PATH: &str = "BLOCKFALL_LOG_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub cols: u16,
    pub rows: u16,
    pub seed: Option<u64>,
    /// Clock driver cadence in milliseconds
    pub frame_ms: u32,
    /// env_logger filter string
    pub log_filter: String,
    pub log_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            seed: None,
            frame_ms: FRAME_MS,
            log_filter: "info".to_string(),
            log_path: None,
        }
    }
}

impl AppConfig {
    /// Create from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let defaults = Self::default();

        let config = Self {
            cols: parse_or(get(ENV_COLS), ENV_COLS, defaults.cols)?,
            rows: parse_or(get(ENV_ROWS), ENV_ROWS, defaults.rows)?,
            seed: get(ENV_SEED)
                .map(|s| s.parse::<u64>().with_context(|| format!("invalid {ENV_SEED}: {s:?}")))
                .transpose()?,
            frame_ms: parse_or(get(ENV_FRAME_MS), ENV_FRAME_MS, defaults.frame_ms)?,
            log_filter: get(ENV_LOG).unwrap_or(defaults.log_filter),
            log_path: get(ENV_LOG_PATH),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let edges = MIN_BOARD_EDGE..=MAX_BOARD_EDGE;
        if !edges.contains(&self.cols) || !edges.contains(&self.rows) {
            bail!(
                "board edges must be within {MIN_BOARD_EDGE}..={MAX_BOARD_EDGE}, got {}x{}",
                self.cols,
                self.rows
            );
        }
        if self.frame_ms == 0 {
            bail!("{ENV_FRAME_MS} must be at least 1");
        }
        Ok(())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            cols: self.cols,
            rows: self.rows,
            seed: self.seed,
        }
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(s) => s.parse().with_context(|| format!("invalid {key}: {s:?}")),
        None => Ok(default),
    }
}
