//! Environment overrides for a run.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `SNAKE_TICK_MS` | 400 | tick interval, must be > 0 |
//! | `SNAKE_TILE_SIZE` | 30 | world units per step, must be > 0 |
//! | `SNAKE_SEED` | 1 | item placement seed |
//! | `SNAKE_BOMB_EVERY` | 5 | every Nth ball also drops a bomb, 0 disables |
//! | `SNAKE_TARGET_POINTS` | unset | end the round once reached |
//! | `SNAKE_LOG_PATH` | unset | write `tracing` output to this file |
//!
//! Unset or empty variables fall back to the default. Anything else that does
//! not parse is an error rather than silently ignored.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::core::SnakeConfig;

pub const DEFAULT_SEED: u32 = 1;
pub const DEFAULT_BOMB_EVERY: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub snake: SnakeConfig,
    pub seed: u32,
    pub bomb_every: u32,
    pub target_points: Option<u64>,
    pub log_path: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            snake: SnakeConfig::default(),
            seed: DEFAULT_SEED,
            bomb_every: DEFAULT_BOMB_EVERY,
            target_points: None,
            log_path: None,
        }
    }
}

impl RunConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`RunConfig::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(ms) = parse::<u32>(&lookup, "SNAKE_TICK_MS")? {
            config.snake.tick_ms = positive("SNAKE_TICK_MS", ms)?;
        }
        if let Some(size) = parse::<i32>(&lookup, "SNAKE_TILE_SIZE")? {
            config.snake.tile_size = positive("SNAKE_TILE_SIZE", size)?;
        }
        if let Some(seed) = parse(&lookup, "SNAKE_SEED")? {
            config.seed = seed;
        }
        if let Some(n) = parse(&lookup, "SNAKE_BOMB_EVERY")? {
            config.bomb_every = n;
        }
        config.target_points = parse(&lookup, "SNAKE_TARGET_POINTS")?;
        config.log_path = lookup("SNAKE_LOG_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(config)
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::Invalid { var, value: raw })
}

fn positive<T: PartialOrd + Default + ToString>(var: &'static str, v: T) -> Result<T, ConfigError> {
    if v > T::default() {
        Ok(v)
    } else {
        Err(ConfigError::Invalid {
            var,
            value: v.to_string(),
        })
    }
}
