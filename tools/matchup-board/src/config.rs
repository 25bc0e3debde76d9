//! Board configuration management
//!
//! Settings are layered: TOML file (or preset), then `MATCHUP_*` environment
//! variables, then command-line flags.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use matchup_data::DataPaths;
use matchup_engine::EngineConfig;

use crate::cli::{Cli, Preset};

/// Route-share floor applied by `--qualified`
pub const QUALIFIED_ROUTE_SHARE: f64 = 0.35;

/// Main board configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Scoring engine configuration
    pub engine: EngineConfig,

    /// Input table locations
    pub data: DataPaths,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (pretty, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string(), format: "pretty".to_string() }
    }
}

impl From<Preset> for EngineConfig {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Weekly => EngineConfig::weekly_board(),
            Preset::Receiver => EngineConfig::receiver_board(),
        }
    }
}

/// Build the board configuration for this invocation
pub fn load_config(cli: &Cli) -> Result<BoardConfig> {
    resolve_config(cli, |key| std::env::var(key).ok())
}

fn resolve_config<F>(cli: &Cli, env_lookup: F) -> Result<BoardConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config {
        Some(path) => load_from_file(path)?,
        None => BoardConfig::default(),
    };

    if let Some(preset) = cli.preset {
        config.engine = preset.into();
    }

    // Override with environment variables
    apply_env(&mut config, env_lookup);

    // Command-line flags win
    apply_cli(&mut config, cli);

    validate_config(&config)?;

    Ok(config)
}

/// Load configuration from a TOML file
pub fn load_from_file(path: &Path) -> Result<BoardConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
}

/// Save configuration to a TOML file
pub fn save_config(config: &BoardConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {:?}", path))
}

/// Apply `MATCHUP_*` overrides from an environment lookup
fn apply_env<F>(config: &mut BoardConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(players) = lookup("MATCHUP_PLAYERS") {
        config.data.players = PathBuf::from(players);
    }

    if let Some(defenses) = lookup("MATCHUP_DEFENSES") {
        config.data.defenses = PathBuf::from(defenses);
    }

    if let Some(matchups) = lookup("MATCHUP_MATCHUPS") {
        config.data.matchups = PathBuf::from(matchups);
    }

    // An empty value or "none" turns the blitz table off
    if let Some(blitz) = lookup("MATCHUP_BLITZ") {
        config.data.blitz = match blitz.trim() {
            "" | "none" => None,
            path => Some(PathBuf::from(path)),
        };
    }

    if let Some(level) = lookup("MATCHUP_LOG_LEVEL") {
        config.logging.level = level;
    }

    if let Some(format) = lookup("MATCHUP_LOG_FORMAT") {
        config.logging.format = format;
    }
}

fn apply_cli(config: &mut BoardConfig, cli: &Cli) {
    if let Some(players) = &cli.players {
        config.data.players = players.clone();
    }
    if let Some(defenses) = &cli.defenses {
        config.data.defenses = defenses.clone();
    }
    if let Some(matchups) = &cli.matchups {
        config.data.matchups = matchups.clone();
    }
    if let Some(blitz) = &cli.blitz {
        config.data.blitz = Some(blitz.clone());
    }
    if cli.no_blitz {
        config.data.blitz = None;
    }
    if cli.qualified {
        config.engine.ranking.qualified_route_share = Some(QUALIFIED_ROUTE_SHARE);
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }
}

/// Validate configuration
pub fn validate_config(config: &BoardConfig) -> Result<()> {
    config.engine.validate().context("Invalid engine configuration")?;

    // Validate log level
    match config.logging.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow::anyhow!("Invalid log level: {}", config.logging.level)),
    }

    // Validate log format
    match config.logging.format.as_str() {
        "json" | "pretty" => {}
        _ => return Err(anyhow::anyhow!("Invalid log format: {}", config.logging.format)),
    }

    Ok(())
}
