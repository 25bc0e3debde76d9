//! # Command Line Interface
//!
//! Arguments for building one week's matchup board.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Weekly receiver matchup board
#[derive(Parser, Debug, Default)]
#[command(name = "matchup-board")]
#[command(about = "Rank receivers by this week's coverage, shell and blitz matchup")]
#[command(version)]
pub struct Cli {
    /// Receiver YPRR table (CSV)
    #[arg(long, value_name = "CSV")]
    pub players: Option<PathBuf>,

    /// Defense tendency table (CSV, percentages 0-100)
    #[arg(long, value_name = "CSV")]
    pub defenses: Option<PathBuf>,

    /// Weekly schedule (CSV with team,opponent)
    #[arg(long, value_name = "CSV")]
    pub matchups: Option<PathBuf>,

    /// Blitz YPRR table (CSV with player,yprr_blitz)
    #[arg(long, value_name = "CSV", conflicts_with = "no_blitz")]
    pub blitz: Option<PathBuf>,

    /// Skip the blitz table; only inline yprr_blitz values are used
    #[arg(long)]
    pub no_blitz: bool,

    /// Board configuration file (TOML)
    #[arg(short, long, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Use a preset engine configuration instead of the defaults
    #[arg(long, value_enum, conflicts_with = "config")]
    pub preset: Option<Preset>,

    /// Only rank receivers running at least 35% of the league-lead routes
    #[arg(long)]
    pub qualified: bool,

    /// Only show these teams (repeatable); ranks are kept from the full board
    #[arg(long = "team", value_name = "CODE")]
    pub teams: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Show at most this many ranked rows
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Show route share as a percentage
    #[arg(long)]
    pub percent: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (pretty, json)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text tables
    #[default]
    Table,
    /// One JSON document with rankings, targets and fades
    Json,
}

/// Engine presets matching the two published board variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Default board with targets at +/-15 and 50% route share
    Weekly,
    /// Absolute-order board with a 35% qualifier and targets at +/-7.5
    Receiver,
}
