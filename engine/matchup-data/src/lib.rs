//! Matchup Data - prepares the weekly input tables for the matchup engine
//!
//! Reads the receiver, defense-tendency, schedule and blitz CSV exports, checks
//! their required columns, converts percentages to fractions and joins them into
//! the player and defense tables the engine scores.

pub mod error;
pub mod loader;
pub mod names;
pub mod prepare;

pub use error::{DataError, Result};
pub use loader::{
    load_blitz, load_defenses, load_matchups, load_players, BlitzTable, MatchupTable,
    DEFENSE_TEAM_COLUMNS,
};
pub use names::normalize_name;
pub use prepare::{prepare, DataPaths, WeeklyInputs};
