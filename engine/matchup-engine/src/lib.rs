//! # MatchupEngine
//!
//! Weekly matchup edge scoring for wide receivers.
//!
//! Each receiver's season yards-per-route-run (YPRR) is re-weighted by the coverage
//! (man/zone), safety shell (zero/one/two-high) and blitz tendencies of the opponent
//! the player faces this week. The resulting efficiency swing is capped, scaled to a ±100
//! edge score, discounted for low route participation and ranked across the league
//! to produce the weekly board with its targets and fades.
//!
//! The engine is a pure function of the prepared player and defense tables plus an
//! [`EngineConfig`]. Loading and joining the raw tables is the job of the
//! `matchup-data` crate.

pub mod board;
pub mod calculator;
pub mod config;
pub mod engine;
pub mod error;
pub mod league;
pub mod models;


pub use board::MatchupBoard;
pub use config::{
    BlendConfig, EdgeConfig, EligibilityConfig, EngineConfig, PenaltyConfig, PrimaryWeighting,
    RankOrder, RankingConfig, RatioClamp, RatioConfig, RouteShareSource, SafetyFallback,
};
pub use engine::MatchupEngine;
pub use error::{EngineError, Result};
pub use league::LeagueTendencies;
pub use models::{
    ComponentBreakdown, DefenseProfile, EdgeDecomposition, Exclusion, MatchupResult,
    PlayerWeekRecord, SituationalSplits,
};

/// Current version of the MatchupEngine
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Players below this season YPRR are never scored
pub const DEFAULT_MIN_BASE_EFFICIENCY: f64 = 0.4;

/// Largest efficiency swing the model credits (±25%)
pub const DEFAULT_EDGE_CAP: f64 = 0.25;

/// Raw edge that maps to an edge score of 100
pub const DEFAULT_EDGE_SCALE: f64 = 0.25;

/// Edge score an edge of exactly `DEFAULT_EDGE_SCALE` maps to
pub const EDGE_SCORE_RANGE: f64 = 100.0;
