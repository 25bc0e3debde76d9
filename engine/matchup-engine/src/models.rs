use serde::{Deserialize, Serialize};
use std::fmt;

/// Receiver efficiency in each coverage and safety-shell situation (YPRR)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SituationalSplits {
    pub man: Option<f64>,
    pub zone: Option<f64>,
    pub one_high: Option<f64>,
    pub two_high: Option<f64>,
    pub zero_high: Option<f64>,
}

impl SituationalSplits {
    /// Every split equal to `value`
    pub fn uniform(value: f64) -> Self {
        Self {
            man: Some(value),
            zone: Some(value),
            one_high: Some(value),
            two_high: Some(value),
            zero_high: Some(value),
        }
    }
}

/// One receiver's season profile joined with this week's opponent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerWeekRecord {
    /// Player name as displayed (e.g., "Ja'Marr Chase")
    pub player: String,

    /// Team abbreviation (e.g., "CIN")
    pub team: String,

    /// Opponent abbreviation; None when the schedule has no game for the team
    pub opponent: Option<String>,

    /// Season YPRR
    pub base_efficiency: f64,

    /// Routes run this season
    pub routes_played: u32,

    /// Pre-computed route share (0-1), used with `RouteShareSource::Supplied`
    pub route_share: Option<f64>,

    /// Coverage and safety-shell splits
    pub splits: SituationalSplits,

    /// YPRR against the blitz; None when the player has no blitz sample
    pub blitz_efficiency: Option<f64>,
}

impl PlayerWeekRecord {
    /// Create a record with every split equal to the base efficiency
    pub fn new(
        player: impl Into<String>,
        team: impl Into<String>,
        opponent: impl Into<String>,
        base_efficiency: f64,
        routes_played: u32,
    ) -> Self {
        Self {
            player: player.into(),
            team: team.into(),
            opponent: Some(opponent.into()),
            base_efficiency,
            routes_played,
            route_share: None,
            splits: SituationalSplits::uniform(base_efficiency),
            blitz_efficiency: None,
        }
    }

    pub fn with_splits(mut self, splits: SituationalSplits) -> Self {
        self.splits = splits;
        self
    }

    pub fn with_blitz(mut self, blitz_efficiency: f64) -> Self {
        self.blitz_efficiency = Some(blitz_efficiency);
        self
    }

    pub fn with_route_share(mut self, route_share: f64) -> Self {
        self.route_share = Some(route_share);
        self
    }
}

/// A defense's tendencies as fractions in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefenseProfile {
    /// Team abbreviation
    pub team: String,
    pub man_rate: f64,
    pub zone_rate: f64,
    pub one_high_rate: f64,
    pub two_high_rate: f64,
    pub zero_high_rate: f64,
    pub blitz_rate: f64,
}

impl DefenseProfile {
    /// Build a profile from 0-100 percentages
    pub fn from_percentages(
        team: impl Into<String>,
        man_pct: f64,
        zone_pct: f64,
        one_high_pct: f64,
        two_high_pct: f64,
        zero_high_pct: f64,
        blitz_pct: f64,
    ) -> Self {
        Self {
            team: team.into(),
            man_rate: man_pct / 100.0,
            zone_rate: zone_pct / 100.0,
            one_high_rate: one_high_pct / 100.0,
            two_high_rate: two_high_pct / 100.0,
            zero_high_rate: zero_high_pct / 100.0,
            blitz_rate: blitz_pct / 100.0,
        }
    }

    /// Sum of the three safety-shell rates
    pub fn shell_total(&self) -> f64 {
        self.one_high_rate + self.two_high_rate + self.zero_high_rate
    }

    /// Sum of the man and zone rates
    pub fn coverage_total(&self) -> f64 {
        self.man_rate + self.zone_rate
    }
}

/// Why a row was left off the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    LowBaseEfficiency,
    NoRoutes,
    NoOpponent,
    UnknownOpponent,
    MissingRouteShare,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::LowBaseEfficiency => write!(f, "base efficiency below minimum"),
            Exclusion::NoRoutes => write!(f, "no routes played"),
            Exclusion::NoOpponent => write!(f, "no opponent this week"),
            Exclusion::UnknownOpponent => write!(f, "opponent has no defense profile"),
            Exclusion::MissingRouteShare => write!(f, "route share not supplied"),
        }
    }
}

/// Intermediate ratios behind an adjusted efficiency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentBreakdown {
    /// man_rate * man_ratio + zone_rate * zone_ratio
    pub coverage: f64,

    /// Shell-weighted average of the shell ratios; None when the shell rates sum to zero
    pub safety: Option<f64>,

    /// Coverage/safety blend before the deviation boost
    pub primary: f64,

    /// Primary ratio after the deviation boost
    pub final_primary: f64,

    /// blitz_rate * blitz_ratio + (1 - blitz_rate)
    pub blitz: f64,

    /// Mean of final_primary and blitz
    pub expected_ratio: f64,
}

/// Split of the final edge score into its matchup and deviation parts.
/// `matchup + deviation == edge_score`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeDecomposition {
    /// Edge score with the primary weighting alone
    pub matchup: f64,

    /// Edge score added by the league-deviation weighting
    pub deviation: f64,
}

/// One scored receiver on the weekly board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupResult {
    /// 1-based board position; 0 until ranked
    pub rank: usize,
    pub player: String,
    pub team: String,
    pub opponent: String,
    pub route_share: f64,
    pub base_efficiency: f64,

    /// Base efficiency times the expected ratio (never penalized)
    pub adjusted_efficiency: f64,

    /// (adjusted - base) / base after capping
    pub raw_edge: f64,

    /// Headline score after the route-share penalty
    pub edge_score: f64,

    /// Edge score before the route-share penalty
    pub unpenalized_edge_score: f64,

    /// Route-share penalty applied to the edge score
    pub penalty: f64,

    pub decomposition: EdgeDecomposition,
    pub components: ComponentBreakdown,
}
