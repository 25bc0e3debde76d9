//! Configuration for the MatchupEngine

use crate::error::{EngineError, Result};
use crate::{DEFAULT_EDGE_CAP, DEFAULT_EDGE_SCALE, DEFAULT_MIN_BASE_EFFICIENCY};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the MatchupEngine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Score rows on the rayon thread pool
    pub parallel: bool,

    /// Route-share penalty curve
    pub penalty: PenaltyConfig,

    /// Situational ratio shrinkage and clamping
    pub ratios: RatioConfig,

    /// How coverage, safety and deviation terms are blended
    pub blend: BlendConfig,

    /// Edge capping and scaling
    pub edge: EdgeConfig,

    /// Row eligibility rules
    pub eligibility: EligibilityConfig,

    /// Ranking, qualification and target/fade thresholds
    pub ranking: RankingConfig,
}

/// Route-share penalty curve applied to the edge score.
///
/// Shares are fractions of the league-lead route count (or of the supplied
/// route share, see [`RouteShareSource`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyConfig {
    /// Ceiling of the penalty, reached at `end` and below
    pub max_penalty: f64,

    /// Curvature of the ramp between `start` and `end`
    pub exponent: f64,

    /// Route share at or above which no penalty applies
    pub start: f64,

    /// Route share at or below which `max_penalty` applies
    pub end: f64,
}

/// Shrinkage and clamping of the situational splits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RatioConfig {
    /// Routes of pseudo-sample pulling each split toward the base efficiency
    pub regression_k: Option<f64>,

    /// Hard bounds on every situational ratio
    pub clamp: Option<RatioClamp>,
}

/// Inclusive bounds for a situational ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioClamp {
    pub min: f64,
    pub max: f64,
}

/// Blend of the coverage, safety and deviation terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendConfig {
    /// How coverage and safety combine into the primary ratio
    pub weighting: PrimaryWeighting,

    /// Weight of the league-deviation alternate ratio (0 disables it)
    pub deviation_boost: f64,

    /// Safety term handling when the opponent's shell rates sum to zero
    pub safety_fallback: SafetyFallback,
}

/// How coverage and safety combine into the primary ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryWeighting {
    /// Plain mean of the two components
    Even,
    /// Weighted by (man + zone) and by the shell-rate sum
    SampleWeighted,
}

/// Safety term handling when the opponent's shell rates sum to zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyFallback {
    /// Drop the safety term; the primary ratio is the coverage component
    Exclude,
    /// Keep the safety term at 0 in the mean
    Zero,
}

/// Edge capping and scaling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeConfig {
    /// Symmetric cap on the raw edge fraction. None disables the cap and is
    /// written to TOML as `cap = inf`.
    #[serde(with = "uncapped_as_inf")]
    pub cap: Option<f64>,

    /// Raw edge that maps to an edge score of 100
    pub scale: f64,
}

/// TOML has no null, so an absent cap round-trips through `inf`
mod uncapped_as_inf {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(cap: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(cap.unwrap_or(f64::INFINITY))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let cap = Option::<f64>::deserialize(d)?;
        Ok(cap.filter(|c| *c != f64::INFINITY))
    }
}

/// Row eligibility rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityConfig {
    /// Minimum season YPRR to be scored
    pub min_base_efficiency: f64,

    /// Where the route share comes from
    pub route_share_source: RouteShareSource,
}

/// Where the route share comes from. One source is used for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteShareSource {
    /// routes_played / max routes_played over eligible players
    LeagueLead,
    /// The record's own `route_share` field
    Supplied,
}

/// Ranking, qualification and target/fade thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Sort key of the board
    pub order: RankOrder,

    /// Drop rows below this route share before ranking
    pub qualified_route_share: Option<f64>,

    /// |edge| needed to be a target (positive) or fade (negative)
    pub target_edge: f64,

    /// Route share needed to be a target or fade
    pub target_min_route_share: f64,
}

/// Sort key of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankOrder {
    /// Largest |edge_score| first
    Absolute,
    /// Largest edge_score first
    Signed,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::weekly_board()
    }
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self { max_penalty: 0.8, exponent: 2.0, start: 0.50, end: 0.05 }
    }
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            weighting: PrimaryWeighting::Even,
            deviation_boost: 0.0,
            safety_fallback: SafetyFallback::Exclude,
        }
    }
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self { cap: Some(DEFAULT_EDGE_CAP), scale: DEFAULT_EDGE_SCALE }
    }
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            min_base_efficiency: DEFAULT_MIN_BASE_EFFICIENCY,
            route_share_source: RouteShareSource::LeagueLead,
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            order: RankOrder::Absolute,
            qualified_route_share: None,
            target_edge: 15.0,
            target_min_route_share: 0.50,
        }
    }
}

impl EngineConfig {
    /// Coverage + blitz weekly board: targets at ±15 edge with half the league-lead routes
    pub fn weekly_board() -> Self {
        Self {
            penalty: PenaltyConfig::default(),
            ratios: RatioConfig::default(),
            blend: BlendConfig::default(),
            edge: EdgeConfig::default(),
            eligibility: EligibilityConfig::default(),
            ranking: RankingConfig::default(),
            parallel: false,
        }
    }

    /// Receiver board: 35% qualification, targets at ±7.5 edge with 40% of routes
    pub fn receiver_board() -> Self {
        Self {
            ranking: RankingConfig {
                order: RankOrder::Absolute,
                qualified_route_share: Some(0.35),
                target_edge: 7.5,
                target_min_route_share: 0.40,
            },
            ..Self::weekly_board()
        }
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to TOML file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let p = &self.penalty;
        if !(0.0..=1.0).contains(&p.max_penalty) {
            return Err(EngineError::config(format!(
                "max_penalty must be within [0, 1], got {}",
                p.max_penalty
            )));
        }
        if !(p.exponent > 0.0) {
            return Err(EngineError::config(format!(
                "penalty exponent must be positive, got {}",
                p.exponent
            )));
        }
        if !(p.start > p.end) {
            return Err(EngineError::config(format!(
                "penalty start ({}) must be greater than penalty end ({})",
                p.start, p.end
            )));
        }
        if p.end < 0.0 {
            return Err(EngineError::config(format!("penalty end must be >= 0, got {}", p.end)));
        }

        if let Some(k) = self.ratios.regression_k {
            if !(k >= 0.0) {
                return Err(EngineError::config(format!("regression_k must be >= 0, got {k}")));
            }
        }
        if let Some(clamp) = self.ratios.clamp {
            if !(clamp.min > 0.0 && clamp.min < clamp.max) {
                return Err(EngineError::config(format!(
                    "ratio clamp must satisfy 0 < min < max, got [{}, {}]",
                    clamp.min, clamp.max
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.blend.deviation_boost) {
            return Err(EngineError::config(format!(
                "deviation_boost must be within [0, 1], got {}",
                self.blend.deviation_boost
            )));
        }

        if !(self.edge.scale > 0.0) {
            return Err(EngineError::config(format!(
                "edge scale must be positive, got {}",
                self.edge.scale
            )));
        }
        if let Some(cap) = self.edge.cap {
            if !(cap > 0.0) {
                return Err(EngineError::config(format!("edge cap must be positive, got {cap}")));
            }
        }

        if !(self.eligibility.min_base_efficiency >= 0.0) {
            return Err(EngineError::config(format!(
                "min_base_efficiency must be >= 0, got {}",
                self.eligibility.min_base_efficiency
            )));
        }

        let r = &self.ranking;
        if !(r.target_edge > 0.0) {
            return Err(EngineError::config(format!(
                "target_edge must be positive, got {}",
                r.target_edge
            )));
        }
        if !(r.target_min_route_share >= 0.0) {
            return Err(EngineError::config(format!(
                "target_min_route_share must be >= 0, got {}",
                r.target_min_route_share
            )));
        }
        if let Some(q) = r.qualified_route_share {
            if !(q >= 0.0) {
                return Err(EngineError::config(format!(
                    "qualified_route_share must be >= 0, got {q}"
                )));
            }
        }

        Ok(())
    }
}
