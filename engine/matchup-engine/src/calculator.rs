use crate::config::{
    EngineConfig, PenaltyConfig, PrimaryWeighting, RatioConfig, SafetyFallback,
};
use crate::league::LeagueTendencies;
use crate::models::*;
use crate::EDGE_SCORE_RANGE;
use tracing::trace;

/// Shrink a situational split toward the base efficiency.
///
/// `(raw * routes + base * k) / (routes + k)`. Missing, non-finite and non-positive
/// splits fall back to the base efficiency.
pub fn shrink_toward_base(raw: Option<f64>, base: f64, routes: u32, k: f64) -> f64 {
    let Some(value) = raw.filter(|v| v.is_finite() && *v > 0.0) else {
        return base;
    };
    let n = routes as f64;
    let denom = n + k;
    if denom <= 0.0 {
        return value;
    }
    (value * n + base * k) / denom
}

/// Ratio of a situational split to the base efficiency (1.0 = average).
///
/// Applies regression and clamping when configured. A missing split is neutral.
pub fn situational_ratio(raw: Option<f64>, base: f64, routes: u32, ratios: &RatioConfig) -> f64 {
    let value = match ratios.regression_k {
        Some(k) => shrink_toward_base(raw, base, routes, k),
        None => raw.filter(|v| v.is_finite()).unwrap_or(base),
    };
    let ratio = value / base;
    match ratios.clamp {
        Some(clamp) => ratio.clamp(clamp.min, clamp.max),
        None => ratio,
    }
}

/// Ratio of the blitz split to the base efficiency.
///
/// No blitz sample means average performance: exactly 1.0, never 0.
pub fn blitz_ratio(raw: Option<f64>, base: f64, routes: u32, ratios: &RatioConfig) -> f64 {
    match raw.filter(|v| v.is_finite()) {
        Some(value) => situational_ratio(Some(value), base, routes, ratios),
        None => 1.0,
    }
}

/// The five situational ratios of one receiver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SituationalRatios {
    pub man: f64,
    pub zone: f64,
    pub one_high: f64,
    pub two_high: f64,
    pub zero_high: f64,
}

impl SituationalRatios {
    pub fn from_record(record: &PlayerWeekRecord, ratios: &RatioConfig) -> Self {
        let base = record.base_efficiency;
        let routes = record.routes_played;
        let s = &record.splits;
        Self {
            man: situational_ratio(s.man, base, routes, ratios),
            zone: situational_ratio(s.zone, base, routes, ratios),
            one_high: situational_ratio(s.one_high, base, routes, ratios),
            two_high: situational_ratio(s.two_high, base, routes, ratios),
            zero_high: situational_ratio(s.zero_high, base, routes, ratios),
        }
    }
}

/// man_rate * man_ratio + zone_rate * zone_ratio
pub fn coverage_component(defense: &DefenseProfile, ratios: &SituationalRatios) -> f64 {
    defense.man_rate * ratios.man + defense.zone_rate * ratios.zone
}

/// Shell-rate weighted average of the shell ratios.
///
/// Returns None when the three shell rates sum to zero.
pub fn safety_component(defense: &DefenseProfile, ratios: &SituationalRatios) -> Option<f64> {
    let total = defense.shell_total();
    if !(total > 0.0) {
        return None;
    }
    let weighted = defense.one_high_rate * ratios.one_high
        + defense.two_high_rate * ratios.two_high
        + defense.zero_high_rate * ratios.zero_high;
    Some(weighted / total)
}

/// Combine the coverage and safety components into the primary ratio
pub fn primary_ratio(
    coverage: f64,
    safety: Option<f64>,
    defense: &DefenseProfile,
    weighting: PrimaryWeighting,
    fallback: SafetyFallback,
) -> f64 {
    let safety = match (safety, fallback) {
        (Some(s), _) => s,
        (None, SafetyFallback::Exclude) => return coverage,
        (None, SafetyFallback::Zero) => 0.0,
    };

    match weighting {
        PrimaryWeighting::Even => (coverage + safety) / 2.0,
        PrimaryWeighting::SampleWeighted => {
            let wc = defense.coverage_total();
            let ws = defense.shell_total();
            let total = wc + ws;
            if total > 0.0 {
                (wc * coverage + ws * safety) / total
            } else {
                (coverage + safety) / 2.0
            }
        }
    }
}

/// Coverage/safety blend using league-deviation weights `(coverage, safety)`
pub fn alternate_ratio(
    coverage: f64,
    safety: Option<f64>,
    weights: (f64, f64),
    fallback: SafetyFallback,
) -> f64 {
    let (wc, ws) = weights;
    match (safety, fallback) {
        (Some(s), _) => wc * coverage + ws * s,
        (None, SafetyFallback::Exclude) => coverage,
        (None, SafetyFallback::Zero) => wc * coverage,
    }
}

/// blitz_rate * blitz_ratio + (1 - blitz_rate) * 1.0
///
/// Evaluated as `1 + blitz_rate * (blitz_ratio - 1)` so a neutral ratio yields exactly 1.0.
pub fn blitz_component(blitz_rate: f64, blitz_ratio: f64) -> f64 {
    1.0 + blitz_rate * (blitz_ratio - 1.0)
}

/// Relative efficiency swing, capped to `[-cap, cap]` when a cap is set
pub fn raw_edge(adjusted: f64, base: f64, cap: Option<f64>) -> f64 {
    let edge = (adjusted - base) / base;
    match cap {
        Some(cap) => edge.clamp(-cap, cap),
        None => edge,
    }
}

/// Scale a raw edge so that `scale` maps to 100
pub fn edge_score(raw_edge: f64, scale: f64) -> f64 {
    (raw_edge / scale) * EDGE_SCORE_RANGE
}

/// Penalty for low route participation.
///
/// 0 at or above `start`, `max_penalty` at or below `end`, and a convex ramp
/// `max_penalty * ((start - share) / (start - end)) ^ exponent` in between.
pub fn route_share_penalty(route_share: f64, penalty: &PenaltyConfig) -> f64 {
    if route_share >= penalty.start {
        0.0
    } else if route_share <= penalty.end {
        penalty.max_penalty
    } else {
        let span = penalty.start - penalty.end;
        let depth = (penalty.start - route_share) / span;
        penalty.max_penalty * depth.powf(penalty.exponent)
    }
}

/// Per-row matchup calculator
#[derive(Debug, Clone)]
pub struct MatchupCalculator {
    config: EngineConfig,
}

impl MatchupCalculator {
    /// Create a new matchup calculator
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Score one eligible receiver against their opponent.
    ///
    /// The returned result is unranked (`rank == 0`).
    pub fn calculate(
        &self,
        record: &PlayerWeekRecord,
        defense: &DefenseProfile,
        route_share: f64,
        league: &LeagueTendencies,
    ) -> MatchupResult {
        let cfg = &self.config;
        let base = record.base_efficiency;

        let ratios = SituationalRatios::from_record(record, &cfg.ratios);
        let blitz_ratio =
            blitz_ratio(record.blitz_efficiency, base, record.routes_played, &cfg.ratios);

        let coverage = coverage_component(defense, &ratios);
        let safety = safety_component(defense, &ratios);
        let primary = primary_ratio(
            coverage,
            safety,
            defense,
            cfg.blend.weighting,
            cfg.blend.safety_fallback,
        );

        let boost = cfg.blend.deviation_boost;
        let final_primary = if boost > 0.0 {
            let weights = league.alternate_weights(defense);
            let alternate = alternate_ratio(coverage, safety, weights, cfg.blend.safety_fallback);
            primary * (1.0 - boost) + alternate * boost
        } else {
            primary
        };

        let blitz = blitz_component(defense.blitz_rate, blitz_ratio);
        let penalty = route_share_penalty(route_share, &cfg.penalty);

        let (adjusted_efficiency, raw, unpenalized) = self.edge_for(base, final_primary, blitz);
        let edge_score = unpenalized * (1.0 - penalty);

        let matchup = if boost > 0.0 {
            let (_, _, matchup_unpenalized) = self.edge_for(base, primary, blitz);
            matchup_unpenalized * (1.0 - penalty)
        } else {
            edge_score
        };

        trace!(
            player = %record.player,
            coverage,
            ?safety,
            primary,
            final_primary,
            blitz,
            route_share,
            penalty,
            edge_score,
            "scored matchup"
        );

        MatchupResult {
            rank: 0,
            player: record.player.clone(),
            team: record.team.clone(),
            opponent: defense.team.clone(),
            route_share,
            base_efficiency: base,
            adjusted_efficiency,
            raw_edge: raw,
            edge_score,
            unpenalized_edge_score: unpenalized,
            penalty,
            decomposition: EdgeDecomposition { matchup, deviation: edge_score - matchup },
            components: ComponentBreakdown {
                coverage,
                safety,
                primary,
                final_primary,
                blitz,
                expected_ratio: (final_primary + blitz) / 2.0,
            },
        }
    }

    /// (adjusted efficiency, raw edge, unpenalized edge score) for a primary ratio
    fn edge_for(&self, base: f64, primary: f64, blitz: f64) -> (f64, f64, f64) {
        let expected_ratio = (primary + blitz) / 2.0;
        let adjusted = base * expected_ratio;
        let raw = raw_edge(adjusted, base, self.config.edge.cap);
        (adjusted, raw, edge_score(raw, self.config.edge.scale))
    }
}
