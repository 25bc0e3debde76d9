use std::collections::HashMap;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    board::MatchupBoard,
    calculator::MatchupCalculator,
    config::{EngineConfig, RankOrder, RouteShareSource},
    error::Result,
    league::LeagueTendencies,
    models::{DefenseProfile, Exclusion, MatchupResult, PlayerWeekRecord},
};

/// The Matchup Adjustment Engine.
///
/// Stateless between runs: every call to [`MatchupEngine::run`] builds a fresh
/// board from the two input tables.
#[derive(Debug, Clone)]
pub struct MatchupEngine {
    config: EngineConfig,
    calculator: MatchupCalculator,
}

/// A row that passed eligibility, paired with its opponent's profile
struct Eligible<'a> {
    record: &'a PlayerWeekRecord,
    defense: &'a DefenseProfile,
}

impl MatchupEngine {
    /// Create a new engine; fails on an invalid configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let calculator = MatchupCalculator::new(config.clone());
        Ok(Self { config, calculator })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score and rank every eligible player
    pub fn run(
        &self,
        players: &[PlayerWeekRecord],
        defenses: &HashMap<String, DefenseProfile>,
    ) -> MatchupBoard {
        let results = self.score(players, defenses);
        let scored = results.len();
        let board = self.rank(results);
        info!(
            "Matchup board built: {} players in, {} scored, {} ranked, {} targets, {} fades",
            players.len(),
            scored,
            board.len(),
            board.targets().len(),
            board.fades().len()
        );
        board
    }

    /// Score every eligible player, in input order and unranked.
    ///
    /// Ineligible rows are dropped silently (logged at debug level).
    pub fn score(
        &self,
        players: &[PlayerWeekRecord],
        defenses: &HashMap<String, DefenseProfile>,
    ) -> Vec<MatchupResult> {
        let eligible: Vec<Eligible<'_>> = players
            .iter()
            .filter_map(|record| match self.check_eligibility(record, defenses) {
                Ok(defense) => Some(Eligible { record, defense }),
                Err(reason) => {
                    debug!(player = %record.player, team = %record.team, %reason, "excluded");
                    None
                }
            })
            .collect();

        let league_lead = eligible.iter().map(|e| e.record.routes_played).max().unwrap_or(0);
        let league = LeagueTendencies::from_profiles(defenses.values());
        debug!(
            league_lead,
            teams = league.sample_teams,
            "scoring {} eligible of {} players",
            eligible.len(),
            players.len()
        );

        let score_one = |e: &Eligible<'_>| {
            let route_share = self.route_share(e.record, league_lead);
            self.calculator.calculate(e.record, e.defense, route_share, &league)
        };

        // Indexed parallel collect keeps input order
        if self.config.parallel {
            eligible.par_iter().map(score_one).collect()
        } else {
            eligible.iter().map(score_one).collect()
        }
    }

    /// Apply the qualification filter, sort, and assign dense ranks 1..M.
    ///
    /// The sort is stable, so equal keys keep input order.
    pub fn rank(&self, results: Vec<MatchupResult>) -> MatchupBoard {
        let ranking = &self.config.ranking;

        let mut rows: Vec<MatchupResult> = match ranking.qualified_route_share {
            Some(min_share) => results.into_iter().filter(|r| r.route_share >= min_share).collect(),
            None => results,
        };

        // +0.0 folds -0.0 into 0.0 so total_cmp treats them as a tie
        let key = |r: &MatchupResult| match ranking.order {
            RankOrder::Absolute => r.edge_score.abs() + 0.0,
            RankOrder::Signed => r.edge_score + 0.0,
        };
        rows.sort_by(|a, b| key(b).total_cmp(&key(a)));

        for (i, row) in rows.iter_mut().enumerate() {
            row.rank = i + 1;
        }

        MatchupBoard::new(rows, ranking.target_edge, ranking.target_min_route_share)
    }

    fn check_eligibility<'a>(
        &self,
        record: &PlayerWeekRecord,
        defenses: &'a HashMap<String, DefenseProfile>,
    ) -> std::result::Result<&'a DefenseProfile, Exclusion> {
        if !(record.base_efficiency >= self.config.eligibility.min_base_efficiency)
            || !(record.base_efficiency > 0.0)
        {
            return Err(Exclusion::LowBaseEfficiency);
        }
        if record.routes_played == 0 {
            return Err(Exclusion::NoRoutes);
        }
        if self.config.eligibility.route_share_source == RouteShareSource::Supplied
            && !record.route_share.is_some_and(f64::is_finite)
        {
            warn!(player = %record.player, "route share not supplied; skipping");
            return Err(Exclusion::MissingRouteShare);
        }
        let opponent = record.opponent.as_deref().ok_or(Exclusion::NoOpponent)?;
        defenses.get(opponent).ok_or(Exclusion::UnknownOpponent)
    }

    fn route_share(&self, record: &PlayerWeekRecord, league_lead: u32) -> f64 {
        match self.config.eligibility.route_share_source {
            RouteShareSource::LeagueLead if league_lead > 0 => {
                record.routes_played as f64 / league_lead as f64
            }
            RouteShareSource::LeagueLead => 0.0,
            RouteShareSource::Supplied => record.route_share.unwrap_or(0.0),
        }
    }
}
