//! The ranked weekly board and its targets/fades views

use crate::models::MatchupResult;
use serde::{Deserialize, Serialize};

/// Ranked matchup results.
///
/// Rows are held in rank order. Targets and fades are derived on demand from
/// the thresholds the board was built with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupBoard {
    rankings: Vec<MatchupResult>,
    target_edge: f64,
    target_min_route_share: f64,
}

impl MatchupBoard {
    pub fn new(rankings: Vec<MatchupResult>, target_edge: f64, target_min_route_share: f64) -> Self {
        Self { rankings, target_edge, target_min_route_share }
    }

    /// All ranked rows, best board position first
    pub fn rankings(&self) -> &[MatchupResult] {
        &self.rankings
    }

    pub fn len(&self) -> usize {
        self.rankings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }

    /// Row at a 1-based rank
    pub fn get_by_rank(&self, rank: usize) -> Option<&MatchupResult> {
        self.rankings.iter().find(|r| r.rank == rank)
    }

    /// Row for a player name
    pub fn get_by_player(&self, player: &str) -> Option<&MatchupResult> {
        self.rankings.iter().find(|r| r.player == player)
    }

    /// Rows with edge >= +threshold and enough route share, in rank order
    pub fn targets(&self) -> Vec<MatchupResult> {
        self.rankings
            .iter()
            .filter(|r| {
                r.edge_score >= self.target_edge && r.route_share >= self.target_min_route_share
            })
            .cloned()
            .collect()
    }

    /// Rows with edge <= -threshold and enough route share, most negative first
    pub fn fades(&self) -> Vec<MatchupResult> {
        let mut fades: Vec<MatchupResult> = self
            .rankings
            .iter()
            .filter(|r| {
                r.edge_score <= -self.target_edge && r.route_share >= self.target_min_route_share
            })
            .cloned()
            .collect();
        fades.sort_by(|a, b| a.edge_score.total_cmp(&b.edge_score));
        fades
    }

    /// Keep only rows for the given teams (case-insensitive). Ranks are preserved.
    /// An empty team list keeps every row.
    pub fn filter_teams<S: AsRef<str>>(&self, teams: &[S]) -> MatchupBoard {
        if teams.is_empty() {
            return self.clone();
        }
        let rankings = self
            .rankings
            .iter()
            .filter(|r| teams.iter().any(|t| t.as_ref().eq_ignore_ascii_case(&r.team)))
            .cloned()
            .collect();
        Self { rankings, ..*self }
    }

    pub fn target_edge(&self) -> f64 {
        self.target_edge
    }

    pub fn target_min_route_share(&self) -> f64 {
        self.target_min_route_share
    }
}
