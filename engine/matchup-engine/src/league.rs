//! League-wide defensive tendencies used by the deviation weighting

use crate::models::DefenseProfile;
use serde::{Deserialize, Serialize};

/// Deviation totals at or below this are treated as zero. League means carry
/// summation rounding, so a defense sitting on the average lands near 1e-16.
const DEVIATION_EPSILON: f64 = 1e-9;

/// League-average coverage and shell rates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LeagueTendencies {
    pub man_rate: f64,
    pub zone_rate: f64,
    pub one_high_rate: f64,
    pub two_high_rate: f64,
    pub zero_high_rate: f64,
    pub sample_teams: usize,
}

impl LeagueTendencies {
    /// Average the profiles. Summation runs in team order so the result does not
    /// depend on the iteration order of the caller's map.
    pub fn from_profiles<'a, I>(profiles: I) -> Self
    where
        I: IntoIterator<Item = &'a DefenseProfile>,
    {
        let mut sorted: Vec<&DefenseProfile> = profiles.into_iter().collect();
        if sorted.is_empty() {
            return Self::default();
        }
        sorted.sort_by(|a, b| a.team.cmp(&b.team));

        let mut out = Self { sample_teams: sorted.len(), ..Self::default() };
        for p in &sorted {
            out.man_rate += p.man_rate;
            out.zone_rate += p.zone_rate;
            out.one_high_rate += p.one_high_rate;
            out.two_high_rate += p.two_high_rate;
            out.zero_high_rate += p.zero_high_rate;
        }
        let n = sorted.len() as f64;
        out.man_rate /= n;
        out.zone_rate /= n;
        out.one_high_rate /= n;
        out.two_high_rate /= n;
        out.zero_high_rate /= n;
        out
    }

    /// Absolute distance of a defense's man/zone mix from the league average
    pub fn coverage_deviation(&self, defense: &DefenseProfile) -> f64 {
        (defense.man_rate - self.man_rate).abs() + (defense.zone_rate - self.zone_rate).abs()
    }

    /// Absolute distance of a defense's shell mix from the league average
    pub fn safety_deviation(&self, defense: &DefenseProfile) -> f64 {
        (defense.one_high_rate - self.one_high_rate).abs()
            + (defense.two_high_rate - self.two_high_rate).abs()
            + (defense.zero_high_rate - self.zero_high_rate).abs()
    }

    /// `(coverage, safety)` weights proportional to each deviation.
    ///
    /// A defense that matches the league average on both gets an even split.
    pub fn alternate_weights(&self, defense: &DefenseProfile) -> (f64, f64) {
        let coverage = self.coverage_deviation(defense);
        let safety = self.safety_deviation(defense);
        let total = coverage + safety;
        if total > DEVIATION_EPSILON {
            (coverage / total, safety / total)
        } else {
            (0.5, 0.5)
        }
    }
}
