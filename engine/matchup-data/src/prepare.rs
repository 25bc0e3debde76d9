//! Joins the loaded tables into the engine's input rows

use std::collections::HashMap;
use std::path::PathBuf;

use matchup_engine::{DefenseProfile, PlayerWeekRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::loader::{
    load_blitz, load_defenses, load_matchups, load_players, BlitzTable, MatchupTable,
};
use crate::names::normalize_name;

/// Merge schedule and blitz data into the receiver rows.
///
/// Opponents are looked up by team; a team without a schedule entry leaves the
/// opponent empty and the engine drops the row later. A blitz table value
/// replaces an inline `yprr_blitz` only when the table has one for that player.
pub fn prepare(
    players: Vec<PlayerWeekRecord>,
    matchups: &MatchupTable,
    blitz: Option<&BlitzTable>,
) -> Vec<PlayerWeekRecord> {
    let mut unscheduled = 0usize;
    let mut blitz_joined = 0usize;

    let prepared: Vec<PlayerWeekRecord> = players
        .into_iter()
        .map(|mut player| {
            player.opponent = matchups.get(&player.team).cloned();
            if player.opponent.is_none() {
                unscheduled += 1;
                debug!("no opponent scheduled for {} ({})", player.player, player.team);
            }

            if let Some(value) = blitz.and_then(|table| table.get(&normalize_name(&player.player)))
            {
                player.blitz_efficiency = Some(*value);
                blitz_joined += 1;
            }
            player
        })
        .collect();

    info!(
        "Prepared {} player rows ({} without opponent, {} with blitz data joined)",
        prepared.len(),
        unscheduled,
        blitz_joined
    );
    prepared
}

/// Locations of the four weekly exports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    /// Receiver table
    pub players: PathBuf,

    /// Defense-tendency table
    pub defenses: PathBuf,

    /// Weekly schedule
    pub matchups: PathBuf,

    /// Optional blitz YPRR table. None is written as `"none"`.
    #[serde(with = "disabled_as_none")]
    pub blitz: Option<PathBuf>,
}

/// A missing key falls back to the default blitz path, so "no blitz table"
/// needs its own spelling in the file
mod disabled_as_none {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::path::PathBuf;

    const DISABLED: &str = "none";

    pub fn serialize<S: Serializer>(path: &Option<PathBuf>, s: S) -> Result<S::Ok, S::Error> {
        match path {
            Some(path) => path.serialize(s),
            None => s.serialize_str(DISABLED),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<PathBuf>, D::Error> {
        let path = Option::<PathBuf>::deserialize(d)?;
        Ok(path.filter(|p| !p.as_os_str().is_empty() && p.as_os_str() != DISABLED))
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            players: PathBuf::from("data/standard_wr_data.csv"),
            defenses: PathBuf::from("data/standard_def_data.csv"),
            matchups: PathBuf::from("data/standard_matchup_data.csv"),
            blitz: Some(PathBuf::from("data/standard_blitz_data.csv")),
        }
    }
}

/// Prepared player rows plus the defense lookup, ready for the engine
#[derive(Debug, Clone)]
pub struct WeeklyInputs {
    pub players: Vec<PlayerWeekRecord>,
    pub defenses: HashMap<String, DefenseProfile>,
}

impl WeeklyInputs {
    /// Load and join every table named in `paths`
    pub fn load(paths: &DataPaths) -> Result<Self> {
        let players = load_players(&paths.players)?;
        let defenses = load_defenses(&paths.defenses)?;
        let matchups = load_matchups(&paths.matchups)?;
        let blitz = match &paths.blitz {
            Some(path) => Some(load_blitz(path)?),
            None => None,
        };

        Ok(Self { players: prepare(players, &matchups, blitz.as_ref()), defenses })
    }

    pub fn into_parts(self) -> (Vec<PlayerWeekRecord>, HashMap<String, DefenseProfile>) {
        (self.players, self.defenses)
    }
}
