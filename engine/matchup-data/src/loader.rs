use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use matchup_engine::{DefenseProfile, PlayerWeekRecord, SituationalSplits};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{DataError, Result};
use crate::names::normalize_name;

/// Header names accepted as the defense table's team key, in priority order
pub const DEFENSE_TEAM_COLUMNS: [&str; 4] = ["team", "defense", "def_team", "abbr"];

const PLAYER_COLUMNS: [&str; 9] = [
    "player",
    "team",
    "base_yprr",
    "routes_played",
    "yprr_man",
    "yprr_zone",
    "yprr_1high",
    "yprr_2high",
    "yprr_0high",
];

const DEFENSE_COLUMNS: [&str; 6] =
    ["man_pct", "zone_pct", "onehigh_pct", "twohigh_pct", "zerohigh_pct", "blitz_pct"];

const MATCHUP_COLUMNS: [&str; 2] = ["team", "opponent"];

const BLITZ_COLUMNS: [&str; 2] = ["player", "yprr_blitz"];

/// Opponent by team code
pub type MatchupTable = HashMap<String, String>;

/// Blitz YPRR by normalized player name
pub type BlitzTable = HashMap<String, f64>;

#[derive(Debug, Deserialize)]
struct RawPlayer {
    player: String,
    team: String,
    base_yprr: f64,
    routes_played: f64,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    route_share: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    yprr_man: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    yprr_zone: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    yprr_1high: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    yprr_2high: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    yprr_0high: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    yprr_blitz: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawDefense {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    man_pct: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    zone_pct: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    onehigh_pct: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    twohigh_pct: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    zerohigh_pct: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    blitz_pct: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawMatchup {
    team: String,
    opponent: String,
}

#[derive(Debug, Deserialize)]
struct RawBlitz {
    player: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    yprr_blitz: Option<f64>,
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| DataError::Io { path: path.display().to_string(), source: e })
}

fn read_headers<R: Read>(
    reader: &mut csv::Reader<R>,
    table: &'static str,
) -> Result<csv::StringRecord> {
    let headers = reader.headers().map_err(|e| DataError::csv(table, e))?.clone();
    // Exports often carry stray whitespace around header names
    Ok(headers.iter().map(str::trim).collect())
}

fn require_columns(
    headers: &csv::StringRecord,
    required: &[&str],
    table: &'static str,
) -> Result<()> {
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(DataError::MissingColumn { table, column: column.to_string() });
        }
    }
    Ok(())
}

/// 1-based file line of a record or error position (the header is line 1)
fn line_of(position: Option<&csv::Position>) -> u64 {
    position.map_or(0, csv::Position::line)
}

fn routes_from(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}

/// Load the receiver table from any reader.
///
/// Split and blitz cells that are empty or unparseable become None. Rows whose
/// identity or base columns fail to parse are skipped with a warning. The
/// opponent is left empty; [`crate::prepare`] fills it from the schedule.
pub fn load_players_from_reader<R: Read>(rdr: R) -> Result<Vec<PlayerWeekRecord>> {
    const TABLE: &str = "player";
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let headers = read_headers(&mut reader, TABLE)?;
    require_columns(&headers, &PLAYER_COLUMNS, TABLE)?;

    let mut players = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping unreadable player row at line {}: {}", line_of(e.position()), e);
                continue;
            }
        };
        match record.deserialize::<RawPlayer>(Some(&headers)) {
            Ok(raw) => {
                if !raw.base_yprr.is_finite() {
                    warn!("skipping player '{}': non-finite base_yprr", raw.player);
                    continue;
                }
                players.push(PlayerWeekRecord {
                    player: raw.player,
                    team: raw.team,
                    opponent: None,
                    base_efficiency: raw.base_yprr,
                    routes_played: routes_from(raw.routes_played),
                    route_share: raw.route_share,
                    splits: SituationalSplits {
                        man: raw.yprr_man,
                        zone: raw.yprr_zone,
                        one_high: raw.yprr_1high,
                        two_high: raw.yprr_2high,
                        zero_high: raw.yprr_0high,
                    },
                    blitz_efficiency: raw.yprr_blitz,
                });
            }
            Err(e) => {
                warn!("skipping malformed player row at line {}: {}", line_of(record.position()), e);
            }
        }
    }
    debug!("loaded {} player rows", players.len());
    Ok(players)
}

/// Load the defense-tendency table from any reader.
///
/// The team key is the first of [`DEFENSE_TEAM_COLUMNS`] present. Percentages
/// (0-100) are converted to fractions; missing cells count as 0.
pub fn load_defenses_from_reader<R: Read>(rdr: R) -> Result<HashMap<String, DefenseProfile>> {
    const TABLE: &str = "defense";
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let headers = read_headers(&mut reader, TABLE)?;

    let team_idx = DEFENSE_TEAM_COLUMNS
        .iter()
        .find_map(|name| headers.iter().position(|h| h == *name))
        .ok_or_else(|| DataError::MissingTeamColumn { candidates: DEFENSE_TEAM_COLUMNS.join(", ") })?;
    require_columns(&headers, &DEFENSE_COLUMNS, TABLE)?;

    let mut defenses = HashMap::new();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping unreadable defense row at line {}: {}", line_of(e.position()), e);
                continue;
            }
        };
        let team = record.get(team_idx).unwrap_or_default().to_string();
        if team.is_empty() {
            warn!("skipping defense row at line {}: empty team", line_of(record.position()));
            continue;
        }
        let raw: RawDefense = match record.deserialize(Some(&headers)) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed defense row for {}: {}", team, e);
                continue;
            }
        };

        let pct = |value: Option<f64>, column: &str| match value.filter(|v| v.is_finite()) {
            Some(v) => v,
            None => {
                warn!("defense {} has no {}; using 0", team, column);
                0.0
            }
        };
        let profile = DefenseProfile::from_percentages(
            team.clone(),
            pct(raw.man_pct, "man_pct"),
            pct(raw.zone_pct, "zone_pct"),
            pct(raw.onehigh_pct, "onehigh_pct"),
            pct(raw.twohigh_pct, "twohigh_pct"),
            pct(raw.zerohigh_pct, "zerohigh_pct"),
            pct(raw.blitz_pct, "blitz_pct"),
        );
        if defenses.insert(team.clone(), profile).is_some() {
            warn!("duplicate defense entry for '{}', using latest value", team);
        }
    }
    debug!("loaded {} defense profiles", defenses.len());
    Ok(defenses)
}

/// Load the weekly schedule (team -> opponent) from any reader
pub fn load_matchups_from_reader<R: Read>(rdr: R) -> Result<MatchupTable> {
    const TABLE: &str = "matchup";
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let headers = read_headers(&mut reader, TABLE)?;
    require_columns(&headers, &MATCHUP_COLUMNS, TABLE)?;

    let mut matchups = MatchupTable::new();
    for result in reader.deserialize::<RawMatchup>() {
        match result {
            Ok(raw) if raw.team.is_empty() || raw.opponent.is_empty() => {
                warn!("skipping incomplete matchup row: {:?}", raw);
            }
            Ok(raw) => {
                if let Some(previous) = matchups.get(&raw.team) {
                    warn!(
                        "duplicate matchup for '{}' ({} and {}), keeping first",
                        raw.team, previous, raw.opponent
                    );
                    continue;
                }
                matchups.insert(raw.team, raw.opponent);
            }
            Err(e) => {
                warn!("skipping malformed matchup row at line {}: {}", line_of(e.position()), e);
            }
        }
    }
    Ok(matchups)
}

/// Load blitz YPRR keyed by normalized player name from any reader
pub fn load_blitz_from_reader<R: Read>(rdr: R) -> Result<BlitzTable> {
    const TABLE: &str = "blitz";
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let headers = read_headers(&mut reader, TABLE)?;
    require_columns(&headers, &BLITZ_COLUMNS, TABLE)?;

    let mut blitz = BlitzTable::new();
    for result in reader.deserialize::<RawBlitz>() {
        match result {
            Ok(raw) => {
                let Some(value) = raw.yprr_blitz.filter(|v| v.is_finite()) else {
                    continue;
                };
                let name = normalize_name(&raw.player);
                if blitz.insert(name, value).is_some() {
                    warn!("duplicate blitz entry for '{}', using latest value", raw.player);
                }
            }
            Err(e) => {
                warn!("skipping malformed blitz row at line {}: {}", line_of(e.position()), e);
            }
        }
    }
    Ok(blitz)
}

/// Load the receiver table from a CSV file
pub fn load_players(path: &Path) -> Result<Vec<PlayerWeekRecord>> {
    load_players_from_reader(open(path)?)
}

/// Load the defense-tendency table from a CSV file
pub fn load_defenses(path: &Path) -> Result<HashMap<String, DefenseProfile>> {
    load_defenses_from_reader(open(path)?)
}

/// Load the weekly schedule from a CSV file
pub fn load_matchups(path: &Path) -> Result<MatchupTable> {
    load_matchups_from_reader(open(path)?)
}

/// Load the blitz table from a CSV file
pub fn load_blitz(path: &Path) -> Result<BlitzTable> {
    load_blitz_from_reader(open(path)?)
}
