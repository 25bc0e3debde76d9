//! Matchup Board
//!
//! Command-line front end for the matchup engine: loads one week's receiver,
//! defense, schedule and blitz tables, scores every receiver and prints the
//! rankings with this week's targets and fades.

use anyhow::{Context, Result};
use tracing::info;

use matchup_data::WeeklyInputs;
use matchup_engine::{MatchupBoard, MatchupEngine};

pub mod cli;
pub mod config;
pub mod logging;
pub mod report;

pub use cli::{Cli, OutputFormat, Preset};
pub use config::{load_config, BoardConfig, LoggingConfig};
pub use logging::initialize_logging_with_config;
pub use report::{render_json, render_table, ReportOptions, EMPTY_BOARD_MESSAGE};

/// Load the inputs, run the engine and apply the team filter
pub fn build_board(config: &BoardConfig, teams: &[String]) -> Result<MatchupBoard> {
    let (players, defenses) = WeeklyInputs::load(&config.data)
        .context("Failed to load weekly inputs")?
        .into_parts();
    info!("Loaded {} receivers and {} defenses", players.len(), defenses.len());

    let engine = MatchupEngine::new(config.engine.clone()).context("Failed to create engine")?;
    let ranking = &engine.config().ranking;
    info!(
        "Ranking {:?} with targets at +/-{} and {:.0}% route share",
        ranking.order,
        ranking.target_edge,
        ranking.target_min_route_share * 100.0
    );
    let board = engine.run(&players, &defenses);

    Ok(board.filter_teams(teams))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_inputs(dir: &Path) -> BoardConfig {
        let mut config = BoardConfig::default();
        config.data.players = dir.join("wr.csv");
        config.data.defenses = dir.join("def.csv");
        config.data.matchups = dir.join("matchups.csv");
        config.data.blitz = None;

        fs::write(
            &config.data.players,
            "player,team,base_yprr,routes_played,yprr_man,yprr_zone,yprr_1high,yprr_2high,yprr_0high\n\
             Man Beater,CIN,2.0,400,3.0,2.0,2.0,2.0,2.0\n\
             Zone Beater,BAL,2.0,400,1.0,2.0,2.0,2.0,2.0\n\
             Steady Hand,KC,2.0,400,2.0,2.0,2.0,2.0,2.0\n\
             Bench Guy,KC,0.3,50,1.0,1.0,1.0,1.0,1.0\n",
        )
        .unwrap();
        fs::write(
            &config.data.defenses,
            "team,man_pct,zone_pct,onehigh_pct,twohigh_pct,zerohigh_pct,blitz_pct\n\
             BAL,50,50,40,40,20,20\n\
             CIN,50,50,40,40,20,20\n\
             LV,50,50,40,40,20,20\n",
        )
        .unwrap();
        fs::write(&config.data.matchups, "team,opponent\nCIN,BAL\nBAL,CIN\nKC,LV\n").unwrap();
        config
    }

    #[test]
    fn test_build_board_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_inputs(dir.path());

        let board = build_board(&config, &[]).unwrap();
        // Bench Guy falls below the base efficiency floor
        assert_eq!(board.len(), 3);

        let man = board.get_by_player("Man Beater").unwrap();
        let zone = board.get_by_player("Zone Beater").unwrap();
        let steady = board.get_by_player("Steady Hand").unwrap();
        assert!(man.edge_score > 0.0);
        assert!(zone.edge_score < 0.0);
        assert!(steady.edge_score.abs() < 1e-9);
        assert_eq!(steady.rank, 3);
    }

    #[test]
    fn test_team_filter_keeps_ranks() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_inputs(dir.path());

        let full = build_board(&config, &[]).unwrap();
        let filtered = build_board(&config, &["kc".to_string()]).unwrap();

        assert_eq!(filtered.len(), 1);
        let steady = &filtered.rankings()[0];
        assert_eq!(steady.player, "Steady Hand");
        assert_eq!(steady.rank, full.get_by_player("Steady Hand").unwrap().rank);
    }

    #[test]
    fn test_missing_input_reports_context() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = write_inputs(dir.path());
        config.data.players = dir.path().join("absent.csv");

        let err = build_board(&config, &[]).unwrap_err();
        assert!(format!("{err:#}").contains("absent.csv"));
    }
}
