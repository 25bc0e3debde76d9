//! Board rendering: aligned text tables or a single JSON document

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;

use matchup_engine::{MatchupBoard, MatchupResult};

/// Printed instead of the tables when nothing survives filtering
pub const EMPTY_BOARD_MESSAGE: &str = "No players available after filtering.";

/// Display options shared by both output formats
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Cap on ranked rows shown; targets and fades are always complete
    pub limit: Option<usize>,

    /// Route share as a percentage (1 dp) instead of a fraction (3 dp)
    pub percent_share: bool,

    /// Colour the section headings
    pub color: bool,
}

#[derive(Serialize)]
struct BoardReport<'a> {
    rankings: &'a [MatchupResult],
    targets: Vec<MatchupResult>,
    fades: Vec<MatchupResult>,
}

fn limited<'a>(board: &'a MatchupBoard, limit: Option<usize>) -> &'a [MatchupResult] {
    let rows = board.rankings();
    match limit {
        Some(n) if n < rows.len() => &rows[..n],
        _ => rows,
    }
}

/// Render the board as pretty-printed JSON `{ rankings, targets, fades }`
pub fn render_json(board: &MatchupBoard, options: &ReportOptions) -> Result<String> {
    let report = BoardReport {
        rankings: limited(board, options.limit),
        targets: board.targets(),
        fades: board.fades(),
    };
    serde_json::to_string_pretty(&report).context("Failed to serialize board")
}

/// Render rankings, targets and fades as aligned text tables
pub fn render_table(board: &MatchupBoard, options: &ReportOptions) -> String {
    if board.is_empty() {
        return format!("{EMPTY_BOARD_MESSAGE}\n");
    }

    let mut out = String::new();
    let total = board.len();
    let rankings = limited(board, options.limit);
    let title = if rankings.len() < total {
        format!("Player Rankings (top {} of {})", rankings.len(), total)
    } else {
        "Player Rankings".to_string()
    };
    write_section(&mut out, &title, rankings, options);

    let threshold = board.target_edge();
    let share = board.target_min_route_share() * 100.0;
    write_section(
        &mut out,
        &format!("Targets (edge >= {threshold:.1}, route share >= {share:.0}%)"),
        &board.targets(),
        options,
    );
    write_section(
        &mut out,
        &format!("Fades (edge <= -{threshold:.1}, route share >= {share:.0}%)"),
        &board.fades(),
        options,
    );
    out
}

fn write_section(out: &mut String, title: &str, rows: &[MatchupResult], options: &ReportOptions) {
    if options.color {
        let _ = writeln!(out, "{}", title.bold());
    } else {
        let _ = writeln!(out, "{title}");
    }

    if rows.is_empty() {
        let _ = writeln!(out, "  (none)\n");
        return;
    }

    let player_width = rows.iter().map(|r| r.player.chars().count()).max().unwrap_or(0).max(6);
    let share_header = if options.percent_share { "Route %" } else { "Share" };

    let _ = writeln!(
        out,
        "{:>4}  {:<pw$}  {:<4}  {:<4}  {:>7}  {:>8}  {:>8}  {:>6}",
        "Rank",
        "Player",
        "Team",
        "Opp",
        share_header,
        "Base",
        "Adjusted",
        "Edge",
        pw = player_width
    );
    for row in rows {
        let share = if options.percent_share {
            format!("{:.1}", row.route_share * 100.0)
        } else {
            format!("{:.3}", row.route_share)
        };
        let _ = writeln!(
            out,
            "{:>4}  {:<pw$}  {:<4}  {:<4}  {:>7}  {:>8.2}  {:>8.2}  {:>6.1}",
            row.rank,
            row.player,
            row.team,
            row.opponent,
            share,
            row.base_efficiency,
            row.adjusted_efficiency,
            row.edge_score,
            pw = player_width
        );
    }
    out.push('\n');
}
