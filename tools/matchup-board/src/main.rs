//! matchup-board binary
//!
//! Prints the weekly receiver matchup board to stdout. Logs go to stderr.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use matchup_board::{
    build_board, initialize_logging_with_config, load_config, render_json, render_table, Cli,
    OutputFormat, ReportOptions, EMPTY_BOARD_MESSAGE,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli).context("Failed to load configuration")?;
    initialize_logging_with_config(&config.logging.level, &config.logging.format)?;
    info!("Starting matchup-board v{}", env!("CARGO_PKG_VERSION"));

    let board = build_board(&config, &cli.teams)?;

    let options = ReportOptions {
        limit: cli.limit,
        percent_share: cli.percent,
        color: std::io::stdout().is_terminal(),
    };

    match cli.format {
        OutputFormat::Table => print!("{}", render_table(&board, &options)),
        OutputFormat::Json => {
            if board.is_empty() {
                info!("{}", EMPTY_BOARD_MESSAGE);
            }
            println!("{}", render_json(&board, &options)?);
        }
    }

    Ok(())
}
