//! Planner CLI: a terminal front end for board files.

pub mod board_file;
pub mod cli;
pub mod config;
pub mod prompt;
pub mod render;

use std::io;

use anyhow::Result;

use crate::cli::{execute, Cli};
use crate::config::{default_config_path, load_config};
use crate::prompt::TerminalDecisions;

pub fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = load_config(&config_path);
    log::debug!("[planner.cli] Using config {}", config_path.display());

    let decisions = TerminalDecisions::stdio(cli.yes || config.assume_yes)
        .with_answer(cli.command.preset_answer());
    let mut stdout = io::stdout().lock();
    execute(cli.command, &config.store, decisions, &mut stdout)
}
