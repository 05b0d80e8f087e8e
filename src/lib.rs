pub mod action;
pub mod actors;
pub mod autoplay;
pub mod career;
pub mod commentary;
pub mod contest;
pub mod engine;
pub mod error;
pub mod items;
pub mod lifecycle;
pub mod matrix;
pub mod model;
pub mod profile;
pub mod setup;
pub mod state;
pub mod summary;

use crate::career::EventTable;
use crate::engine::MatchEngine;
use crate::matrix::compute_tactic_matrix;
use crate::setup::SetupFile;
use crate::summary::{render_scorecard, MatchSummary};
use anyhow::Context;
use std::path::{Path, PathBuf};

pub use crate::action::{BallInput, Tactic};
pub use crate::model::Player;
pub use crate::state::MatchState;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    /// Play one seeded match and print commentary and scorecards.
    Play,
    /// Win-rate CSV over tactic x pitch.
    Matrix,
}

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub setup_path: PathBuf,
    pub seed: u64,
    pub mode: Mode,
    pub sims_per_cell: usize,
    pub output_path: PathBuf,
    pub events_path: Option<PathBuf>,
}

pub fn load_setup(path: &Path) -> anyhow::Result<SetupFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read setup file at {}", path.display()))?;
    let parsed: SetupFile = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    Ok(parsed)
}

pub fn load_events(path: &Path) -> anyhow::Result<EventTable> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read event table at {}", path.display()))?;
    let table: EventTable = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    table
        .validate()
        .with_context(|| format!("Invalid event table {}", path.display()))?;
    Ok(table)
}

fn play(file: SetupFile, seed: u64) -> anyhow::Result<()> {
    let SetupFile { player, setup } = file;
    let mut engine = MatchEngine::start(player, &setup, seed)?;
    engine.play_out();

    let state = engine.state();
    for line in state.commentary.lines() {
        println!("{line}");
    }
    let summary = MatchSummary::from_final_state(state, engine.player())?;
    println!();
    print!(
        "{}",
        render_scorecard(&summary.player_team_innings, &summary.player_team_name)
    );
    println!();
    print!(
        "{}",
        render_scorecard(&summary.opponent_innings, &summary.opponent_name)
    );
    println!();
    println!("{}", summary.result_message);
    if let Some(potm) = &summary.player_of_the_match {
        println!("Player of the Match: {potm}");
    }

    let update = engine.player().after_match(&summary);
    println!(
        "{}: {} runs, {} wickets; career {} runs in {} matches; finance {}",
        update.player.name,
        summary.player_runs,
        summary.player_wickets,
        update.player.career.runs,
        update.player.career.matches,
        update.player.finance
    );
    if let Some(milestone) = update.milestone {
        println!("{milestone}");
    }
    Ok(())
}

pub fn run(opts: CliOptions) -> anyhow::Result<()> {
    if let Some(path) = &opts.events_path {
        let table = load_events(path)?;
        println!(
            "Event table {} is valid ({} events)",
            path.display(),
            table.events.len()
        );
    }
    let file = load_setup(&opts.setup_path)?;
    match opts.mode {
        Mode::Play => play(file, opts.seed),
        Mode::Matrix => {
            if opts.sims_per_cell == 0 {
                anyhow::bail!("--sims-per-cell must be > 0");
            }
            let matrix =
                compute_tactic_matrix(&file.player, &file.setup, opts.sims_per_cell, opts.seed)?;
            matrix::write_csv(&matrix, &opts.output_path)?;
            println!(
                "Wrote {}x{} matrix to {}",
                matrix.len(),
                matrix.first().map(|r| r.len()).unwrap_or(0),
                opts.output_path.display()
            );
            Ok(())
        }
    }
}
