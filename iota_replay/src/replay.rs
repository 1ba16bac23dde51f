use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use iota::{GameRecord, Grid, IllegalTurn};
use serde::Serialize;
use tracing::{debug, trace};

pub enum ReplayOutcome {
    Completed,
    IllegalTurn { turn_idx: usize, err: IllegalTurn },
}

/// A game record applied to a fresh grid, up to the first illegal turn.
pub struct Replay {
    pub grid: Grid,
    /// Points scored by each legal turn, in order.
    pub turn_points: Vec<u32>,
    pub outcome: ReplayOutcome,
}

/// What the replay subcommand reports per file in JSON mode.
#[derive(Serialize)]
pub struct ReplayReport {
    pub file: String,
    pub turn_points: Vec<u32>,
    pub total_points: u32,
    pub cards_on_grid: usize,
    /// The error chain of the first illegal turn, outermost first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub illegal_turn: Option<Vec<String>>,
}

impl Replay {
    pub fn total_points(&self) -> u32 {
        self.turn_points.iter().sum()
    }

    pub fn report(&self, file: &Path) -> ReplayReport {
        let illegal_turn = match &self.outcome {
            ReplayOutcome::Completed => None,
            ReplayOutcome::IllegalTurn { turn_idx, err } => {
                let mut chain = vec![format!("Turn {}: {}", turn_idx + 1, err)];
                let mut err_dyn = err as &dyn std::error::Error;
                while let Some(src_err) = err_dyn.source() {
                    chain.push(src_err.to_string());
                    err_dyn = src_err;
                }
                Some(chain)
            }
        };
        ReplayReport {
            file: file.display().to_string(),
            turn_points: self.turn_points.clone(),
            total_points: self.total_points(),
            cards_on_grid: self.grid.len(),
            illegal_turn,
        }
    }
}

pub fn load_record(path: &Path) -> anyhow::Result<GameRecord> {
    let file = File::open(path).with_context(|| format!("Could not open '{}'", path.display()))?;
    let record = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Could not parse game record '{}'", path.display()))?;
    Ok(record)
}

/// Returns an error only if the grid cannot be started, not when a turn is illegal.
pub fn replay_game(record: &GameRecord) -> anyhow::Result<Replay> {
    let mut grid = Grid::new();
    grid.start(record.first_card)?;
    let mut turn_points = Vec::with_capacity(record.turns.len());
    for (turn_idx, turn) in record.turns.iter().enumerate() {
        trace!(turn_idx, placements = turn.0.len(), "Replaying turn");
        match grid.place_sequence(&turn.0) {
            Ok(points) => {
                debug!(turn_idx, points);
                turn_points.push(points);
            }
            Err(err) => {
                return Ok(Replay {
                    grid,
                    turn_points,
                    outcome: ReplayOutcome::IllegalTurn { turn_idx, err },
                })
            }
        }
    }
    Ok(Replay {
        grid,
        turn_points,
        outcome: ReplayOutcome::Completed,
    })
}
