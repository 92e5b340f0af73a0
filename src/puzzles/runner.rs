//! Run puzzles and collect per-puzzle reports

use super::{fence, intro, pets, sampling, tiles, Puzzle, PuzzleResult};
use crate::config::Settings;
use crate::error::{FailureKind, SolveError};
use crate::sat::{SatSolver, SolverOptions};
use anyhow::{Context, Result};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// How a single puzzle ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Solved(PuzzleResult),
    NoSolution,
    Failed { kind: FailureKind, message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct PuzzleReport {
    pub puzzle: Puzzle,
    pub outcome: Outcome,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl PuzzleReport {
    pub fn is_solved(&self) -> bool {
        matches!(self.outcome, Outcome::Solved(_))
    }
}

fn solved<T>(value: Option<T>, wrap: impl FnOnce(T) -> PuzzleResult) -> Option<PuzzleResult> {
    value.map(wrap)
}

async fn dispatch(puzzle: Puzzle, settings: &Settings) -> Result<Option<PuzzleResult>, SolveError> {
    let result = match puzzle {
        Puzzle::RangeDemo => solved(intro::range_demo(settings).await?, PuzzleResult::Integer),
        Puzzle::ChildrenPets => solved(pets::children_pets(settings).await?, PuzzleResult::Pets),
        Puzzle::InsideFence => solved(fence::inside_fence(settings).await?, PuzzleResult::Point),
        Puzzle::OnFence => solved(fence::on_fence(settings).await?, PuzzleResult::Point),
        Puzzle::OutsideFence => solved(fence::outside_fence(settings).await?, PuzzleResult::Point),
        Puzzle::ValidIntegers => Some(PuzzleResult::Sampling(
            sampling::valid_integers(settings).await?,
        )),
        Puzzle::Wheelbarrow => solved(fence::wheelbarrow(settings).await?, PuzzleResult::Point),
        Puzzle::Mushroom => solved(tiles::mushroom(settings).await?, PuzzleResult::Tile),
        Puzzle::Signs => solved(tiles::signs(settings).await?, PuzzleResult::Tiles),
        Puzzle::Beehive => solved(tiles::beehive(settings).await?, PuzzleResult::Tile),
    };
    Ok(result)
}

/// Run one puzzle; failures are captured in the report
pub async fn run_puzzle(puzzle: Puzzle, settings: &Settings) -> PuzzleReport {
    let start_time = Instant::now();
    let outcome = match dispatch(puzzle, settings).await {
        Ok(Some(result)) => Outcome::Solved(result),
        Ok(None) => Outcome::NoSolution,
        Err(e) => {
            warn!(event = "puzzle_failed", puzzle = %puzzle, kind = ?e.kind(), error = %e);
            Outcome::Failed {
                kind: e.kind(),
                message: e.to_string(),
            }
        }
    };
    let elapsed = start_time.elapsed();

    info!(
        event = "puzzle_end",
        puzzle = %puzzle,
        solved = matches!(outcome, Outcome::Solved(_)),
        elapsed_ms = elapsed.as_millis() as u64,
    );

    PuzzleReport {
        puzzle,
        outcome,
        elapsed,
    }
}

/// Run `selection` (every puzzle when empty) one after another.
///
/// A solver is created once up front; if that fails no puzzle
/// runs and the whole call fails.
pub async fn run_all(settings: &Settings, selection: &[Puzzle]) -> Result<Vec<PuzzleReport>> {
    SatSolver::with_options(&SolverOptions::from(settings))
        .context("Failed to initialize the SAT solver")?;

    let puzzles = if selection.is_empty() {
        Puzzle::all()
    } else {
        selection
    };

    let mut reports = Vec::with_capacity(puzzles.len());
    for &puzzle in puzzles {
        reports.push(run_puzzle(puzzle, settings).await);
    }
    Ok(reports)
}
