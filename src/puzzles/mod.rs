//! Demonstration puzzles built on the model and solve layers

pub mod fence;
pub mod intro;
pub mod pets;
pub mod runner;
pub mod sampling;
pub mod tiles;

pub use fence::{Fence, Point, FENCE};
pub use pets::{Pet, PetAssignment};
pub use runner::{run_all, run_puzzle, Outcome, PuzzleReport};
pub use sampling::Sampling;
pub use tiles::Tile;

use itertools::Itertools;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Every puzzle the runner knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Puzzle {
    RangeDemo,
    ChildrenPets,
    InsideFence,
    OnFence,
    OutsideFence,
    ValidIntegers,
    Wheelbarrow,
    Mushroom,
    Signs,
    Beehive,
}

impl Puzzle {
    const ALL: [Puzzle; 10] = [
        Puzzle::RangeDemo,
        Puzzle::ChildrenPets,
        Puzzle::InsideFence,
        Puzzle::OnFence,
        Puzzle::OutsideFence,
        Puzzle::ValidIntegers,
        Puzzle::Wheelbarrow,
        Puzzle::Mushroom,
        Puzzle::Signs,
        Puzzle::Beehive,
    ];

    /// All puzzles in run order
    pub fn all() -> &'static [Puzzle] {
        &Self::ALL
    }

    pub fn name(self) -> &'static str {
        match self {
            Puzzle::RangeDemo => "range_demo",
            Puzzle::ChildrenPets => "children_pets",
            Puzzle::InsideFence => "inside_fence",
            Puzzle::OnFence => "on_fence",
            Puzzle::OutsideFence => "outside_fence",
            Puzzle::ValidIntegers => "valid_integers",
            Puzzle::Wheelbarrow => "wheelbarrow",
            Puzzle::Mushroom => "mushroom",
            Puzzle::Signs => "signs",
            Puzzle::Beehive => "beehive",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Puzzle::RangeDemo => "an integer between 9 and 10",
            Puzzle::ChildrenPets => "which child owns which pet",
            Puzzle::InsideFence => "a point inside the fence",
            Puzzle::OnFence => "a point on the left or top fence side",
            Puzzle::OutsideFence => "a point beyond the fence with x >= 8 and y >= 20",
            Puzzle::ValidIntegers => "every integer in 1..=10 except 3 and 8, plus a random pick",
            Puzzle::Wheelbarrow => "a wheelbarrow position inside the fence",
            Puzzle::Mushroom => "a free forest tile for a mushroom",
            Puzzle::Signs => "three distinct tiles next to the path",
            Puzzle::Beehive => "a free meadow tile for a beehive",
        }
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown puzzle `{name}` (expected one of: {expected})")]
pub struct UnknownPuzzle {
    pub name: String,
    pub expected: String,
}

impl FromStr for Puzzle {
    type Err = UnknownPuzzle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|puzzle| puzzle.name() == wanted)
            .ok_or_else(|| UnknownPuzzle {
                name: s.to_string(),
                expected: Self::ALL.iter().map(|puzzle| puzzle.name()).join(", "),
            })
    }
}

/// Answer of a solved puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PuzzleResult {
    Integer(i64),
    Pets(PetAssignment),
    Point(Point),
    Sampling(Sampling),
    Tile(Tile),
    Tiles(Vec<Tile>),
}

impl fmt::Display for PuzzleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleResult::Integer(value) => write!(f, "{}", value),
            PuzzleResult::Pets(pets) => write!(f, "{}", pets),
            PuzzleResult::Point(point) => write!(f, "{}", point),
            PuzzleResult::Sampling(sampling) => write!(f, "{}", sampling),
            PuzzleResult::Tile(tile) => write!(f, "{}", tile),
            PuzzleResult::Tiles(tiles) => write!(f, "[{}]", tiles.iter().join(", ")),
        }
    }
}
