//! Placement of objects on map tiles.
//!
//! Each puzzle picks an index into a fixed tile list; occupied tiles are
//! excluded by forbidding their index directly.

use crate::config::Settings;
use crate::error::SolveError;
use crate::model::{all_different, bound, ConstraintSet, IntVar, Predicate};
use crate::solve::{solve_one, Session};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Tile {
    pub x: i64,
    pub y: i64,
}

impl Tile {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub const FOREST_TILES: [Tile; 6] = [
    Tile::new(2, 2),
    Tile::new(3, 2),
    Tile::new(4, 2),
    Tile::new(2, 3),
    Tile::new(3, 3),
    Tile::new(4, 3),
];

/// A tree at (2, 2) and a mushroom at (3, 3)
pub const FOREST_OCCUPIED: [Tile; 2] = [Tile::new(2, 2), Tile::new(3, 3)];

pub const PATH_ADJACENT: [Tile; 5] = [
    Tile::new(0, 1),
    Tile::new(1, 1),
    Tile::new(2, 1),
    Tile::new(0, 2),
    Tile::new(2, 2),
];

pub const MEADOW_TILES: [Tile; 6] = [
    Tile::new(5, 5),
    Tile::new(6, 5),
    Tile::new(7, 5),
    Tile::new(5, 6),
    Tile::new(6, 6),
    Tile::new(7, 6),
];

pub const MEADOW_OCCUPIED: [Tile; 2] = [Tile::new(5, 5), Tile::new(6, 5)];

pub const SIGN_COUNT: usize = 3;

fn index_domain(var: IntVar, tiles: &[Tile]) -> Predicate {
    bound(var, 0, tiles.len() as i64 - 1)
}

fn tile_at(tiles: &[Tile], index: i64, label: &str) -> Result<Tile, SolveError> {
    usize::try_from(index)
        .ok()
        .and_then(|i| tiles.get(i))
        .copied()
        .ok_or_else(|| SolveError::ModelMismatch {
            label: label.to_string(),
        })
}

/// Pick a tile of `tiles` that is not in `occupied`.
///
/// Occupied tiles missing from `tiles` are ignored.
pub async fn place_on_free_tile(
    settings: &Settings,
    label: &str,
    subject: &str,
    tiles: &[Tile],
    occupied: &[Tile],
) -> Result<Option<Tile>, SolveError> {
    let mut set = ConstraintSet::new(label);
    let index = set.declare_variable(subject)?;
    set.submit(index_domain(index, tiles))?;

    for tile in occupied {
        if let Some(k) = tiles.iter().position(|t| t == tile) {
            set.submit(index.ne(k as i64))?;
        }
    }

    let mut session = Session::open(set, settings)?;
    match solve_one(&mut session, &[index]).await? {
        Some(values) => Ok(Some(tile_at(tiles, values[0], label)?)),
        None => Ok(None),
    }
}

pub async fn mushroom(settings: &Settings) -> Result<Option<Tile>, SolveError> {
    place_on_free_tile(settings, "mushroom", "mush_idx", &FOREST_TILES, &FOREST_OCCUPIED).await
}

pub async fn beehive(settings: &Settings) -> Result<Option<Tile>, SolveError> {
    place_on_free_tile(settings, "beehive", "hive_idx", &MEADOW_TILES, &MEADOW_OCCUPIED).await
}

/// Three distinct tiles next to the path
pub async fn signs(settings: &Settings) -> Result<Option<Vec<Tile>>, SolveError> {
    let mut set = ConstraintSet::new("signs");
    let mut indices = Vec::with_capacity(SIGN_COUNT);
    for n in 1..=SIGN_COUNT {
        let index = set.declare_variable(format!("sign{}", n))?;
        set.submit(index_domain(index, &PATH_ADJACENT))?;
        indices.push(index);
    }
    set.submit(all_different(&indices)?)?;

    let mut session = Session::open(set, settings)?;
    let Some(values) = solve_one(&mut session, &indices).await? else {
        return Ok(None);
    };

    values
        .into_iter()
        .map(|value| tile_at(&PATH_ADJACENT, value, "signs"))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}
