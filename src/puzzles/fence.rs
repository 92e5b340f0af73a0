//! Point placement relative to a rectangular fence

use crate::config::Settings;
use crate::error::SolveError;
use crate::model::{bound, not, or, ConstraintSet, IntVar, Predicate};
use crate::solve::{solve_one, Session};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned rectangle, bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence {
    pub x_min: i64,
    pub x_max: i64,
    pub y_min: i64,
    pub y_max: i64,
}

pub const FENCE: Fence = Fence {
    x_min: 5,
    x_max: 10,
    y_min: 15,
    y_max: 25,
};

impl Fence {
    pub fn contains(&self, point: Point) -> bool {
        (self.x_min..=self.x_max).contains(&point.x) && (self.y_min..=self.y_max).contains(&point.y)
    }

    /// On exactly one of the left (`x == x_min`) and top (`y == y_min`)
    /// sides; the shared corner is on neither
    pub fn on_left_or_top(&self, point: Point) -> bool {
        let left = point.x == self.x_min && (self.y_min..=self.y_max).contains(&point.y);
        let top = point.y == self.y_min && (self.x_min..=self.x_max).contains(&point.x);
        left != top
    }

    fn inside(&self, x: IntVar, y: IntVar) -> Predicate {
        bound(x, self.x_min, self.x_max).and(bound(y, self.y_min, self.y_max))
    }

    fn left_or_top(&self, x: IntVar, y: IntVar) -> Predicate {
        let left = x.eq(self.x_min).and(bound(y, self.y_min, self.y_max));
        let top = y.eq(self.y_min).and(bound(x, self.x_min, self.x_max));
        left.clone().or(top.clone()).and(not(left.and(top)))
    }

    fn beyond(&self, x: IntVar, y: IntVar) -> Predicate {
        or([
            x.gt(self.x_max),
            y.gt(self.y_max),
            x.lt(self.x_min),
            y.lt(self.y_min),
        ])
    }
}

async fn solve_point(
    settings: &Settings,
    label: &str,
    names: [&str; 2],
    constraints: impl FnOnce(IntVar, IntVar) -> Vec<Predicate>,
) -> Result<Option<Point>, SolveError> {
    let mut set = ConstraintSet::new(label);
    let x = set.declare_variable(names[0])?;
    let y = set.declare_variable(names[1])?;
    for predicate in constraints(x, y) {
        set.submit(predicate)?;
    }

    let mut session = Session::open(set, settings)?;
    let point = solve_one(&mut session, &[x, y])
        .await?
        .map(|values| Point {
            x: values[0],
            y: values[1],
        });
    Ok(point)
}

pub async fn inside_fence(settings: &Settings) -> Result<Option<Point>, SolveError> {
    solve_point(settings, "inside_fence", ["x", "y"], |x, y| {
        vec![FENCE.inside(x, y)]
    })
    .await
}

pub async fn on_fence(settings: &Settings) -> Result<Option<Point>, SolveError> {
    solve_point(settings, "on_fence", ["x", "y"], |x, y| {
        vec![FENCE.left_or_top(x, y)]
    })
    .await
}

/// A point with `x >= 8` and `y >= 20` that lies outside the fence
pub async fn outside_fence(settings: &Settings) -> Result<Option<Point>, SolveError> {
    solve_point(settings, "outside_fence", ["x", "y"], |x, y| {
        vec![
            x.ge(8).and(y.ge(20)),
            FENCE.beyond(x, y),
            not(FENCE.inside(x, y)),
        ]
    })
    .await
}

pub async fn wheelbarrow(settings: &Settings) -> Result<Option<Point>, SolveError> {
    solve_point(settings, "wheelbarrow", ["wheel_x", "wheel_y"], |x, y| {
        vec![FENCE.inside(x, y)]
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solve::enumerate_tuples;

    #[test]
    fn test_fence_geometry() {
        assert!(FENCE.contains(Point { x: 5, y: 15 }));
        assert!(FENCE.contains(Point { x: 10, y: 25 }));
        assert!(!FENCE.contains(Point { x: 11, y: 20 }));

        assert!(FENCE.on_left_or_top(Point { x: 5, y: 20 }));
        assert!(FENCE.on_left_or_top(Point { x: 8, y: 15 }));
        assert!(!FENCE.on_left_or_top(Point { x: 8, y: 20 }));
        assert!(!FENCE.on_left_or_top(Point { x: 5, y: 26 }));
        assert!(!FENCE.on_left_or_top(Point { x: 5, y: 15 }));
    }

    #[tokio::test]
    async fn test_inside_fence() {
        let point = inside_fence(&Settings::default()).await.unwrap().unwrap();
        assert!(FENCE.contains(point));
    }

    #[tokio::test]
    async fn test_on_fence() {
        let point = on_fence(&Settings::default()).await.unwrap().unwrap();
        assert!(FENCE.on_left_or_top(point));
    }

    #[tokio::test]
    async fn test_outside_fence() {
        let point = outside_fence(&Settings::default()).await.unwrap().unwrap();
        assert!(point.x >= 8 && point.y >= 20);
        assert!(!FENCE.contains(point));
    }

    #[tokio::test]
    async fn test_wheelbarrow() {
        let point = wheelbarrow(&Settings::default()).await.unwrap().unwrap();
        assert!(FENCE.contains(point));
    }

    #[tokio::test]
    async fn test_every_fence_point_is_found() {
        let mut set = ConstraintSet::new("fence_points");
        let x = set.declare_variable("x").unwrap();
        let y = set.declare_variable("y").unwrap();
        set.submit(FENCE.left_or_top(x, y)).unwrap();
        let mut session = Session::open(set, &Settings::default()).unwrap();

        let enumeration = enumerate_tuples(&mut session, &[x, y], None).await.unwrap();
        // 11 points on the left side and 6 on the top, minus the shared corner
        assert_eq!(enumeration.len(), 15);
        assert!(!enumeration.values.contains(&vec![5, 15]));
        for values in &enumeration.values {
            assert!(FENCE.on_left_or_top(Point {
                x: values[0],
                y: values[1],
            }));
        }
    }
}
