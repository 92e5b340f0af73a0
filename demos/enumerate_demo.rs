//! Building a constraint set by hand and retrieving its solutions
//!
//! Shows the three retrieval modes: a single solution, every value of a
//! subject variable, and a seeded random sample.

use constraint_puzzles::model::{bound, ConstraintSet};
use constraint_puzzles::solve::{enumerate_all, sample, solve_one, Session};
use constraint_puzzles::Settings;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Constraint Enumeration Demonstration ===\n");
    let settings = Settings::default();

    // Single solution
    let mut set = ConstraintSet::new("pair");
    let x = set.declare_variable("x")?;
    let y = set.declare_variable("y")?;
    set.submit(bound(x, -5, 5))?;
    set.submit(y.gt(x).and(y.le(-4)))?;
    let mut session = Session::open(set, &settings)?;

    match solve_one(&mut session, &[x, y]).await? {
        Some(values) => println!("  pair: x={}, y={}", values[0], values[1]),
        None => println!("  pair: no solution"),
    }
    println!("{}", session.statistics());

    // Every value
    let mut set = ConstraintSet::new("odd_digits");
    let d = set.declare_variable("d")?;
    set.submit(bound(d, 0, 9))?;
    for even in [0, 2, 4, 6, 8] {
        set.submit(d.ne(even))?;
    }
    let mut session = Session::open(set, &settings)?;

    let enumeration = enumerate_all(&mut session, d).await?;
    let mut digits = enumeration.values.clone();
    digits.sort_unstable();
    println!("  odd digits: {:?} ({} checks)", digits, enumeration.checks);

    // Random sample
    let mut set = ConstraintSet::new("dice");
    let roll = set.declare_variable("roll")?;
    set.submit(bound(roll, 1, 6))?;
    let mut session = Session::open(set, &settings)?;

    let mut rng = StdRng::seed_from_u64(2024);
    println!("  dice roll: {}", sample(&mut session, roll, &mut rng).await?);

    Ok(())
}
