//! The smallest possible model: one bounded integer

use crate::config::Settings;
use crate::error::SolveError;
use crate::model::{bound, ConstraintSet};
use crate::solve::{solve_one, Session};

/// Any `x` with `9 <= x <= 10`
pub async fn range_demo(settings: &Settings) -> Result<Option<i64>, SolveError> {
    let mut set = ConstraintSet::new("range_demo");
    let x = set.declare_variable("x")?;
    set.submit(bound(x, 9, 10))?;

    let mut session = Session::open(set, settings)?;
    Ok(solve_one(&mut session, &[x]).await?.map(|values| values[0]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_range_demo() {
        let x = range_demo(&Settings::default()).await.unwrap().unwrap();
        assert!(x == 9 || x == 10);
    }

    #[tokio::test]
    async fn test_range_demo_narrow_width() {
        // 10 is still representable with 5 bits
        let mut settings = Settings::default();
        settings.encoding.bit_width = 5;
        let x = range_demo(&settings).await.unwrap().unwrap();
        assert!((9..=10).contains(&x));
    }
}
