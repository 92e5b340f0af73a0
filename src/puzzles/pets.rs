//! Logic puzzle: four children, four pets

use crate::config::Settings;
use crate::error::{ModelError, SolveError};
use crate::model::{all_different, bound, one_of, ConstraintSet, IntVar};
use crate::solve::{enumerate_tuples, Session};
use serde::Serialize;
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pet {
    Cat,
    Dog,
    Turtle,
    Hamster,
}

impl Pet {
    pub const ALL: [Pet; 4] = [Pet::Cat, Pet::Dog, Pet::Turtle, Pet::Hamster];

    /// Integer encoding used inside the model
    pub fn code(self) -> i64 {
        match self {
            Pet::Cat => 0,
            Pet::Dog => 1,
            Pet::Turtle => 2,
            Pet::Hamster => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Pet> {
        Self::ALL.into_iter().find(|pet| pet.code() == code)
    }
}

impl fmt::Display for Pet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Pet::Cat => "cat",
            Pet::Dog => "dog",
            Pet::Turtle => "turtle",
            Pet::Hamster => "hamster",
        };
        f.write_str(name)
    }
}

/// Who owns which pet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PetAssignment {
    pub alice: Pet,
    pub ben: Pet,
    pub chloe: Pet,
    pub diego: Pet,
}

impl fmt::Display for PetAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "alice={}, ben={}, chloe={}, diego={}",
            self.alice, self.ben, self.chloe, self.diego
        )
    }
}

pub const CHILDREN: [&str; 4] = ["alice", "ben", "chloe", "diego"];

/// The puzzle's constraint set and its four subject variables in `CHILDREN` order
pub fn build() -> Result<(ConstraintSet, [IntVar; 4]), ModelError> {
    let mut set = ConstraintSet::new("children_pets");
    let alice = set.declare_variable("alice")?;
    let ben = set.declare_variable("ben")?;
    let chloe = set.declare_variable("chloe")?;
    let diego = set.declare_variable("diego")?;
    let children = [alice, ben, chloe, diego];

    for child in children {
        set.submit(bound(child, Pet::Cat.code(), Pet::Hamster.code()))?;
    }
    set.submit(one_of(alice, &[Pet::Cat.code(), Pet::Hamster.code()])?)?;
    set.submit(one_of(ben, &[Pet::Dog.code(), Pet::Turtle.code()])?)?;
    set.submit(chloe.ne(Pet::Cat.code()).and(chloe.ne(Pet::Dog.code())))?;
    set.submit(diego.gt(ben))?;
    set.submit(all_different(&children)?)?;
    // Without this chloe and diego could swap turtle and hamster
    set.submit(diego.ne(Pet::Hamster.code()))?;

    Ok((set, children))
}

/// Solve the puzzle, enumerating up to `solver.max_solutions` answers so
/// an ambiguous model is reported.
pub async fn children_pets(settings: &Settings) -> Result<Option<PetAssignment>, SolveError> {
    let (set, children) = build()?;
    let mut session = Session::open(set, settings)?;

    let limit = settings.solver.max_solutions.max(1);
    let enumeration = enumerate_tuples(&mut session, &children, Some(limit)).await?;
    if enumeration.len() > 1 {
        warn!(
            event = "ambiguous_puzzle",
            label = %session.label(),
            solutions = enumeration.len(),
        );
    }

    let Some(codes) = enumeration.values.into_iter().next() else {
        return Ok(None);
    };

    let pets = codes
        .into_iter()
        .map(Pet::from_code)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| SolveError::ModelMismatch {
            label: session.label().to_string(),
        })?;

    Ok(Some(PetAssignment {
        alice: pets[0],
        ben: pets[1],
        chloe: pets[2],
        diego: pets[3],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pet_codes() {
        for pet in Pet::ALL {
            assert_eq!(Pet::from_code(pet.code()), Some(pet));
        }
        assert_eq!(Pet::from_code(4), None);
        assert_eq!(Pet::Hamster.to_string(), "hamster");
    }

    #[tokio::test]
    async fn test_children_pets() {
        let pets = children_pets(&Settings::default()).await.unwrap().unwrap();
        assert_eq!(
            pets,
            PetAssignment {
                alice: Pet::Cat,
                ben: Pet::Dog,
                chloe: Pet::Hamster,
                diego: Pet::Turtle,
            }
        );
    }

    #[tokio::test]
    async fn test_solution_is_unique() {
        let (set, children) = build().unwrap();
        let mut session = Session::open(set, &Settings::default()).unwrap();

        let enumeration = enumerate_tuples(&mut session, &children, None).await.unwrap();
        assert_eq!(enumeration.values, vec![vec![0, 1, 3, 2]]);
        assert_eq!(enumeration.checks, 2);
    }

    #[tokio::test]
    async fn test_two_bit_integers_are_rejected() {
        // Two bits span -2..=1, too narrow for the hamster code
        let mut settings = Settings::default();
        settings.encoding.bit_width = 2;

        let err = children_pets(&settings).await.unwrap_err();
        assert!(matches!(
            err,
            SolveError::Model(ModelError::ConstantOutOfRange { bit_width: 2, .. })
        ));
    }

    #[test]
    fn test_variable_names() {
        let (set, _) = build().unwrap();
        for child in CHILDREN {
            assert!(set.variable(child).is_some());
        }
    }

    #[test]
    fn test_display() {
        let pets = PetAssignment {
            alice: Pet::Cat,
            ben: Pet::Dog,
            chloe: Pet::Hamster,
            diego: Pet::Turtle,
        };
        assert_eq!(pets.to_string(), "alice=cat, ben=dog, chloe=hamster, diego=turtle");
    }
}
