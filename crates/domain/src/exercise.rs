use derive_more::Deref;
use uuid::Uuid;

use crate::{Name, Seconds, Set};

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub equipment: Option<String>,
    pub notes: Option<String>,
    pub effort_type: EffortType,
    pub order: u32,
    pub superset: Option<Superset>,
    pub sets: Vec<Set>,
}

impl Exercise {
    #[must_use]
    pub fn new(selection: NewExercise, effort_type: EffortType) -> Self {
        Self {
            id: ExerciseID::random(),
            name: selection.name,
            equipment: selection.equipment,
            notes: selection.notes,
            effort_type,
            order: 0,
            superset: None,
            sets: vec![Set::new(effort_type)],
        }
    }

    #[must_use]
    pub fn is_superset(&self) -> bool {
        self.superset.is_some()
    }

    #[must_use]
    pub fn superset_with(&self) -> Option<ExerciseID> {
        self.superset.map(|s| s.partner)
    }

    #[must_use]
    pub fn superset_rest_time(&self) -> Option<Seconds> {
        self.superset.map(|s| s.rest_time)
    }

    #[must_use]
    pub fn completed_sets(&self) -> usize {
        self.sets.iter().filter(|s| s.completed).count()
    }

    pub fn change_effort_type(&mut self, effort_type: EffortType) {
        if self.effort_type == effort_type {
            return;
        }
        self.effort_type = effort_type;
        for set in &mut self.sets {
            *set = set.convert(effort_type);
        }
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// How the performance of an exercise is measured.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum EffortType {
    #[default]
    Reps,
    Time,
    Distance,
}

/// Pairing of an exercise with the exercise performed back-to-back with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Superset {
    pub partner: ExerciseID,
    pub rest_time: Seconds,
}

/// Exercise picked from the catalog, not yet part of a list.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExercise {
    pub name: Name,
    pub equipment: Option<String>,
    pub notes: Option<String>,
}

impl From<Name> for NewExercise {
    fn from(name: Name) -> Self {
        Self {
            name,
            equipment: None,
            notes: None,
        }
    }
}

/// Changes to an exercise. Fields set to `None` are left untouched.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExercisePatch {
    pub name: Option<Name>,
    pub equipment: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub effort_type: Option<EffortType>,
    pub superset_rest_time: Option<Seconds>,
}
