//! Ordered list of exercises as edited in a workout log or template.
//!
//! Exercises are kept in an arena keyed by [`ExerciseID`]; the position in the list is held
//! separately and mirrored into each exercise's `order`. Superset partners refer to each other
//! by ID, so reordering never invalidates a pairing.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Duration;
use log::warn;

use crate::{
    DraftError, EffortType, Exercise, ExerciseID, ExercisePatch, NewExercise, Seconds, Set,
    SetField, SetID, SetMetrics, Superset,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExerciseList {
    exercises: BTreeMap<ExerciseID, Exercise>,
    sequence: Vec<ExerciseID>,
}

impl ExerciseList {
    /// Builds a list from exercises in their intended order.
    ///
    /// Inconsistent input is repaired: duplicate exercises are dropped, exercises without sets
    /// get a default set, sets are converted to the effort type of their exercise, one-sided
    /// pairings are dissolved and all orders are reindexed.
    #[must_use]
    pub fn new(exercises: Vec<Exercise>) -> Self {
        let mut list = Self::default();
        for mut exercise in exercises {
            if list.exercises.contains_key(&exercise.id) {
                warn!("dropping duplicate exercise {}", *exercise.id);
                continue;
            }
            if exercise.sets.is_empty() {
                warn!("adding missing set to exercise {}", *exercise.id);
                exercise.sets.push(Set::new(exercise.effort_type));
            }
            let effort_type = exercise.effort_type;
            for set in &mut exercise.sets {
                if set.effort_type() != effort_type {
                    *set = set.convert(effort_type);
                }
            }
            list.sequence.push(exercise.id);
            list.exercises.insert(exercise.id, exercise);
        }
        list.repair_supersets();
        list.reindex();
        list
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Exercise> {
        self.sequence
            .get(index)
            .and_then(|id| self.exercises.get(id))
    }

    #[must_use]
    pub fn get_by_id(&self, id: ExerciseID) -> Option<&Exercise> {
        self.exercises.get(&id)
    }

    #[must_use]
    pub fn position(&self, id: ExerciseID) -> Option<usize> {
        self.sequence.iter().position(|i| *i == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exercise> {
        self.sequence.iter().filter_map(|id| self.exercises.get(id))
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<Exercise> {
        self.iter().cloned().collect()
    }

    /// Exercise paired with the exercise at `index`.
    #[must_use]
    pub fn partner_of(&self, index: usize) -> Option<&Exercise> {
        self.get(index)?
            .superset_with()
            .and_then(|id| self.get_by_id(id))
    }

    /// Appends a new exercise with one default set.
    pub fn add_exercise(&mut self, selection: NewExercise, effort_type: EffortType) -> ExerciseID {
        let mut exercise = Exercise::new(selection, effort_type);
        exercise.order = to_order(self.sequence.len());
        let id = exercise.id;
        self.sequence.push(id);
        self.exercises.insert(id, exercise);
        id
    }

    /// Merges `patch` into the exercise at `index`. The ID and order are never changed. A new
    /// superset rest time is applied to both exercises of a pair.
    pub fn edit_exercise(&mut self, index: usize, patch: ExercisePatch) -> Result<(), DraftError> {
        let ExercisePatch {
            name,
            equipment,
            notes,
            effort_type,
            superset_rest_time,
        } = patch;
        let exercise = self.exercise_mut(index)?;
        if let Some(name) = name {
            exercise.name = name;
        }
        if let Some(equipment) = equipment {
            exercise.equipment = equipment;
        }
        if let Some(notes) = notes {
            exercise.notes = notes;
        }
        if let Some(effort_type) = effort_type {
            exercise.change_effort_type(effort_type);
        }
        let id = exercise.id;
        let partner = exercise.superset_with();
        if let Some(rest_time) = superset_rest_time {
            for id in std::iter::once(id).chain(partner) {
                if let Some(superset) = self
                    .exercises
                    .get_mut(&id)
                    .and_then(|e| e.superset.as_mut())
                {
                    superset.rest_time = rest_time;
                }
            }
        }
        Ok(())
    }

    /// Removes the exercise at `index`. A partner of the removed exercise is left unpaired.
    pub fn delete_exercise(&mut self, index: usize) -> Result<Exercise, DraftError> {
        let id = self.id_at(index)?;
        let exercise = self
            .exercises
            .remove(&id)
            .ok_or(DraftError::ExerciseIndexOutOfRange(index))?;
        self.sequence.remove(index);
        if let Some(partner) = exercise
            .superset_with()
            .and_then(|partner| self.exercises.get_mut(&partner))
        {
            partner.superset = None;
        }
        self.reindex();
        Ok(exercise)
    }

    /// Swaps the exercise with its predecessor. Returns `false` for the first exercise.
    pub fn move_exercise_up(&mut self, index: usize) -> Result<bool, DraftError> {
        self.id_at(index)?;
        if index == 0 {
            return Ok(false);
        }
        self.swap(index - 1, index);
        Ok(true)
    }

    /// Swaps the exercise with its successor. Returns `false` for the last exercise.
    pub fn move_exercise_down(&mut self, index: usize) -> Result<bool, DraftError> {
        self.id_at(index)?;
        if index + 1 >= self.sequence.len() {
            return Ok(false);
        }
        self.swap(index, index + 1);
        Ok(true)
    }

    pub fn change_effort_type(
        &mut self,
        index: usize,
        effort_type: EffortType,
    ) -> Result<(), DraftError> {
        self.exercise_mut(index)?.change_effort_type(effort_type);
        Ok(())
    }

    /// Appends a copy of the last set of the exercise at `index`.
    pub fn add_set(&mut self, index: usize) -> Result<SetID, DraftError> {
        let exercise = self.exercise_mut(index)?;
        let mut set = exercise
            .sets
            .last()
            .map_or_else(|| Set::new(exercise.effort_type), Set::repeat);
        set.order = to_order(exercise.sets.len());
        let id = set.id;
        exercise.sets.push(set);
        Ok(id)
    }

    /// Removes a set and reindexes the remaining sets. The last set of an exercise cannot be
    /// removed.
    pub fn remove_set(&mut self, index: usize, set_index: usize) -> Result<Set, DraftError> {
        let exercise = self.exercise_mut(index)?;
        if exercise.sets.len() == 1 {
            return Err(DraftError::LastSet);
        }
        if set_index >= exercise.sets.len() {
            return Err(DraftError::SetIndexOutOfRange {
                exercise: index,
                set: set_index,
            });
        }
        let set = exercise.sets.remove(set_index);
        reindex_sets(&mut exercise.sets);
        Ok(set)
    }

    pub fn update_set(
        &mut self,
        index: usize,
        set_index: usize,
        field: SetField,
    ) -> Result<(), DraftError> {
        self.exercise_mut(index)?
            .sets
            .get_mut(set_index)
            .ok_or(DraftError::SetIndexOutOfRange {
                exercise: index,
                set: set_index,
            })?
            .update(field)
    }

    /// Pairs two exercises. Existing pairings of either exercise are dissolved first.
    pub fn create_superset(
        &mut self,
        source: usize,
        target: usize,
        rest_time: Seconds,
    ) -> Result<(), DraftError> {
        let source_id = self.id_at(source)?;
        let target_id = self.id_at(target)?;
        if source_id == target_id {
            return Err(DraftError::SelfPairing);
        }
        self.dissolve_superset(source_id);
        self.dissolve_superset(target_id);
        for (id, partner) in [(source_id, target_id), (target_id, source_id)] {
            if let Some(exercise) = self.exercises.get_mut(&id) {
                exercise.superset = Some(Superset { partner, rest_time });
            }
        }
        Ok(())
    }

    /// Unpairs the exercise at `index` and its partner. Returns `false` if it was not paired.
    pub fn remove_superset(&mut self, index: usize) -> Result<bool, DraftError> {
        let id = self.id_at(index)?;
        Ok(self.dissolve_superset(id))
    }

    /// Groups the exercises for display. Paired exercises form one group at the position of
    /// the first of them.
    #[must_use]
    pub fn groups(&self) -> Vec<ExerciseGroup<'_>> {
        let mut grouped = BTreeSet::new();
        let mut groups = vec![];
        for exercise in self.iter() {
            if grouped.contains(&exercise.id) {
                continue;
            }
            match exercise.superset_with().and_then(|id| self.get_by_id(id)) {
                Some(partner) => {
                    grouped.insert(partner.id);
                    groups.push(ExerciseGroup::Superset(exercise, partner));
                }
                None => groups.push(ExerciseGroup::Single(exercise)),
            }
        }
        groups
    }

    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.iter().map(|e| e.sets.len()).sum()
    }

    #[must_use]
    pub fn completed_sets(&self) -> usize {
        self.iter().map(Exercise::completed_sets).sum()
    }

    /// Sum of repetitions times weight in kg over all repetition sets.
    #[must_use]
    pub fn volume_load(&self) -> f32 {
        self.iter()
            .flat_map(|e| &e.sets)
            .filter_map(|s| match s.metrics {
                #[allow(clippy::cast_precision_loss)]
                SetMetrics::Reps {
                    reps,
                    weight,
                    weight_unit,
                } => Some(u32::from(reps) as f32 * weight.in_kg(weight_unit)),
                SetMetrics::Time { .. } | SetMetrics::Distance { .. } => None,
            })
            .sum()
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.iter()
            .flat_map(|e| &e.sets)
            .map(Set::duration)
            .sum()
    }

    /// Gives every exercise and set a new ID, keeping pairings. Used to start a workout from a
    /// template.
    #[must_use]
    pub fn instantiate(&self) -> Self {
        let ids = self
            .sequence
            .iter()
            .map(|id| (*id, ExerciseID::random()))
            .collect::<BTreeMap<_, _>>();
        Self::new(
            self.iter()
                .map(|exercise| Exercise {
                    id: ids.get(&exercise.id).copied().unwrap_or_else(ExerciseID::random),
                    superset: exercise.superset.and_then(|superset| {
                        ids.get(&superset.partner).map(|partner| Superset {
                            partner: *partner,
                            rest_time: superset.rest_time,
                        })
                    }),
                    sets: exercise
                        .sets
                        .iter()
                        .map(|set| Set {
                            completed: false,
                            ..set.repeat()
                        })
                        .collect(),
                    ..exercise.clone()
                })
                .collect(),
        )
    }

    /// Checks that orders are contiguous, every exercise has matching sets and pairings are
    /// symmetric.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        if self.exercises.len() != self.sequence.len() {
            return Err(InvariantViolation::Inconsistent);
        }
        for (position, id) in self.sequence.iter().enumerate() {
            let exercise = self
                .exercises
                .get(id)
                .ok_or(InvariantViolation::Inconsistent)?;
            let expected = to_order(position);
            if exercise.order != expected {
                return Err(InvariantViolation::ExerciseOrder {
                    id: *id,
                    expected,
                    actual: exercise.order,
                });
            }
            if exercise.sets.is_empty() {
                return Err(InvariantViolation::NoSets(*id));
            }
            for (set_position, set) in exercise.sets.iter().enumerate() {
                let expected = to_order(set_position);
                if set.order != expected {
                    return Err(InvariantViolation::SetOrder {
                        id: *id,
                        expected,
                        actual: set.order,
                    });
                }
                if set.effort_type() != exercise.effort_type {
                    return Err(InvariantViolation::MetricsMismatch(*id));
                }
            }
            if let Some(superset) = exercise.superset {
                match self
                    .exercises
                    .get(&superset.partner)
                    .and_then(|partner| partner.superset)
                {
                    Some(back) if back.partner == *id && superset.partner != *id => {
                        if back.rest_time != superset.rest_time {
                            return Err(InvariantViolation::SupersetRestTime(*id));
                        }
                    }
                    _ => return Err(InvariantViolation::AsymmetricSuperset(*id)),
                }
            }
        }
        Ok(())
    }

    fn id_at(&self, index: usize) -> Result<ExerciseID, DraftError> {
        self.sequence
            .get(index)
            .copied()
            .ok_or(DraftError::ExerciseIndexOutOfRange(index))
    }

    fn exercise_mut(&mut self, index: usize) -> Result<&mut Exercise, DraftError> {
        let id = self.id_at(index)?;
        self.exercises
            .get_mut(&id)
            .ok_or(DraftError::ExerciseIndexOutOfRange(index))
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.sequence.swap(a, b);
        for position in [a, b] {
            if let Some(exercise) = self
                .sequence
                .get(position)
                .and_then(|id| self.exercises.get_mut(id))
            {
                exercise.order = to_order(position);
            }
        }
    }

    fn dissolve_superset(&mut self, id: ExerciseID) -> bool {
        let Some(superset) = self
            .exercises
            .get_mut(&id)
            .and_then(|exercise| exercise.superset.take())
        else {
            return false;
        };
        if let Some(partner) = self.exercises.get_mut(&superset.partner) {
            if partner.superset_with() == Some(id) {
                partner.superset = None;
            }
        }
        true
    }

    /// Keeps only reciprocal pairings. The first exercise of a pair in list order decides the
    /// shared rest time.
    fn repair_supersets(&mut self) {
        let pairings = self
            .iter()
            .filter_map(|e| e.superset.map(|s| (e.id, s)))
            .collect::<Vec<_>>();
        let mut repaired: BTreeMap<ExerciseID, Option<Superset>> = BTreeMap::new();
        for (id, superset) in pairings {
            let reciprocal = superset.partner != id
                && self
                    .exercises
                    .get(&superset.partner)
                    .and_then(|partner| partner.superset_with())
                    == Some(id);
            if !reciprocal {
                warn!("dissolving one-sided superset of exercise {}", *id);
                repaired.insert(id, None);
            } else if !repaired.contains_key(&superset.partner) {
                repaired.insert(id, Some(superset));
                repaired.insert(
                    superset.partner,
                    Some(Superset {
                        partner: id,
                        rest_time: superset.rest_time,
                    }),
                );
            }
        }
        for (id, superset) in repaired {
            if let Some(exercise) = self.exercises.get_mut(&id) {
                exercise.superset = superset;
            }
        }
    }

    fn reindex(&mut self) {
        for (position, id) in self.sequence.iter().enumerate() {
            if let Some(exercise) = self.exercises.get_mut(id) {
                exercise.order = to_order(position);
                reindex_sets(&mut exercise.sets);
            }
        }
    }
}

impl From<Vec<Exercise>> for ExerciseList {
    fn from(value: Vec<Exercise>) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExerciseGroup<'a> {
    Single(&'a Exercise),
    Superset(&'a Exercise, &'a Exercise),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("exercise arena and sequence disagree")]
    Inconsistent,
    #[error("exercise {id:?} has order {actual}, expected {expected}")]
    ExerciseOrder {
        id: ExerciseID,
        expected: u32,
        actual: u32,
    },
    #[error("set of exercise {id:?} has order {actual}, expected {expected}")]
    SetOrder {
        id: ExerciseID,
        expected: u32,
        actual: u32,
    },
    #[error("exercise {0:?} has no sets")]
    NoSets(ExerciseID),
    #[error("sets of exercise {0:?} do not match its effort type")]
    MetricsMismatch(ExerciseID),
    #[error("superset of exercise {0:?} is not reciprocal")]
    AsymmetricSuperset(ExerciseID),
    #[error("superset of exercise {0:?} has diverging rest times")]
    SupersetRestTime(ExerciseID),
}

fn reindex_sets(sets: &mut [Set]) {
    for (position, set) in sets.iter_mut().enumerate() {
        set.order = to_order(position);
    }
}

fn to_order(position: usize) -> u32 {
    u32::try_from(position).unwrap_or(u32::MAX)
}
