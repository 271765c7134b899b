//! Unsaved exercise list of the log or template currently being edited.

use log::debug;

use crate::{
    DraftError, EffortType, Exercise, ExerciseID, ExerciseList, ExercisePatch, NewExercise,
    PairingMode, SaveError, Seconds, Set, SetField, SetID, WorkoutLog, WorkoutLogID,
    WorkoutLogService, WorkoutTemplate, WorkoutTemplateID, WorkoutTemplateService,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    #[default]
    Idle,
    Saving,
}

#[derive(Debug, Default, Clone)]
pub struct Draft {
    exercises: ExerciseList,
    saved: ExerciseList,
    pairing: PairingMode,
    save_state: SaveState,
}

impl Draft {
    #[must_use]
    pub fn new(exercises: ExerciseList) -> Self {
        Self {
            saved: exercises.clone(),
            exercises,
            pairing: PairingMode::Idle,
            save_state: SaveState::Idle,
        }
    }

    #[must_use]
    pub fn exercises(&self) -> &ExerciseList {
        &self.exercises
    }

    #[must_use]
    pub fn pairing(&self) -> PairingMode {
        self.pairing
    }

    #[must_use]
    pub fn save_state(&self) -> SaveState {
        self.save_state
    }

    /// Whether the draft differs from the last loaded or saved state.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.exercises != self.saved
    }

    pub fn add_exercise(
        &mut self,
        selection: NewExercise,
        effort_type: EffortType,
    ) -> Result<ExerciseID, DraftError> {
        if self.pairing.is_active() {
            return Err(DraftError::PairingInProgress);
        }
        Ok(self.exercises.add_exercise(selection, effort_type))
    }

    pub fn edit_exercise(&mut self, index: usize, patch: ExercisePatch) -> Result<(), DraftError> {
        self.exercises.edit_exercise(index, patch)
    }

    /// Deletes the exercise at `index` if `confirm` agrees. Returns `None` if the deletion was
    /// declined.
    pub fn delete_exercise(
        &mut self,
        index: usize,
        confirm: impl FnOnce(&Exercise) -> bool,
    ) -> Result<Option<Exercise>, DraftError> {
        let exercise = self
            .exercises
            .get(index)
            .ok_or(DraftError::ExerciseIndexOutOfRange(index))?;
        if !confirm(exercise) {
            debug!("deletion of exercise {} declined", exercise.name);
            return Ok(None);
        }
        let deleted = self.exercises.delete_exercise(index)?;
        if self.pairing.source() == Some(deleted.id) {
            self.pairing.cancel();
        }
        Ok(Some(deleted))
    }

    pub fn move_exercise_up(&mut self, index: usize) -> Result<bool, DraftError> {
        self.exercises.move_exercise_up(index)
    }

    pub fn move_exercise_down(&mut self, index: usize) -> Result<bool, DraftError> {
        self.exercises.move_exercise_down(index)
    }

    pub fn change_effort_type(
        &mut self,
        index: usize,
        effort_type: EffortType,
    ) -> Result<(), DraftError> {
        self.exercises.change_effort_type(index, effort_type)
    }

    pub fn add_set(&mut self, index: usize) -> Result<SetID, DraftError> {
        self.exercises.add_set(index)
    }

    pub fn remove_set(&mut self, index: usize, set_index: usize) -> Result<Set, DraftError> {
        self.exercises.remove_set(index, set_index)
    }

    pub fn update_set(
        &mut self,
        index: usize,
        set_index: usize,
        field: SetField,
    ) -> Result<(), DraftError> {
        self.exercises.update_set(index, set_index, field)
    }

    /// Selects the exercise at `index` as the first exercise of a new superset.
    pub fn start_pairing(&mut self, index: usize) -> Result<(), DraftError> {
        let source = self
            .exercises
            .get(index)
            .ok_or(DraftError::ExerciseIndexOutOfRange(index))?
            .id;
        self.pairing.start(source)
    }

    /// Pairs the selected exercise with the exercise at `target`. Pairing mode stays active if
    /// the target is rejected.
    pub fn complete_pairing(
        &mut self,
        target: usize,
        rest_time: Seconds,
    ) -> Result<(), DraftError> {
        let source = self
            .pairing
            .source()
            .and_then(|id| self.exercises.position(id))
            .ok_or(DraftError::NotPairing)?;
        self.exercises.create_superset(source, target, rest_time)?;
        self.pairing.cancel();
        Ok(())
    }

    pub fn cancel_pairing(&mut self) {
        self.pairing.cancel();
    }

    pub fn remove_superset(&mut self, index: usize) -> Result<bool, DraftError> {
        self.exercises.remove_superset(index)
    }

    /// Returns the list to submit and marks the draft as saving.
    pub fn begin_save(&mut self) -> Result<ExerciseList, DraftError> {
        if self.save_state == SaveState::Saving {
            return Err(DraftError::SaveInProgress);
        }
        self.save_state = SaveState::Saving;
        Ok(self.exercises.clone())
    }

    /// Ends a save. The list returned by the server replaces the draft; after a failed save
    /// the draft is kept for another attempt.
    pub fn finish_save(&mut self, saved: Option<ExerciseList>) {
        self.save_state = SaveState::Idle;
        if let Some(exercises) = saved {
            self.saved = exercises.clone();
            self.exercises = exercises;
            self.pairing.cancel();
        }
    }

    pub async fn save_workout_log<S: WorkoutLogService>(
        &mut self,
        service: &S,
        id: WorkoutLogID,
    ) -> Result<WorkoutLog, SaveError> {
        let exercises = self.begin_save()?;
        let result = service
            .modify_workout_log(id, None, None, Some(exercises))
            .await;
        self.finish_save(result.as_ref().ok().map(|log| log.exercises.clone()));
        Ok(result?)
    }

    pub async fn save_workout_template<S: WorkoutTemplateService>(
        &mut self,
        service: &S,
        id: WorkoutTemplateID,
    ) -> Result<WorkoutTemplate, SaveError> {
        let exercises = self.begin_save()?;
        let result = service
            .modify_workout_template(id, None, None, Some(exercises))
            .await;
        self.finish_save(
            result
                .as_ref()
                .ok()
                .map(|template| template.exercises.clone()),
        );
        Ok(result?)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use crate::{
        CreateError, DeleteError, GymID, Name, ReadError, StorageError, UpdateError, Weight,
    };

    use super::*;

    fn draft(names: &[&str]) -> Draft {
        let mut exercises = ExerciseList::default();
        for name in names {
            exercises.add_exercise(Name::new(name).unwrap().into(), EffortType::Reps);
        }
        Draft::new(exercises)
    }

    fn new_exercise(name: &str) -> NewExercise {
        Name::new(name).unwrap().into()
    }

    #[test]
    fn test_pairing() {
        let mut draft = draft(&["A", "B", "C"]);

        draft.start_pairing(0).unwrap();
        assert_eq!(
            draft.pairing(),
            PairingMode::AwaitingTarget(draft.exercises().get(0).unwrap().id)
        );
        assert_eq!(draft.start_pairing(1), Err(DraftError::PairingInProgress));
        assert_eq!(
            draft.add_exercise(new_exercise("D"), EffortType::Reps),
            Err(DraftError::PairingInProgress)
        );

        assert_eq!(
            draft.complete_pairing(0, Seconds::DEFAULT_SUPERSET_REST),
            Err(DraftError::SelfPairing)
        );
        assert!(draft.pairing().is_active());

        draft
            .complete_pairing(2, Seconds::DEFAULT_SUPERSET_REST)
            .unwrap();

        assert_eq!(draft.pairing(), PairingMode::Idle);
        assert_eq!(draft.exercises().partner_of(0).map(|e| e.order), Some(2));
        assert_eq!(
            draft.exercises().get(2).unwrap().superset_rest_time(),
            Some(Seconds::DEFAULT_SUPERSET_REST)
        );
        assert!(draft.add_exercise(new_exercise("D"), EffortType::Reps).is_ok());
    }

    #[test]
    fn test_pairing_follows_moved_source() {
        let mut draft = draft(&["A", "B", "C"]);
        draft.start_pairing(0).unwrap();
        draft.move_exercise_down(0).unwrap();

        draft.complete_pairing(0, Seconds::DEFAULT_SUPERSET_REST).unwrap();

        assert_eq!(
            draft.exercises().partner_of(1).map(|e| e.name.to_string()),
            Some(String::from("B"))
        );
    }

    #[test]
    fn test_cancel_pairing() {
        let mut draft = draft(&["A", "B"]);
        draft.start_pairing(1).unwrap();

        draft.cancel_pairing();

        assert_eq!(draft.pairing(), PairingMode::Idle);
        assert_eq!(
            draft.complete_pairing(0, Seconds::DEFAULT_SUPERSET_REST),
            Err(DraftError::NotPairing)
        );
        assert!(!draft.is_dirty());
    }

    #[test]
    fn test_delete_exercise_requires_confirmation() {
        let mut draft = draft(&["A", "B"]);

        assert_eq!(draft.delete_exercise(0, |_| false), Ok(None));
        assert_eq!(draft.exercises().len(), 2);
        assert!(!draft.is_dirty());

        let deleted = draft
            .delete_exercise(0, |e| e.name.to_string() == "A")
            .unwrap()
            .unwrap();

        assert_eq!(deleted.name.to_string(), "A");
        assert_eq!(draft.exercises().len(), 1);
        assert_eq!(draft.exercises().get(0).unwrap().order, 0);
        assert!(draft.is_dirty());
    }

    #[test]
    fn test_delete_pairing_source_cancels_pairing() {
        let mut draft = draft(&["A", "B"]);
        draft.start_pairing(0).unwrap();

        draft.delete_exercise(0, |_| true).unwrap();

        assert_eq!(draft.pairing(), PairingMode::Idle);
    }

    #[test]
    fn test_remove_last_set_keeps_draft() {
        let mut draft = draft(&["A"]);
        let before = draft.exercises().clone();

        assert_eq!(draft.remove_set(0, 0), Err(DraftError::LastSet));
        assert_eq!(draft.exercises(), &before);
    }

    #[test]
    fn test_begin_save() {
        let mut draft = draft(&["A"]);
        draft.update_set(0, 0, SetField::Weight(Weight::new(42.5).unwrap())).unwrap();

        let payload = draft.begin_save().unwrap();

        assert_eq!(&payload, draft.exercises());
        assert_eq!(draft.save_state(), SaveState::Saving);
        assert_eq!(draft.begin_save(), Err(DraftError::SaveInProgress));

        draft.finish_save(None);

        assert_eq!(draft.save_state(), SaveState::Idle);
        assert!(draft.is_dirty());
    }

    #[tokio::test]
    async fn test_save_workout_log() {
        let mut draft = draft(&["A", "B"]);
        draft.create_superset_for_test();
        draft.add_set(1).unwrap();
        let expected = draft.exercises().clone();
        let service = FakeWorkoutLogService::default();

        let log = draft.save_workout_log(&service, 1.into()).await.unwrap();

        assert_eq!(service.received.borrow().as_ref(), Some(&expected));
        assert_eq!(log.exercises, expected);
        assert_eq!(draft.exercises(), &expected);
        assert_eq!(draft.save_state(), SaveState::Idle);
        assert!(!draft.is_dirty());
    }

    #[tokio::test]
    async fn test_save_workout_log_failure_keeps_draft() {
        let mut draft = draft(&["A"]);
        draft.add_set(0).unwrap();
        let expected = draft.exercises().clone();
        let service = FakeWorkoutLogService {
            fail: true,
            ..FakeWorkoutLogService::default()
        };

        let result = draft.save_workout_log(&service, 1.into()).await;

        assert!(matches!(
            result,
            Err(SaveError::Update(UpdateError::Storage(
                StorageError::NoConnection
            )))
        ));
        assert_eq!(draft.exercises(), &expected);
        assert_eq!(draft.save_state(), SaveState::Idle);
        assert!(draft.is_dirty());
    }

    #[tokio::test]
    async fn test_save_workout_template() {
        let mut draft = draft(&["A", "B", "C"]);
        draft.create_superset_for_test();
        draft.move_exercise_up(2).unwrap();
        let expected = draft.exercises().clone();
        let service = FakeWorkoutTemplateService::default();

        let template = draft
            .save_workout_template(&service, 2.into())
            .await
            .unwrap();

        assert_eq!(template.id, 2.into());
        assert_eq!(service.received.borrow().as_ref(), Some(&expected));
        assert_eq!(template.exercises, expected);
        assert_eq!(draft.exercises(), &expected);
        assert_eq!(draft.save_state(), SaveState::Idle);
        assert!(!draft.is_dirty());
    }

    #[tokio::test]
    async fn test_save_workout_template_failure_keeps_draft() {
        let mut draft = draft(&["A", "B"]);
        draft.delete_exercise(1, |_| true).unwrap();
        let expected = draft.exercises().clone();
        let service = FakeWorkoutTemplateService {
            fail: true,
            ..FakeWorkoutTemplateService::default()
        };

        let result = draft.save_workout_template(&service, 2.into()).await;

        assert!(matches!(
            result,
            Err(SaveError::Update(UpdateError::Storage(
                StorageError::NoConnection
            )))
        ));
        assert_eq!(draft.exercises(), &expected);
        assert_eq!(draft.save_state(), SaveState::Idle);
        assert!(draft.is_dirty());
        assert!(draft.begin_save().is_ok());
    }

    impl Draft {
        fn create_superset_for_test(&mut self) {
            self.start_pairing(0).unwrap();
            self.complete_pairing(1, Seconds::DEFAULT_SUPERSET_REST)
                .unwrap();
        }
    }

    #[derive(Default)]
    struct FakeWorkoutLogService {
        received: RefCell<Option<ExerciseList>>,
        fail: bool,
    }

    impl WorkoutLogService for FakeWorkoutLogService {
        async fn get_workout_logs(&self) -> Result<Vec<WorkoutLog>, ReadError> {
            unimplemented!()
        }

        async fn get_workout_log(&self, _: WorkoutLogID) -> Result<WorkoutLog, ReadError> {
            unimplemented!()
        }

        async fn create_workout_log(
            &self,
            _: Name,
            _: NaiveDate,
            _: Option<GymID>,
            _: ExerciseList,
        ) -> Result<WorkoutLog, CreateError> {
            unimplemented!()
        }

        async fn start_workout_log(
            &self,
            _: &WorkoutTemplate,
            _: NaiveDate,
            _: Option<GymID>,
        ) -> Result<WorkoutLog, CreateError> {
            unimplemented!()
        }

        async fn modify_workout_log(
            &self,
            id: WorkoutLogID,
            _: Option<Name>,
            _: Option<String>,
            exercises: Option<ExerciseList>,
        ) -> Result<WorkoutLog, UpdateError> {
            if self.fail {
                return Err(StorageError::NoConnection.into());
            }
            let exercises = exercises.unwrap_or_default();
            *self.received.borrow_mut() = Some(exercises.clone());
            Ok(WorkoutLog {
                id,
                name: Name::new("Push").unwrap(),
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                gym_id: None,
                notes: String::new(),
                exercises,
            })
        }

        async fn delete_workout_log(&self, _: WorkoutLogID) -> Result<WorkoutLogID, DeleteError> {
            unimplemented!()
        }
    }

    #[derive(Default)]
    struct FakeWorkoutTemplateService {
        received: RefCell<Option<ExerciseList>>,
        fail: bool,
    }

    impl WorkoutTemplateService for FakeWorkoutTemplateService {
        async fn get_workout_templates(&self) -> Result<Vec<WorkoutTemplate>, ReadError> {
            unimplemented!()
        }

        async fn create_workout_template(
            &self,
            _: Name,
            _: ExerciseList,
        ) -> Result<WorkoutTemplate, CreateError> {
            unimplemented!()
        }

        async fn modify_workout_template(
            &self,
            id: WorkoutTemplateID,
            _: Option<Name>,
            _: Option<String>,
            exercises: Option<ExerciseList>,
        ) -> Result<WorkoutTemplate, UpdateError> {
            if self.fail {
                return Err(StorageError::NoConnection.into());
            }
            let exercises = exercises.unwrap_or_default();
            *self.received.borrow_mut() = Some(exercises.clone());
            Ok(WorkoutTemplate {
                id,
                name: Name::new("Push Day").unwrap(),
                notes: String::new(),
                exercises,
            })
        }

        async fn delete_workout_template(
            &self,
            _: WorkoutTemplateID,
        ) -> Result<WorkoutTemplateID, DeleteError> {
            unimplemented!()
        }
    }
}
