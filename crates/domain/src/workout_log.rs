use chrono::{Duration, NaiveDate};
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, ExerciseList, GymID, Name, ReadError, UpdateError, WorkoutTemplate,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutLogService {
    async fn get_workout_logs(&self) -> Result<Vec<WorkoutLog>, ReadError>;
    async fn get_workout_log(&self, id: WorkoutLogID) -> Result<WorkoutLog, ReadError>;
    async fn create_workout_log(
        &self,
        name: Name,
        date: NaiveDate,
        gym_id: Option<GymID>,
        exercises: ExerciseList,
    ) -> Result<WorkoutLog, CreateError>;
    async fn start_workout_log(
        &self,
        template: &WorkoutTemplate,
        date: NaiveDate,
        gym_id: Option<GymID>,
    ) -> Result<WorkoutLog, CreateError>;
    async fn modify_workout_log(
        &self,
        id: WorkoutLogID,
        name: Option<Name>,
        notes: Option<String>,
        exercises: Option<ExerciseList>,
    ) -> Result<WorkoutLog, UpdateError>;
    async fn delete_workout_log(&self, id: WorkoutLogID) -> Result<WorkoutLogID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutLogRepository {
    async fn read_workout_logs(&self) -> Result<Vec<WorkoutLog>, ReadError>;
    async fn create_workout_log(
        &self,
        name: Name,
        date: NaiveDate,
        gym_id: Option<GymID>,
        exercises: ExerciseList,
    ) -> Result<WorkoutLog, CreateError>;
    /// Fields that are `None` stay unchanged. Exercises are always replaced as a whole.
    async fn modify_workout_log(
        &self,
        id: WorkoutLogID,
        name: Option<Name>,
        notes: Option<String>,
        exercises: Option<ExerciseList>,
    ) -> Result<WorkoutLog, UpdateError>;
    async fn delete_workout_log(&self, id: WorkoutLogID) -> Result<WorkoutLogID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutLog {
    pub id: WorkoutLogID,
    pub name: Name,
    pub date: NaiveDate,
    pub gym_id: Option<GymID>,
    pub notes: String,
    pub exercises: ExerciseList,
}

impl WorkoutLog {
    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.exercises.num_sets()
    }

    #[must_use]
    pub fn completed_sets(&self) -> usize {
        self.exercises.completed_sets()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed_sets() == self.num_sets()
    }

    #[must_use]
    pub fn volume_load(&self) -> f32 {
        self.exercises.volume_load()
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.exercises.duration()
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutLogID(Uuid);

impl WorkoutLogID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutLogID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutLogID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}
