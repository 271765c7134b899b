use chrono::Duration;
use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, DeleteError, ExerciseList, Name, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait WorkoutTemplateService {
    async fn get_workout_templates(&self) -> Result<Vec<WorkoutTemplate>, ReadError>;
    async fn create_workout_template(
        &self,
        name: Name,
        exercises: ExerciseList,
    ) -> Result<WorkoutTemplate, CreateError>;
    async fn modify_workout_template(
        &self,
        id: WorkoutTemplateID,
        name: Option<Name>,
        notes: Option<String>,
        exercises: Option<ExerciseList>,
    ) -> Result<WorkoutTemplate, UpdateError>;
    async fn delete_workout_template(
        &self,
        id: WorkoutTemplateID,
    ) -> Result<WorkoutTemplateID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutTemplateRepository {
    async fn read_workout_templates(&self) -> Result<Vec<WorkoutTemplate>, ReadError>;
    async fn create_workout_template(
        &self,
        name: Name,
        exercises: ExerciseList,
    ) -> Result<WorkoutTemplate, CreateError>;
    async fn modify_workout_template(
        &self,
        id: WorkoutTemplateID,
        name: Option<Name>,
        notes: Option<String>,
        exercises: Option<ExerciseList>,
    ) -> Result<WorkoutTemplate, UpdateError>;
    async fn delete_workout_template(
        &self,
        id: WorkoutTemplateID,
    ) -> Result<WorkoutTemplateID, DeleteError>;
}

/// Reusable plan of exercises from which workout logs are started.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutTemplate {
    pub id: WorkoutTemplateID,
    pub name: Name,
    pub notes: String,
    pub exercises: ExerciseList,
}

impl WorkoutTemplate {
    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.exercises.num_sets()
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.exercises.duration()
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutTemplateID(Uuid);

impl WorkoutTemplateID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutTemplateID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutTemplateID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}
