use chrono::NaiveDate;
use log::{debug, error};

use crate::{
    CreateError, DeleteError, ExerciseList, Gym, GymID, GymRepository, GymService, Name, Program,
    ProgramID, ProgramRepository, ProgramService, ReadError, UpdateError, WorkoutLog,
    WorkoutLogID, WorkoutLogRepository, WorkoutLogService, WorkoutTemplate, WorkoutTemplateID,
    WorkoutTemplateRepository, WorkoutTemplateService,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: WorkoutLogRepository> WorkoutLogService for Service<R> {
    async fn get_workout_logs(&self) -> Result<Vec<WorkoutLog>, ReadError> {
        log_on_error!(
            self.repository.read_workout_logs(),
            ReadError,
            "get",
            "workout logs"
        )
    }

    async fn get_workout_log(&self, id: WorkoutLogID) -> Result<WorkoutLog, ReadError> {
        let logs = self.get_workout_logs().await?;
        logs.into_iter()
            .find(|log| log.id == id)
            .ok_or(ReadError::NotFound)
    }

    async fn create_workout_log(
        &self,
        name: Name,
        date: NaiveDate,
        gym_id: Option<GymID>,
        exercises: ExerciseList,
    ) -> Result<WorkoutLog, CreateError> {
        log_on_error!(
            self.repository
                .create_workout_log(name, date, gym_id, exercises),
            CreateError,
            "create",
            "workout log"
        )
    }

    async fn start_workout_log(
        &self,
        template: &WorkoutTemplate,
        date: NaiveDate,
        gym_id: Option<GymID>,
    ) -> Result<WorkoutLog, CreateError> {
        debug!("starting workout log from template {}", template.name);
        self.create_workout_log(
            template.name.clone(),
            date,
            gym_id,
            template.exercises.instantiate(),
        )
        .await
    }

    async fn modify_workout_log(
        &self,
        id: WorkoutLogID,
        name: Option<Name>,
        notes: Option<String>,
        exercises: Option<ExerciseList>,
    ) -> Result<WorkoutLog, UpdateError> {
        log_on_error!(
            self.repository.modify_workout_log(id, name, notes, exercises),
            UpdateError,
            "modify",
            "workout log"
        )
    }

    async fn delete_workout_log(&self, id: WorkoutLogID) -> Result<WorkoutLogID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout_log(id),
            DeleteError,
            "delete",
            "workout log"
        )
    }
}

impl<R: WorkoutTemplateRepository> WorkoutTemplateService for Service<R> {
    async fn get_workout_templates(&self) -> Result<Vec<WorkoutTemplate>, ReadError> {
        log_on_error!(
            self.repository.read_workout_templates(),
            ReadError,
            "get",
            "workout templates"
        )
    }

    async fn create_workout_template(
        &self,
        name: Name,
        exercises: ExerciseList,
    ) -> Result<WorkoutTemplate, CreateError> {
        log_on_error!(
            self.repository.create_workout_template(name, exercises),
            CreateError,
            "create",
            "workout template"
        )
    }

    async fn modify_workout_template(
        &self,
        id: WorkoutTemplateID,
        name: Option<Name>,
        notes: Option<String>,
        exercises: Option<ExerciseList>,
    ) -> Result<WorkoutTemplate, UpdateError> {
        log_on_error!(
            self.repository
                .modify_workout_template(id, name, notes, exercises),
            UpdateError,
            "modify",
            "workout template"
        )
    }

    async fn delete_workout_template(
        &self,
        id: WorkoutTemplateID,
    ) -> Result<WorkoutTemplateID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout_template(id),
            DeleteError,
            "delete",
            "workout template"
        )
    }
}

impl<R: ProgramRepository> ProgramService for Service<R> {
    async fn get_programs(&self) -> Result<Vec<Program>, ReadError> {
        log_on_error!(
            self.repository.read_programs(),
            ReadError,
            "get",
            "programs"
        )
    }

    async fn create_program(
        &self,
        name: Name,
        description: String,
        templates: Vec<WorkoutTemplateID>,
    ) -> Result<Program, CreateError> {
        log_on_error!(
            self.repository.create_program(name, description, templates),
            CreateError,
            "create",
            "program"
        )
    }

    async fn modify_program(
        &self,
        id: ProgramID,
        name: Option<Name>,
        description: Option<String>,
        templates: Option<Vec<WorkoutTemplateID>>,
    ) -> Result<Program, UpdateError> {
        log_on_error!(
            self.repository
                .modify_program(id, name, description, templates),
            UpdateError,
            "modify",
            "program"
        )
    }

    async fn delete_program(&self, id: ProgramID) -> Result<ProgramID, DeleteError> {
        log_on_error!(
            self.repository.delete_program(id),
            DeleteError,
            "delete",
            "program"
        )
    }
}

impl<R: GymRepository> GymService for Service<R> {
    async fn get_gyms(&self) -> Result<Vec<Gym>, ReadError> {
        log_on_error!(self.repository.read_gyms(), ReadError, "get", "gyms")
    }

    async fn create_gym(&self, name: Name, location: Option<String>) -> Result<Gym, CreateError> {
        log_on_error!(
            self.repository.create_gym(name, location),
            CreateError,
            "create",
            "gym"
        )
    }

    async fn replace_gym(&self, gym: Gym) -> Result<Gym, UpdateError> {
        log_on_error!(
            self.repository.replace_gym(gym),
            UpdateError,
            "replace",
            "gym"
        )
    }

    async fn delete_gym(&self, id: GymID) -> Result<GymID, DeleteError> {
        log_on_error!(
            self.repository.delete_gym(id),
            DeleteError,
            "delete",
            "gym"
        )
    }
}
