//! REST
//!
//! The server is the only data source. Exercises are sent and received as a whole; superset
//! partners are referenced by position on the wire and by ID in the domain.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use gloo_net::http::{Request, Response};
use gymbook_domain as domain;
use log::warn;
use serde_json::{Map, json};
use uuid::Uuid;

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error>;
}

#[derive(Clone)]
pub struct GlooNetSendRequest;

impl SendRequest for GlooNetSendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error> {
        request.send().await
    }
}

#[derive(Clone)]
pub struct REST<S: SendRequest> {
    pub sender: S,
}

impl REST<GlooNetSendRequest> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sender: GlooNetSendRequest,
        }
    }
}

impl Default for REST<GlooNetSendRequest> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SendRequest> REST<S> {
    async fn fetch<T>(&self, request: Result<Request, gloo_net::Error>) -> Result<T, RESTError>
    where
        T: 'static + for<'de> serde::Deserialize<'de>,
    {
        let response = self.send(request?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn fetch_no_content<T>(
        &self,
        request: Result<Request, gloo_net::Error>,
        result: T,
    ) -> Result<T, RESTError> {
        self.send(request?).await?;
        Ok(result)
    }

    async fn send(&self, request: Request) -> Result<Response, RESTError> {
        let Ok(response) = self.sender.send_request(request).await else {
            return Err(RESTError::NoConnection);
        };
        if response.ok() {
            return Ok(response);
        }
        Err(match response.status() {
            401 => RESTError::NoSession,
            404 => RESTError::NotFound,
            409 => RESTError::Conflict,
            status => RESTError::Status(status, response.status_text()),
        })
    }
}

impl<S: SendRequest> domain::WorkoutLogRepository for REST<S> {
    async fn read_workout_logs(&self) -> Result<Vec<domain::WorkoutLog>, domain::ReadError> {
        let logs: Vec<WorkoutLog> = self
            .fetch(Request::get("api/workout_logs").build())
            .await?;
        Ok(logs
            .into_iter()
            .map(domain::WorkoutLog::try_from)
            .collect::<Result<_, _>>()
            .map_err(RESTError::from)?)
    }

    async fn create_workout_log(
        &self,
        name: domain::Name,
        date: NaiveDate,
        gym_id: Option<domain::GymID>,
        exercises: domain::ExerciseList,
    ) -> Result<domain::WorkoutLog, domain::CreateError> {
        let log: WorkoutLog = self
            .fetch(Request::post("api/workout_logs").json(&json!({
                "name": name.to_string(),
                "date": date,
                "gym_id": gym_id.map(|id| *id),
                "notes": "",
                "exercises": Exercises::from(&exercises),
            })))
            .await?;
        Ok(domain::WorkoutLog::try_from(log).map_err(RESTError::from)?)
    }

    async fn modify_workout_log(
        &self,
        id: domain::WorkoutLogID,
        name: Option<domain::Name>,
        notes: Option<String>,
        exercises: Option<domain::ExerciseList>,
    ) -> Result<domain::WorkoutLog, domain::UpdateError> {
        let mut content = Map::new();
        if let Some(name) = name {
            content.insert("name".into(), json!(name.to_string()));
        }
        if let Some(notes) = notes {
            content.insert("notes".into(), json!(notes));
        }
        if let Some(exercises) = exercises {
            content.insert("exercises".into(), json!(Exercises::from(&exercises)));
        }
        let log: WorkoutLog = self
            .fetch(Request::patch(&format!("api/workout_logs/{}", *id)).json(&content))
            .await?;
        Ok(domain::WorkoutLog::try_from(log).map_err(RESTError::from)?)
    }

    async fn delete_workout_log(
        &self,
        id: domain::WorkoutLogID,
    ) -> Result<domain::WorkoutLogID, domain::DeleteError> {
        Ok(self
            .fetch_no_content(
                Request::delete(&format!("api/workout_logs/{}", *id)).build(),
                id,
            )
            .await?)
    }
}

impl<S: SendRequest> domain::WorkoutTemplateRepository for REST<S> {
    async fn read_workout_templates(
        &self,
    ) -> Result<Vec<domain::WorkoutTemplate>, domain::ReadError> {
        let templates: Vec<WorkoutTemplate> = self
            .fetch(Request::get("api/workout_templates").build())
            .await?;
        Ok(templates
            .into_iter()
            .map(domain::WorkoutTemplate::try_from)
            .collect::<Result<_, _>>()
            .map_err(RESTError::from)?)
    }

    async fn create_workout_template(
        &self,
        name: domain::Name,
        exercises: domain::ExerciseList,
    ) -> Result<domain::WorkoutTemplate, domain::CreateError> {
        let template: WorkoutTemplate = self
            .fetch(Request::post("api/workout_templates").json(&json!({
                "name": name.to_string(),
                "notes": "",
                "exercises": Exercises::from(&exercises),
            })))
            .await?;
        Ok(domain::WorkoutTemplate::try_from(template).map_err(RESTError::from)?)
    }

    async fn modify_workout_template(
        &self,
        id: domain::WorkoutTemplateID,
        name: Option<domain::Name>,
        notes: Option<String>,
        exercises: Option<domain::ExerciseList>,
    ) -> Result<domain::WorkoutTemplate, domain::UpdateError> {
        let mut content = Map::new();
        if let Some(name) = name {
            content.insert("name".into(), json!(name.to_string()));
        }
        if let Some(notes) = notes {
            content.insert("notes".into(), json!(notes));
        }
        if let Some(exercises) = exercises {
            content.insert("exercises".into(), json!(Exercises::from(&exercises)));
        }
        let template: WorkoutTemplate = self
            .fetch(Request::patch(&format!("api/workout_templates/{}", *id)).json(&content))
            .await?;
        Ok(domain::WorkoutTemplate::try_from(template).map_err(RESTError::from)?)
    }

    async fn delete_workout_template(
        &self,
        id: domain::WorkoutTemplateID,
    ) -> Result<domain::WorkoutTemplateID, domain::DeleteError> {
        Ok(self
            .fetch_no_content(
                Request::delete(&format!("api/workout_templates/{}", *id)).build(),
                id,
            )
            .await?)
    }
}

impl<S: SendRequest> domain::ProgramRepository for REST<S> {
    async fn read_programs(&self) -> Result<Vec<domain::Program>, domain::ReadError> {
        let programs: Vec<Program> = self.fetch(Request::get("api/programs").build()).await?;
        Ok(programs
            .into_iter()
            .map(domain::Program::try_from)
            .collect::<Result<_, _>>()
            .map_err(RESTError::from)?)
    }

    async fn create_program(
        &self,
        name: domain::Name,
        description: String,
        templates: Vec<domain::WorkoutTemplateID>,
    ) -> Result<domain::Program, domain::CreateError> {
        let program: Program = self
            .fetch(Request::post("api/programs").json(&json!({
                "name": name.to_string(),
                "description": description,
                "templates": templates.iter().map(|id| **id).collect::<Vec<Uuid>>(),
            })))
            .await?;
        Ok(domain::Program::try_from(program).map_err(RESTError::from)?)
    }

    async fn modify_program(
        &self,
        id: domain::ProgramID,
        name: Option<domain::Name>,
        description: Option<String>,
        templates: Option<Vec<domain::WorkoutTemplateID>>,
    ) -> Result<domain::Program, domain::UpdateError> {
        let mut content = Map::new();
        if let Some(name) = name {
            content.insert("name".into(), json!(name.to_string()));
        }
        if let Some(description) = description {
            content.insert("description".into(), json!(description));
        }
        if let Some(templates) = templates {
            content.insert(
                "templates".into(),
                json!(templates.iter().map(|id| **id).collect::<Vec<Uuid>>()),
            );
        }
        let program: Program = self
            .fetch(Request::patch(&format!("api/programs/{}", *id)).json(&content))
            .await?;
        Ok(domain::Program::try_from(program).map_err(RESTError::from)?)
    }

    async fn delete_program(
        &self,
        id: domain::ProgramID,
    ) -> Result<domain::ProgramID, domain::DeleteError> {
        Ok(self
            .fetch_no_content(Request::delete(&format!("api/programs/{}", *id)).build(), id)
            .await?)
    }
}

impl<S: SendRequest> domain::GymRepository for REST<S> {
    async fn read_gyms(&self) -> Result<Vec<domain::Gym>, domain::ReadError> {
        let gyms: Vec<Gym> = self.fetch(Request::get("api/gyms").build()).await?;
        Ok(gyms
            .into_iter()
            .map(domain::Gym::try_from)
            .collect::<Result<_, _>>()
            .map_err(RESTError::from)?)
    }

    async fn create_gym(
        &self,
        name: domain::Name,
        location: Option<String>,
    ) -> Result<domain::Gym, domain::CreateError> {
        let gym: Gym = self
            .fetch(Request::post("api/gyms").json(&json!({
                "name": name.to_string(),
                "location": location,
            })))
            .await?;
        Ok(domain::Gym::try_from(gym).map_err(RESTError::from)?)
    }

    async fn replace_gym(&self, gym: domain::Gym) -> Result<domain::Gym, domain::UpdateError> {
        let gym: Gym = self
            .fetch(Request::put(&format!("api/gyms/{}", *gym.id)).json(&json!({
                "name": gym.name.to_string(),
                "location": gym.location,
            })))
            .await?;
        Ok(domain::Gym::try_from(gym).map_err(RESTError::from)?)
    }

    async fn delete_gym(&self, id: domain::GymID) -> Result<domain::GymID, domain::DeleteError> {
        Ok(self
            .fetch_no_content(Request::delete(&format!("api/gyms/{}", *id)).build(), id)
            .await?)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum RESTError {
    #[error("no connection")]
    NoConnection,
    #[error("no session")]
    NoSession,
    #[error("not found")]
    NotFound,
    #[error("conflict")]
    Conflict,
    #[error("{0} {1}")]
    Status(u16, String),
    #[error(transparent)]
    GlooNet(#[from] gloo_net::Error),
    #[error(transparent)]
    InvalidData(#[from] DataError),
}

impl From<RESTError> for domain::ReadError {
    fn from(value: RESTError) -> Self {
        match value {
            RESTError::NoConnection => domain::StorageError::NoConnection.into(),
            RESTError::NoSession => domain::StorageError::NoSession.into(),
            RESTError::NotFound => domain::ReadError::NotFound,
            err => domain::ReadError::Other(Box::new(err)),
        }
    }
}

impl From<RESTError> for domain::CreateError {
    fn from(value: RESTError) -> Self {
        match value {
            RESTError::NoConnection => domain::StorageError::NoConnection.into(),
            RESTError::NoSession => domain::StorageError::NoSession.into(),
            RESTError::Conflict => domain::CreateError::Conflict,
            err => domain::CreateError::Other(Box::new(err)),
        }
    }
}

impl From<RESTError> for domain::UpdateError {
    fn from(value: RESTError) -> Self {
        match value {
            RESTError::NoConnection => domain::StorageError::NoConnection.into(),
            RESTError::NoSession => domain::StorageError::NoSession.into(),
            RESTError::NotFound => domain::UpdateError::NotFound,
            RESTError::Conflict => domain::UpdateError::Conflict,
            err => domain::UpdateError::Other(Box::new(err)),
        }
    }
}

impl From<RESTError> for domain::DeleteError {
    fn from(value: RESTError) -> Self {
        match value {
            RESTError::NoConnection => domain::StorageError::NoConnection.into(),
            RESTError::NoSession => domain::StorageError::NoSession.into(),
            RESTError::NotFound => domain::DeleteError::NotFound,
            err => domain::DeleteError::Other(Box::new(err)),
        }
    }
}

/// Server data that cannot be represented in the domain.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DataError {
    #[error(transparent)]
    InvalidName(#[from] domain::NameError),
    #[error(transparent)]
    InvalidReps(#[from] domain::RepsError),
    #[error(transparent)]
    InvalidSeconds(#[from] domain::SecondsError),
    #[error(transparent)]
    InvalidDistance(#[from] domain::DistanceError),
    #[error(transparent)]
    InvalidWeight(#[from] domain::WeightError),
    #[error("invalid {0}: {1}")]
    InvalidVariant(&'static str, String),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutLog {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub gym_id: Option<Uuid>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub exercises: Exercises,
}

impl From<&domain::WorkoutLog> for WorkoutLog {
    fn from(value: &domain::WorkoutLog) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            date: value.date,
            gym_id: value.gym_id.map(|id| *id),
            notes: value.notes.clone(),
            exercises: Exercises::from(&value.exercises),
        }
    }
}

impl TryFrom<WorkoutLog> for domain::WorkoutLog {
    type Error = DataError;

    fn try_from(value: WorkoutLog) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            date: value.date,
            gym_id: value.gym_id.map(domain::GymID::from),
            notes: value.notes,
            exercises: value.exercises.try_into()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutTemplate {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub exercises: Exercises,
}

impl From<&domain::WorkoutTemplate> for WorkoutTemplate {
    fn from(value: &domain::WorkoutTemplate) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            notes: value.notes.clone(),
            exercises: Exercises::from(&value.exercises),
        }
    }
}

impl TryFrom<WorkoutTemplate> for domain::WorkoutTemplate {
    type Error = DataError;

    fn try_from(value: WorkoutTemplate) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            notes: value.notes,
            exercises: value.exercises.try_into()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub templates: Vec<Uuid>,
}

impl From<&domain::Program> for Program {
    fn from(value: &domain::Program) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            description: value.description.clone(),
            templates: value.templates.iter().map(|id| **id).collect(),
        }
    }
}

impl TryFrom<Program> for domain::Program {
    type Error = DataError;

    fn try_from(value: Program) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            description: value.description,
            templates: value
                .templates
                .into_iter()
                .map(domain::WorkoutTemplateID::from)
                .collect(),
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Gym {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
}

impl From<&domain::Gym> for Gym {
    fn from(value: &domain::Gym) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            location: value.location.clone(),
        }
    }
}

impl TryFrom<Gym> for domain::Gym {
    type Error = DataError;

    fn try_from(value: Gym) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            location: value.location,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(transparent)]
pub struct Exercises(pub Vec<Exercise>);

impl From<&domain::ExerciseList> for Exercises {
    fn from(value: &domain::ExerciseList) -> Self {
        Self(
            value
                .iter()
                .map(|exercise| Exercise {
                    id: *exercise.id,
                    name: exercise.name.to_string(),
                    equipment: exercise.equipment.clone(),
                    notes: exercise.notes.clone(),
                    effort_type: exercise.effort_type.to_string(),
                    order: exercise.order,
                    is_superset: exercise.is_superset(),
                    superset_with: exercise
                        .superset_with()
                        .and_then(|partner| value.get_by_id(partner))
                        .map(|partner| partner.order),
                    superset_rest_time: exercise.superset_rest_time().map(u32::from),
                    sets: exercise.sets.iter().map(Set::from).collect(),
                })
                .collect(),
        )
    }
}

impl TryFrom<Exercises> for domain::ExerciseList {
    type Error = DataError;

    /// Resolves positional partner references to IDs. References to a missing position or to
    /// the exercise itself are dropped.
    fn try_from(value: Exercises) -> Result<Self, Self::Error> {
        let mut exercises = value.0;
        exercises.sort_by_key(|e| e.order);

        let mut ids = BTreeMap::new();
        for exercise in &exercises {
            ids.entry(exercise.order).or_insert(exercise.id);
        }

        let exercises = exercises
            .into_iter()
            .map(|exercise| {
                let partner = exercise
                    .superset_with
                    .filter(|_| exercise.is_superset)
                    .and_then(|order| match ids.get(&order) {
                        Some(id) if *id != exercise.id => Some(*id),
                        _ => {
                            warn!(
                                "dropping invalid superset reference of exercise {}",
                                exercise.id
                            );
                            None
                        }
                    });
                exercise.into_domain(partner)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(domain::ExerciseList::new(exercises))
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub equipment: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub effort_type: String,
    pub order: u32,
    #[serde(default)]
    pub is_superset: bool,
    #[serde(default)]
    pub superset_with: Option<u32>,
    #[serde(default)]
    pub superset_rest_time: Option<u32>,
    #[serde(default)]
    pub sets: Vec<Set>,
}

impl Exercise {
    fn into_domain(self, partner: Option<Uuid>) -> Result<domain::Exercise, DataError> {
        let effort_type = self
            .effort_type
            .parse::<domain::EffortType>()
            .map_err(|_| DataError::InvalidVariant("effort type", self.effort_type.clone()))?;
        let superset = match partner {
            Some(partner) => Some(domain::Superset {
                partner: partner.into(),
                rest_time: self
                    .superset_rest_time
                    .map(domain::Seconds::new)
                    .transpose()?
                    .unwrap_or(domain::Seconds::DEFAULT_SUPERSET_REST),
            }),
            None => None,
        };
        let mut sets = self.sets;
        sets.sort_by_key(|s| s.order);
        Ok(domain::Exercise {
            id: self.id.into(),
            name: domain::Name::new(&self.name)?,
            equipment: self.equipment,
            notes: self.notes,
            effort_type,
            order: self.order,
            superset,
            sets: sets
                .into_iter()
                .map(|set| set.into_domain(effort_type))
                .collect::<Result<_, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Set {
    pub id: Uuid,
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl From<&domain::Set> for Set {
    fn from(value: &domain::Set) -> Self {
        let mut set = Self {
            id: *value.id,
            order: value.order,
            reps: None,
            weight: None,
            weight_unit: None,
            duration: None,
            distance: None,
            rest_time: Some(u32::from(value.rest_time)),
            notes: value.notes.clone(),
            completed: value.completed,
        };
        match value.metrics {
            domain::SetMetrics::Reps {
                reps,
                weight,
                weight_unit,
            } => {
                set.reps = Some(u32::from(reps));
                set.weight = Some(f32::from(weight));
                set.weight_unit = Some(weight_unit.to_string());
            }
            domain::SetMetrics::Time {
                duration,
                weight,
                weight_unit,
            } => {
                set.duration = Some(u32::from(duration));
                set.weight = Some(f32::from(weight));
                set.weight_unit = Some(weight_unit.to_string());
            }
            domain::SetMetrics::Distance { distance, duration } => {
                set.distance = Some(u32::from(distance));
                set.duration = Some(u32::from(duration));
            }
        }
        set
    }
}

impl Set {
    /// Missing fields keep the defaults of the effort type. Fields the effort type does not
    /// have are ignored.
    fn into_domain(self, effort_type: domain::EffortType) -> Result<domain::Set, DataError> {
        let mut fields = vec![];
        if let Some(reps) = self.reps {
            fields.push(domain::SetField::Reps(domain::Reps::new(reps)?));
        }
        if let Some(weight) = self.weight {
            fields.push(domain::SetField::Weight(domain::Weight::new(weight)?));
        }
        if let Some(weight_unit) = self.weight_unit {
            fields.push(domain::SetField::WeightUnit(
                weight_unit
                    .parse()
                    .map_err(|_| DataError::InvalidVariant("weight unit", weight_unit))?,
            ));
        }
        if let Some(duration) = self.duration {
            fields.push(domain::SetField::Duration(domain::Seconds::new(duration)?));
        }
        if let Some(distance) = self.distance {
            fields.push(domain::SetField::Distance(domain::Distance::new(distance)?));
        }

        let mut set = domain::Set {
            id: self.id.into(),
            order: self.order,
            metrics: domain::SetMetrics::default_for(effort_type),
            rest_time: self
                .rest_time
                .map(domain::Seconds::new)
                .transpose()?
                .unwrap_or(domain::Seconds::DEFAULT_REST),
            notes: self.notes,
            completed: self.completed,
        };
        for field in fields {
            if let Err(err) = set.update(field) {
                warn!("ignoring field of set {}: {err}", self.id);
            }
        }
        Ok(set)
    }
}
