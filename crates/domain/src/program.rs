use std::collections::BTreeMap;

use derive_more::Deref;
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, Name, ReadError, UpdateError, WorkoutTemplate, WorkoutTemplateID,
};

#[allow(async_fn_in_trait)]
pub trait ProgramService {
    async fn get_programs(&self) -> Result<Vec<Program>, ReadError>;
    async fn create_program(
        &self,
        name: Name,
        description: String,
        templates: Vec<WorkoutTemplateID>,
    ) -> Result<Program, CreateError>;
    async fn modify_program(
        &self,
        id: ProgramID,
        name: Option<Name>,
        description: Option<String>,
        templates: Option<Vec<WorkoutTemplateID>>,
    ) -> Result<Program, UpdateError>;
    async fn delete_program(&self, id: ProgramID) -> Result<ProgramID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait ProgramRepository {
    async fn read_programs(&self) -> Result<Vec<Program>, ReadError>;
    async fn create_program(
        &self,
        name: Name,
        description: String,
        templates: Vec<WorkoutTemplateID>,
    ) -> Result<Program, CreateError>;
    async fn modify_program(
        &self,
        id: ProgramID,
        name: Option<Name>,
        description: Option<String>,
        templates: Option<Vec<WorkoutTemplateID>>,
    ) -> Result<Program, UpdateError>;
    async fn delete_program(&self, id: ProgramID) -> Result<ProgramID, DeleteError>;
}

/// Ordered sequence of workout templates.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub id: ProgramID,
    pub name: Name,
    pub description: String,
    pub templates: Vec<WorkoutTemplateID>,
}

impl Program {
    /// Templates of the program in program order. Unknown templates are skipped.
    #[must_use]
    pub fn workout_templates<'a>(
        &self,
        templates: &'a BTreeMap<WorkoutTemplateID, WorkoutTemplate>,
    ) -> Vec<&'a WorkoutTemplate> {
        self.templates
            .iter()
            .filter_map(|id| templates.get(id))
            .collect()
    }

    /// Template following the given one, wrapping around at the end of the program.
    #[must_use]
    pub fn next_template(&self, previous: Option<WorkoutTemplateID>) -> Option<WorkoutTemplateID> {
        let next = previous
            .and_then(|previous| self.templates.iter().position(|id| *id == previous))
            .map_or(0, |position| (position + 1) % self.templates.len());
        self.templates.get(next).copied()
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProgramID(Uuid);

impl ProgramID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ProgramID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ProgramID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}
