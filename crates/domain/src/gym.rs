use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, DeleteError, Name, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait GymService {
    async fn get_gyms(&self) -> Result<Vec<Gym>, ReadError>;
    async fn create_gym(&self, name: Name, location: Option<String>) -> Result<Gym, CreateError>;
    async fn replace_gym(&self, gym: Gym) -> Result<Gym, UpdateError>;
    async fn delete_gym(&self, id: GymID) -> Result<GymID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait GymRepository {
    async fn read_gyms(&self) -> Result<Vec<Gym>, ReadError>;
    async fn create_gym(&self, name: Name, location: Option<String>) -> Result<Gym, CreateError>;
    async fn replace_gym(&self, gym: Gym) -> Result<Gym, UpdateError>;
    async fn delete_gym(&self, id: GymID) -> Result<GymID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gym {
    pub id: GymID,
    pub name: Name,
    pub location: Option<String>,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GymID(Uuid);

impl GymID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for GymID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for GymID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}
