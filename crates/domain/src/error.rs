use crate::EffortType;

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error("conflict")]
    Conflict,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<UpdateError> for CreateError {
    fn from(value: UpdateError) -> Self {
        match value {
            UpdateError::Conflict => CreateError::Conflict,
            UpdateError::NotFound => CreateError::Other("not found".into()),
            UpdateError::Storage(storage) => CreateError::Storage(storage),
            UpdateError::Other(other) => CreateError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    #[error("conflict")]
    Conflict,
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("no connection")]
    NoConnection,
    #[error("no session")]
    NoSession,
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

/// Rejected edit of a draft. A draft operation that returns one of these has not changed
/// the draft.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("No exercise at position {0}")]
    ExerciseIndexOutOfRange(usize),
    #[error("Exercise at position {exercise} has no set at position {set}")]
    SetIndexOutOfRange { exercise: usize, set: usize },
    #[error("An exercise must have at least one set")]
    LastSet,
    #[error("An exercise cannot be paired with itself")]
    SelfPairing,
    #[error("Finish or cancel the current superset pairing first")]
    PairingInProgress,
    #[error("No superset pairing in progress")]
    NotPairing,
    #[error("Sets of {effort_type} exercises have no {field}")]
    FieldNotApplicable {
        field: &'static str,
        effort_type: EffortType,
    },
    #[error("Saving is already in progress")]
    SaveInProgress,
}

#[derive(thiserror::Error, Debug)]
pub enum SaveError {
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error(transparent)]
    Update(#[from] UpdateError),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_create_error_from_update_error() {
        assert!(matches!(
            CreateError::from(UpdateError::Conflict),
            CreateError::Conflict
        ));
        assert!(matches!(
            CreateError::from(UpdateError::Storage(StorageError::NoSession)),
            CreateError::Storage(StorageError::NoSession)
        ));
        assert!(matches!(
            CreateError::from(UpdateError::Other("foo".into())),
            CreateError::Other(error) if error.to_string() == "foo"
        ));
    }

    #[test]
    fn test_draft_error_display() {
        assert_eq!(
            DraftError::FieldNotApplicable {
                field: "weight",
                effort_type: EffortType::Distance
            }
            .to_string(),
            "Sets of distance exercises have no weight"
        );
        assert_eq!(
            DraftError::SetIndexOutOfRange {
                exercise: 1,
                set: 3
            }
            .to_string(),
            "Exercise at position 1 has no set at position 3"
        );
    }

    #[test]
    fn test_save_error_from_update_error() {
        assert!(matches!(
            SaveError::from(UpdateError::Storage(StorageError::NoConnection)),
            SaveError::Update(UpdateError::Storage(StorageError::NoConnection))
        ));
    }
}
