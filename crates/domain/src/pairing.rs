use crate::{DraftError, ExerciseID};

/// Whether the user is choosing a partner for a new superset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PairingMode {
    #[default]
    Idle,
    AwaitingTarget(ExerciseID),
}

impl PairingMode {
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, PairingMode::AwaitingTarget(_))
    }

    #[must_use]
    pub fn source(&self) -> Option<ExerciseID> {
        match self {
            PairingMode::Idle => None,
            PairingMode::AwaitingTarget(source) => Some(*source),
        }
    }

    pub fn start(&mut self, source: ExerciseID) -> Result<(), DraftError> {
        if self.is_active() {
            return Err(DraftError::PairingInProgress);
        }
        *self = PairingMode::AwaitingTarget(source);
        Ok(())
    }

    pub fn cancel(&mut self) {
        *self = PairingMode::Idle;
    }
}
