use chrono::Duration;
use derive_more::Deref;
use uuid::Uuid;

use crate::{Distance, DraftError, EffortType, Reps, Seconds, Weight, WeightUnit};

#[derive(Debug, Clone, PartialEq)]
pub struct Set {
    pub id: SetID,
    pub order: u32,
    pub metrics: SetMetrics,
    pub rest_time: Seconds,
    pub notes: Option<String>,
    pub completed: bool,
}

impl Set {
    /// Creates a set with the defaults of the given effort type.
    #[must_use]
    pub fn new(effort_type: EffortType) -> Self {
        Self {
            id: SetID::random(),
            order: 0,
            metrics: SetMetrics::default_for(effort_type),
            rest_time: Seconds::DEFAULT_REST,
            notes: None,
            completed: false,
        }
    }

    /// Creates a new set that repeats this one under a fresh ID.
    #[must_use]
    pub fn repeat(&self) -> Self {
        Self {
            id: SetID::random(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn effort_type(&self) -> EffortType {
        self.metrics.effort_type()
    }

    /// Re-derives the set for another effort type. Rest time is always kept, weight and unit
    /// are kept if both effort types have them.
    #[must_use]
    pub fn convert(&self, effort_type: EffortType) -> Self {
        let mut metrics = SetMetrics::default_for(effort_type);
        if let Some((old_weight, old_unit)) = self.metrics.weight() {
            match &mut metrics {
                SetMetrics::Reps {
                    weight,
                    weight_unit,
                    ..
                }
                | SetMetrics::Time {
                    weight,
                    weight_unit,
                    ..
                } => {
                    *weight = old_weight;
                    *weight_unit = old_unit;
                }
                SetMetrics::Distance { .. } => {}
            }
        }
        Self {
            metrics,
            ..self.clone()
        }
    }

    /// Sets a single field. Fields that do not exist for the set's effort type are rejected
    /// without changing the set.
    pub fn update(&mut self, field: SetField) -> Result<(), DraftError> {
        let effort_type = self.effort_type();
        let not_applicable = DraftError::FieldNotApplicable {
            field: field.name(),
            effort_type,
        };
        match (field, &mut self.metrics) {
            (SetField::Reps(value), SetMetrics::Reps { reps, .. }) => *reps = value,
            (
                SetField::Weight(value),
                SetMetrics::Reps { weight, .. } | SetMetrics::Time { weight, .. },
            ) => *weight = value,
            (
                SetField::WeightUnit(value),
                SetMetrics::Reps { weight_unit, .. } | SetMetrics::Time { weight_unit, .. },
            ) => *weight_unit = value,
            (
                SetField::Duration(value),
                SetMetrics::Time { duration, .. } | SetMetrics::Distance { duration, .. },
            ) => *duration = value,
            (SetField::Distance(value), SetMetrics::Distance { distance, .. }) => {
                *distance = value;
            }
            (SetField::RestTime(value), _) => self.rest_time = value,
            (SetField::Notes(value), _) => self.notes = value,
            (SetField::Completed(value), _) => self.completed = value,
            _ => return Err(not_applicable),
        }
        Ok(())
    }

    /// Estimated time of the set including the following rest.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::seconds(i64::from(self.metrics.work_time()) + i64::from(self.rest_time))
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetID(Uuid);

impl SetID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for SetID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SetID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetMetrics {
    Reps {
        reps: Reps,
        weight: Weight,
        weight_unit: WeightUnit,
    },
    Time {
        duration: Seconds,
        weight: Weight,
        weight_unit: WeightUnit,
    },
    Distance {
        distance: Distance,
        duration: Seconds,
    },
}

impl SetMetrics {
    const SECONDS_PER_REP: Seconds = Seconds(4);

    #[must_use]
    pub fn default_for(effort_type: EffortType) -> Self {
        match effort_type {
            EffortType::Reps => SetMetrics::Reps {
                reps: Reps(10),
                weight: Weight(0.0),
                weight_unit: WeightUnit::Kg,
            },
            EffortType::Time => SetMetrics::Time {
                duration: Seconds(30),
                weight: Weight(0.0),
                weight_unit: WeightUnit::Kg,
            },
            EffortType::Distance => SetMetrics::Distance {
                distance: Distance(1000),
                duration: Seconds(300),
            },
        }
    }

    #[must_use]
    pub fn effort_type(&self) -> EffortType {
        match self {
            SetMetrics::Reps { .. } => EffortType::Reps,
            SetMetrics::Time { .. } => EffortType::Time,
            SetMetrics::Distance { .. } => EffortType::Distance,
        }
    }

    #[must_use]
    pub fn weight(&self) -> Option<(Weight, WeightUnit)> {
        match self {
            SetMetrics::Reps {
                weight,
                weight_unit,
                ..
            }
            | SetMetrics::Time {
                weight,
                weight_unit,
                ..
            } => Some((*weight, *weight_unit)),
            SetMetrics::Distance { .. } => None,
        }
    }

    #[must_use]
    pub fn reps(&self) -> Option<Reps> {
        match self {
            SetMetrics::Reps { reps, .. } => Some(*reps),
            SetMetrics::Time { .. } | SetMetrics::Distance { .. } => None,
        }
    }

    /// Time under load, with a fixed tempo assumed for repetitions.
    #[must_use]
    pub fn work_time(&self) -> Seconds {
        match self {
            SetMetrics::Reps { reps, .. } => *reps * Self::SECONDS_PER_REP,
            SetMetrics::Time { duration, .. } | SetMetrics::Distance { duration, .. } => {
                *duration
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum SetField {
    Reps(Reps),
    Weight(Weight),
    WeightUnit(WeightUnit),
    Duration(Seconds),
    Distance(Distance),
    RestTime(Seconds),
    Notes(Option<String>),
    Completed(bool),
}

impl SetField {
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.into()
    }
}
