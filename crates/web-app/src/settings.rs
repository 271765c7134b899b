use gymbook_domain::{
    Draft, DraftError, EffortType, Exercise, ExerciseID, NewExercise, Seconds, SetField,
    WeightUnit,
};
use serde::{Deserialize, Serialize};

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, String>;
    async fn set_settings(&self, settings: Settings) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, String>;
    async fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    #[serde(with = "WeightUnitDef")]
    pub default_weight_unit: WeightUnit,
    pub superset_rest_time: u32,
    pub confirm_deletions: bool,
}

impl Settings {
    /// Rest time for new supersets. Out of range values fall back to the default.
    #[must_use]
    pub fn superset_rest_time(&self) -> Seconds {
        Seconds::new(self.superset_rest_time).unwrap_or(Seconds::DEFAULT_SUPERSET_REST)
    }

    /// Adds an exercise whose first set is weighed in the default weight unit.
    pub fn add_exercise(
        &self,
        draft: &mut Draft,
        selection: NewExercise,
        effort_type: EffortType,
    ) -> Result<ExerciseID, DraftError> {
        let id = draft.add_exercise(selection, effort_type)?;
        if matches!(effort_type, EffortType::Reps | EffortType::Time) {
            if let Some(index) = draft.exercises().position(id) {
                draft.update_set(index, 0, SetField::WeightUnit(self.default_weight_unit))?;
            }
        }
        Ok(id)
    }

    /// Deletes an exercise, asking `confirm` only if confirmations are enabled.
    pub fn delete_exercise(
        &self,
        draft: &mut Draft,
        index: usize,
        confirm: impl FnOnce(&Exercise) -> bool,
    ) -> Result<Option<Exercise>, DraftError> {
        if self.confirm_deletions {
            draft.delete_exercise(index, confirm)
        } else {
            draft.delete_exercise(index, |_| true)
        }
    }

    pub fn complete_pairing(&self, draft: &mut Draft, target: usize) -> Result<(), DraftError> {
        draft.complete_pairing(target, self.superset_rest_time())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_weight_unit: WeightUnit::Kg,
            superset_rest_time: u32::from(Seconds::DEFAULT_SUPERSET_REST),
            confirm_deletions: true,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "WeightUnit", rename_all = "lowercase")]
enum WeightUnitDef {
    Kg,
    Lbs,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use gymbook_domain::Name;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_settings_deserialization_defaults() {
        assert_eq!(
            serde_json::from_value::<Settings>(json!({ "default_weight_unit": "lbs" })).unwrap(),
            Settings {
                default_weight_unit: WeightUnit::Lbs,
                ..Settings::default()
            }
        );
        assert_eq!(
            serde_json::from_value::<Settings>(json!({})).unwrap(),
            Settings::default()
        );
    }

    #[test]
    fn test_settings_serialization() {
        assert_eq!(
            serde_json::to_value(Settings::default()).unwrap(),
            json!({
                "default_weight_unit": "kg",
                "superset_rest_time": 90,
                "confirm_deletions": true
            })
        );
    }

    #[rstest]
    #[case(WeightUnit::Kg, EffortType::Reps)]
    #[case(WeightUnit::Lbs, EffortType::Reps)]
    #[case(WeightUnit::Lbs, EffortType::Time)]
    fn test_settings_add_exercise_uses_default_weight_unit(
        #[case] unit: WeightUnit,
        #[case] effort_type: EffortType,
    ) {
        let settings = Settings {
            default_weight_unit: unit,
            ..Settings::default()
        };
        let mut draft = Draft::default();

        let id = settings
            .add_exercise(&mut draft, new_exercise("Squat"), effort_type)
            .unwrap();

        let exercise = draft.exercises().get(0).unwrap();
        assert_eq!(exercise.id, id);
        assert_eq!(
            exercise.sets[0].metrics.weight().map(|(_, unit)| unit),
            Some(unit)
        );
    }

    #[test]
    fn test_settings_add_exercise_distance() {
        let settings = Settings {
            default_weight_unit: WeightUnit::Lbs,
            ..Settings::default()
        };
        let mut draft = Draft::default();

        settings
            .add_exercise(&mut draft, new_exercise("Run"), EffortType::Distance)
            .unwrap();

        assert_eq!(draft.exercises().get(0).unwrap().sets[0].metrics.weight(), None);
    }

    #[rstest]
    #[case(true, 1)]
    #[case(false, 0)]
    fn test_settings_delete_exercise(#[case] confirm_deletions: bool, #[case] expected_len: usize) {
        let settings = Settings {
            confirm_deletions,
            ..Settings::default()
        };
        let mut draft = Draft::default();
        settings
            .add_exercise(&mut draft, new_exercise("Squat"), EffortType::Reps)
            .unwrap();

        settings.delete_exercise(&mut draft, 0, |_| false).unwrap();

        assert_eq!(draft.exercises().len(), expected_len);
    }

    #[test]
    fn test_settings_complete_pairing_uses_superset_rest_time() {
        let settings = Settings {
            superset_rest_time: 45,
            ..Settings::default()
        };
        let mut draft = Draft::default();
        for name in ["Curl", "Dip"] {
            settings
                .add_exercise(&mut draft, new_exercise(name), EffortType::Reps)
                .unwrap();
        }
        draft.start_pairing(0).unwrap();

        settings.complete_pairing(&mut draft, 1).unwrap();

        assert_eq!(
            draft.exercises().get(1).unwrap().superset_rest_time(),
            Some(Seconds::new(45).unwrap())
        );
    }

    fn new_exercise(name: &str) -> NewExercise {
        Name::new(name).unwrap().into()
    }

    #[rstest]
    #[case(45, Seconds::new(45).unwrap())]
    #[case(100_000, Seconds::DEFAULT_SUPERSET_REST)]
    fn test_settings_superset_rest_time(#[case] value: u32, #[case] expected: Seconds) {
        let settings = Settings {
            superset_rest_time: value,
            ..Settings::default()
        };
        assert_eq!(settings.superset_rest_time(), expected);
    }
}
