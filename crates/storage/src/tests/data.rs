use chrono::NaiveDate;
use gymbook_domain as domain;
use serde_json::json;

pub static EXERCISE_LIST: std::sync::LazyLock<domain::ExerciseList> =
    std::sync::LazyLock::new(|| {
        domain::ExerciseList::new(vec![
            domain::Exercise {
                id: 1.into(),
                name: domain::Name::new("Bench Press").unwrap(),
                equipment: Some(String::from("Barbell")),
                notes: None,
                effort_type: domain::EffortType::Reps,
                order: 0,
                superset: Some(domain::Superset {
                    partner: 3.into(),
                    rest_time: domain::Seconds::new(90).unwrap(),
                }),
                sets: vec![
                    set(11, 0, reps(8, 60.0, domain::WeightUnit::Kg), 90, None, true),
                    set(
                        12,
                        1,
                        reps(6, 62.5, domain::WeightUnit::Kg),
                        90,
                        Some("last set to failure"),
                        false,
                    ),
                ],
            },
            domain::Exercise {
                id: 2.into(),
                name: domain::Name::new("Plank").unwrap(),
                equipment: None,
                notes: Some(String::from("Keep hips level")),
                effort_type: domain::EffortType::Time,
                order: 1,
                superset: None,
                sets: vec![set(
                    21,
                    0,
                    domain::SetMetrics::Time {
                        duration: domain::Seconds::new(60).unwrap(),
                        weight: domain::Weight::new(0.0).unwrap(),
                        weight_unit: domain::WeightUnit::Kg,
                    },
                    60,
                    None,
                    false,
                )],
            },
            domain::Exercise {
                id: 3.into(),
                name: domain::Name::new("Row").unwrap(),
                equipment: Some(String::from("Cable")),
                notes: None,
                effort_type: domain::EffortType::Reps,
                order: 2,
                superset: Some(domain::Superset {
                    partner: 1.into(),
                    rest_time: domain::Seconds::new(90).unwrap(),
                }),
                sets: vec![set(
                    31,
                    0,
                    reps(10, 45.5, domain::WeightUnit::Lbs),
                    90,
                    None,
                    false,
                )],
            },
        ])
    });

pub fn exercise_list_json() -> serde_json::Value {
    json!([
        {
            "id": "00000000-0000-0000-0000-000000000001",
            "name": "Bench Press",
            "equipment": "Barbell",
            "notes": null,
            "effort_type": "reps",
            "order": 0,
            "is_superset": true,
            "superset_with": 2,
            "superset_rest_time": 90,
            "sets": [
                {
                    "id": "00000000-0000-0000-0000-00000000000b",
                    "order": 0,
                    "reps": 8,
                    "weight": 60.0,
                    "weight_unit": "kg",
                    "rest_time": 90,
                    "completed": true
                },
                {
                    "id": "00000000-0000-0000-0000-00000000000c",
                    "order": 1,
                    "reps": 6,
                    "weight": 62.5,
                    "weight_unit": "kg",
                    "rest_time": 90,
                    "notes": "last set to failure",
                    "completed": false
                }
            ]
        },
        {
            "id": "00000000-0000-0000-0000-000000000002",
            "name": "Plank",
            "equipment": null,
            "notes": "Keep hips level",
            "effort_type": "time",
            "order": 1,
            "is_superset": false,
            "superset_with": null,
            "superset_rest_time": null,
            "sets": [
                {
                    "id": "00000000-0000-0000-0000-000000000015",
                    "order": 0,
                    "duration": 60,
                    "weight": 0.0,
                    "weight_unit": "kg",
                    "rest_time": 60,
                    "completed": false
                }
            ]
        },
        {
            "id": "00000000-0000-0000-0000-000000000003",
            "name": "Row",
            "equipment": "Cable",
            "notes": null,
            "effort_type": "reps",
            "order": 2,
            "is_superset": true,
            "superset_with": 0,
            "superset_rest_time": 90,
            "sets": [
                {
                    "id": "00000000-0000-0000-0000-00000000001f",
                    "order": 0,
                    "reps": 10,
                    "weight": 45.5,
                    "weight_unit": "lbs",
                    "rest_time": 90,
                    "completed": false
                }
            ]
        }
    ])
}

pub static WORKOUT_LOG: std::sync::LazyLock<domain::WorkoutLog> =
    std::sync::LazyLock::new(|| domain::WorkoutLog {
        id: 1.into(),
        name: domain::Name::new("Push Day").unwrap(),
        date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        gym_id: Some(1.into()),
        notes: String::from("Felt strong"),
        exercises: EXERCISE_LIST.clone(),
    });

pub static WORKOUT_TEMPLATE: std::sync::LazyLock<domain::WorkoutTemplate> =
    std::sync::LazyLock::new(|| domain::WorkoutTemplate {
        id: 1.into(),
        name: domain::Name::new("Push Day").unwrap(),
        notes: String::new(),
        exercises: EXERCISE_LIST.clone(),
    });

pub static PROGRAM: std::sync::LazyLock<domain::Program> =
    std::sync::LazyLock::new(|| domain::Program {
        id: 1.into(),
        name: domain::Name::new("Push Pull").unwrap(),
        description: String::from("Two day split"),
        templates: vec![1.into(), 2.into()],
    });

pub static GYM: std::sync::LazyLock<domain::Gym> = std::sync::LazyLock::new(|| domain::Gym {
    id: 1.into(),
    name: domain::Name::new("Iron Temple").unwrap(),
    location: Some(String::from("Main Street 1")),
});

fn reps(reps: u32, weight: f32, weight_unit: domain::WeightUnit) -> domain::SetMetrics {
    domain::SetMetrics::Reps {
        reps: domain::Reps::new(reps).unwrap(),
        weight: domain::Weight::new(weight).unwrap(),
        weight_unit,
    }
}

fn set(
    id: u128,
    order: u32,
    metrics: domain::SetMetrics,
    rest_time: u32,
    notes: Option<&str>,
    completed: bool,
) -> domain::Set {
    domain::Set {
        id: id.into(),
        order,
        metrics,
        rest_time: domain::Seconds::new(rest_time).unwrap(),
        notes: notes.map(String::from),
        completed,
    }
}
