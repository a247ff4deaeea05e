use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{null_as_default, RecordId};

/// Spanish weekday name for a routine day number (1 = Monday)
pub fn day_name(day_number: u8) -> Option<&'static str> {
    const NAMES: [&str; 7] = [
        "Lunes",
        "Martes",
        "Miércoles",
        "Jueves",
        "Viernes",
        "Sábado",
        "Domingo",
    ];
    NAMES.get(usize::from(day_number).checked_sub(1)?).copied()
}

/// Stored routine as returned by `/api/rutinas`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub days_per_week: Option<u8>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub routine_days: Vec<RoutineDay>,
}

impl Routine {
    /// Day by number, or the first day when `day_number` is absent or unknown
    pub fn select_day(&self, day_number: Option<u8>) -> Option<&RoutineDay> {
        day_number
            .and_then(|n| self.routine_days.iter().find(|d| d.day_number == n))
            .or_else(|| self.routine_days.first())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineDay {
    pub day_number: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub routine_exercises: Vec<RoutineExercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineExercise {
    pub exercise_id: RecordId,
    #[serde(default)]
    pub sets: Option<u32>,
    #[serde(default)]
    pub reps: Option<u32>,
    #[serde(default)]
    pub target_weight: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub exercise: Option<ExerciseRef>,
}

/// Joined exercise columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

/// Routine proposed by the coach, posted back verbatim when accepted.
/// Fields the client does not render are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedRoutine {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub days: Vec<DraftDay>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GeneratedRoutine {
    pub fn day(&self, day_number: u8) -> Option<&DraftDay> {
        self.days.iter().find(|d| d.day_number == day_number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftDay {
    pub day_number: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exercises: Vec<DraftExercise>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftExercise {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_day_names() {
        assert_eq!(day_name(1), Some("Lunes"));
        assert_eq!(day_name(7), Some("Domingo"));
        assert_eq!(day_name(0), None);
        assert_eq!(day_name(8), None);
    }

    #[test]
    fn test_select_day_falls_back_to_first() {
        let routine: Routine = serde_json::from_value(json!({
            "id": 3,
            "name": "Torso/Pierna",
            "routine_days": [
                { "day_number": 1, "name": "Torso", "routine_exercises": [] },
                { "day_number": 4, "name": "Pierna", "routine_exercises": null }
            ]
        }))
        .unwrap();

        assert_eq!(routine.select_day(Some(4)).unwrap().name, "Pierna");
        assert_eq!(routine.select_day(Some(6)).unwrap().name, "Torso");
        assert_eq!(routine.select_day(None).unwrap().name, "Torso");
    }

    #[test]
    fn test_generated_routine_keeps_unknown_fields() {
        let raw = json!({
            "name": "Fuerza 3D",
            "goal": "Fuerza",
            "days_per_week": 3,
            "days": [{
                "day_number": 1,
                "name": "Empuje",
                "exercises": [{ "name": "Press Militar", "sets": 4, "reps": "6-8", "rest": 120 }]
            }]
        });

        let routine: GeneratedRoutine = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(routine.day(1).unwrap().exercises[0].name, "Press Militar");
        assert_eq!(serde_json::to_value(&routine).unwrap(), raw);
    }
}
