use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{null_as_default, RecordId};

/// One performed set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetLog {
    pub reps: u32,
    pub weight: f64,
    #[serde(default)]
    pub completed: bool,
}

/// Per-exercise log inside a workout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseLog {
    pub exercise_id: RecordId,
    pub exercise_name: String,
    #[serde(default)]
    pub video_url: Option<String>,
    pub rpe: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sets: Vec<SetLog>,
}

/// Payload of `POST /api/sesiones` and `PUT /api/sesiones/:id`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewWorkoutSession {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routine_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_number: Option<u8>,
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub rating: u8,
    pub exercises: Vec<ExerciseLog>,
}

/// Session logged by hand from the history screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManualWorkout {
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub rating: u8,
}

impl ManualWorkout {
    pub fn from_parts(name: String, started_at: DateTime<Utc>, hours: u32, minutes: u32, rating: u8) -> Self {
        Self {
            name,
            started_at,
            duration_minutes: hours * 60 + minutes,
            rating,
        }
    }

    /// Duration as `(hours, minutes)` for the edit form
    pub fn split_duration(&self) -> (u32, u32) {
        (self.duration_minutes / 60, self.duration_minutes % 60)
    }
}

impl From<&WorkoutSession> for ManualWorkout {
    fn from(session: &WorkoutSession) -> Self {
        Self {
            name: session.display_name().to_string(),
            started_at: session.started_at,
            duration_minutes: session.duration().unwrap_or_default(),
            rating: session.rating.unwrap_or(5),
        }
    }
}

/// Stored workout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: RecordId,
    #[serde(default)]
    pub routine_id: Option<RecordId>,
    #[serde(default)]
    pub day_number: Option<u8>,
    #[serde(default)]
    pub name: Option<String>,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exercises: Vec<ExerciseLog>,
}

impl WorkoutSession {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Entrenamiento")
    }

    /// Stored duration, or the span between start and end
    pub fn duration(&self) -> Option<u32> {
        self.duration_minutes.or_else(|| {
            let ended = self.ended_at?;
            u32::try_from((ended - self.started_at).num_minutes()).ok()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_session_row() {
        let session: WorkoutSession = serde_json::from_value(json!({
            "id": "9a1e",
            "started_at": "2026-03-02T18:00:00Z",
            "ended_at": "2026-03-02T19:05:00Z",
            "exercises": null
        }))
        .unwrap();

        assert_eq!(session.display_name(), "Entrenamiento");
        assert_eq!(session.duration(), Some(65));
        assert!(session.exercises.is_empty());
    }

    #[test]
    fn test_manual_duration_parts() {
        let started = "2026-03-02T18:00:00Z".parse().unwrap();
        let manual = ManualWorkout::from_parts("Entreno Pro".into(), started, 1, 30, 5);
        assert_eq!(manual.duration_minutes, 90);

        let edit = ManualWorkout { duration_minutes: 60, ..manual };
        assert_eq!(edit.split_duration(), (1, 0));
    }

    #[test]
    fn test_payload_omits_missing_routine() {
        let started = "2026-03-02T18:00:00Z".parse().unwrap();
        let payload = NewWorkoutSession {
            routine_id: None,
            day_number: None,
            name: "Cardio".into(),
            started_at: started,
            ended_at: started,
            duration_minutes: 30,
            rating: 4,
            exercises: vec![],
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("routine_id").is_none());
        assert_eq!(value["duration_minutes"], 30);
    }
}
