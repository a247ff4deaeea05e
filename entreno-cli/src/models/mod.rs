use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub mod coach;
pub mod exercise;
pub mod photo;
pub mod profile;
pub mod routine;
pub mod workout;

pub use coach::{ChatMessage, ChatReply, GenerateOptions, ProgressAnalysis, SuggestedChange};
pub use exercise::{Exercise, ExerciseForm};
pub use photo::{NewProgressPhoto, ProgressPhoto};
pub use profile::{BiometricEntry, NewBiometricEntry, Profile, ProfileForm};
pub use routine::{
    DraftDay, DraftExercise, GeneratedRoutine, Routine, RoutineDay, RoutineExercise,
};
pub use workout::{ExerciseLog, ManualWorkout, NewWorkoutSession, SetLog, WorkoutSession};

/// Row id as stored by the backend: tables use either uuids or integer keys
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(id) => RecordId::Int(id),
            Err(_) => RecordId::Text(s.to_string()),
        }
    }
}

impl std::str::FromStr for RecordId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RecordId::from(s))
    }
}

/// Treat an explicit `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
