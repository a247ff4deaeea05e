//! In-progress workout session.
//!
//! The tracker is pure state: nothing reaches the backend until
//! [`save`] posts the finished session.

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use super::{routines, Result, ServiceError};
use crate::context::AppContext;
use crate::models::{ExerciseLog, NewWorkoutSession, RecordId, Routine, SetLog};

pub const DEFAULT_SETS: u32 = 3;
pub const DEFAULT_REPS: u32 = 10;
pub const DEFAULT_RPE: u8 = 5;
const DEFAULT_EXERCISE_NAME: &str = "Ejercicio";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TrackerError {
    #[error("No existe el ejercicio {0}")]
    NoSuchExercise(usize),

    #[error("No existe la serie {0}")]
    NoSuchSet(usize),

    #[error("El RPE debe estar entre 1 y 10, recibido {0}")]
    RpeOutOfRange(u8),

    #[error("La valoración debe estar entre 1 y 5, recibido {0}")]
    RatingOutOfRange(u8),
}

#[derive(Debug, Clone)]
pub struct WorkoutTracker {
    routine_id: RecordId,
    routine_name: String,
    day_number: u8,
    day_name: String,
    started_at: DateTime<Utc>,
    exercises: Vec<ExerciseLog>,
}

impl WorkoutTracker {
    /// Prepare the logs for one day of `routine`. Falls back to the first
    /// day when `day_number` is missing or unknown; `None` if the routine has
    /// no days at all.
    pub fn start(routine: &Routine, day_number: Option<u8>, started_at: DateTime<Utc>) -> Option<Self> {
        let day = routine.select_day(day_number)?;

        let exercises = day
            .routine_exercises
            .iter()
            .map(|re| {
                let set = SetLog {
                    reps: re.reps.unwrap_or(DEFAULT_REPS),
                    weight: re.target_weight.unwrap_or(0.0),
                    completed: false,
                };
                let exercise = re.exercise.as_ref();

                ExerciseLog {
                    exercise_id: re.exercise_id.clone(),
                    exercise_name: exercise
                        .and_then(|e| e.name.clone())
                        .unwrap_or_else(|| DEFAULT_EXERCISE_NAME.to_string()),
                    video_url: exercise.and_then(|e| e.video_url.clone()),
                    rpe: DEFAULT_RPE,
                    sets: vec![set; re.sets.unwrap_or(DEFAULT_SETS) as usize],
                }
            })
            .collect();

        Some(Self {
            routine_id: routine.id.clone(),
            routine_name: routine.name.clone(),
            day_number: day.day_number,
            day_name: day.name.clone(),
            started_at,
            exercises,
        })
    }

    /// Fetch the routine and start tracking the requested day
    pub async fn load(ctx: &AppContext, routine_id: &str, day_number: Option<u8>) -> Result<Self> {
        let routine = routines::get(ctx, routine_id).await?;

        Self::start(&routine, day_number, Utc::now()).ok_or_else(|| {
            ServiceError::Validation(format!("La rutina \"{}\" no tiene días", routine.name))
        })
    }

    pub fn exercises(&self) -> &[ExerciseLog] {
        &self.exercises
    }

    pub fn day_number(&self) -> u8 {
        self.day_number
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// `"<routine> - <day>"`
    pub fn session_name(&self) -> String {
        format!("{} - {}", self.routine_name, self.day_name)
    }

    fn set_mut(&mut self, exercise: usize, set: usize) -> std::result::Result<&mut SetLog, TrackerError> {
        self.exercises
            .get_mut(exercise)
            .ok_or(TrackerError::NoSuchExercise(exercise))?
            .sets
            .get_mut(set)
            .ok_or(TrackerError::NoSuchSet(set))
    }

    pub fn set_weight(&mut self, exercise: usize, set: usize, weight: f64) -> std::result::Result<(), TrackerError> {
        self.set_mut(exercise, set)?.weight = weight;
        Ok(())
    }

    pub fn set_reps(&mut self, exercise: usize, set: usize, reps: u32) -> std::result::Result<(), TrackerError> {
        self.set_mut(exercise, set)?.reps = reps;
        Ok(())
    }

    /// Flip a set's completion, returning the new state
    pub fn toggle_set(&mut self, exercise: usize, set: usize) -> std::result::Result<bool, TrackerError> {
        let set = self.set_mut(exercise, set)?;
        set.completed = !set.completed;
        Ok(set.completed)
    }

    pub fn set_rpe(&mut self, exercise: usize, rpe: u8) -> std::result::Result<(), TrackerError> {
        if !(1..=10).contains(&rpe) {
            return Err(TrackerError::RpeOutOfRange(rpe));
        }
        self.exercises
            .get_mut(exercise)
            .ok_or(TrackerError::NoSuchExercise(exercise))?
            .rpe = rpe;
        Ok(())
    }

    pub fn completed_sets(&self) -> usize {
        self.exercises
            .iter()
            .flat_map(|e| &e.sets)
            .filter(|s| s.completed)
            .count()
    }

    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> i64 {
        (now - self.started_at).num_seconds().max(0)
    }

    /// Started minutes since start, never below one
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> u32 {
        let minutes = (self.elapsed_seconds(now) + 59) / 60;
        u32::try_from(minutes).unwrap_or(u32::MAX).max(1)
    }

    /// Build the payload for the finished session
    pub fn finish(
        &self,
        ended_at: DateTime<Utc>,
        duration_minutes: u32,
        rating: u8,
    ) -> std::result::Result<NewWorkoutSession, TrackerError> {
        if !(1..=5).contains(&rating) {
            return Err(TrackerError::RatingOutOfRange(rating));
        }

        Ok(NewWorkoutSession {
            routine_id: Some(self.routine_id.clone()),
            day_number: Some(self.day_number),
            name: self.session_name(),
            started_at: self.started_at,
            ended_at,
            duration_minutes,
            rating,
            exercises: self.exercises.clone(),
        })
    }
}

/// `MM:SS`; minutes keep counting past the hour
pub fn format_elapsed(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub async fn save(ctx: &AppContext, session: &NewWorkoutSession) -> Result<()> {
    ctx.api
        .post::<_, Option<Value>>("/api/sesiones", session)
        .await?;
    tracing::info!("Saved session {}", session.name);
    Ok(())
}
