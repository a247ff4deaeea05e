use serde_json::Value;

use super::Result;
use crate::context::AppContext;
use crate::models::{RecordId, Routine, WorkoutSession};

/// Routines screen: the user's routines plus their sessions, used to show
/// the last rating per routine day
#[derive(Debug, Clone, Default)]
pub struct RoutineBoard {
    pub routines: Vec<Routine>,
    pub sessions: Vec<WorkoutSession>,
}

impl RoutineBoard {
    /// Fetch routines and sessions concurrently
    pub async fn load(ctx: &AppContext) -> Result<Self> {
        let (routines, sessions) = tokio::try_join!(
            ctx.api.get::<Option<Vec<Routine>>>("/api/rutinas"),
            ctx.api.get::<Option<Vec<WorkoutSession>>>("/api/sesiones"),
        )?;

        Ok(Self {
            routines: routines.unwrap_or_default(),
            sessions: sessions.unwrap_or_default(),
        })
    }

    /// Most recent session logged for one day of a routine
    pub fn last_session(&self, routine_id: &RecordId, day_number: u8) -> Option<&WorkoutSession> {
        self.sessions
            .iter()
            .filter(|s| s.routine_id.as_ref() == Some(routine_id) && s.day_number == Some(day_number))
            .max_by_key(|s| s.started_at)
    }

    /// Remove the routine from the board right away and delete it remotely.
    /// If the request fails the previous list is restored.
    pub async fn delete(&mut self, ctx: &AppContext, id: &RecordId) -> Result<()> {
        let original = self.routines.clone();
        self.routines.retain(|r| &r.id != id);

        match ctx
            .api
            .delete::<Option<Value>>(&format!("/api/rutinas/{}", id))
            .await
        {
            Ok(_) => {
                tracing::info!("Deleted routine {}", id);
                Ok(())
            }
            Err(e) => {
                self.routines = original;
                Err(e.into())
            }
        }
    }
}

pub async fn get(ctx: &AppContext, id: &str) -> Result<Routine> {
    Ok(ctx.api.get(&format!("/api/rutinas/{}", id)).await?)
}
