use serde_json::Value;

use super::Result;
use crate::context::AppContext;
use crate::models::{ManualWorkout, RecordId, WorkoutSession};

/// Rating assumed for sessions saved without one
pub const DEFAULT_RATING: u8 = 5;
const XP_PER_STAR: u32 = 20;

pub async fn list(ctx: &AppContext) -> Result<Vec<WorkoutSession>> {
    let sessions: Option<Vec<WorkoutSession>> = ctx.api.get("/api/sesiones").await?;
    Ok(sessions.unwrap_or_default())
}

/// Create a manual entry, or replace the session `id` when editing
pub async fn save_manual(
    ctx: &AppContext,
    id: Option<&RecordId>,
    workout: &ManualWorkout,
) -> Result<()> {
    match id {
        Some(id) => {
            ctx.api
                .put::<_, Option<Value>>(&format!("/api/sesiones/{}", id), workout)
                .await?;
            tracing::info!("Updated session {}", id);
        }
        None => {
            ctx.api
                .post::<_, Option<Value>>("/api/sesiones", workout)
                .await?;
            tracing::info!("Logged manual session {}", workout.name);
        }
    }
    Ok(())
}

/// Delete a session and drop it from `sessions`. The list is left untouched
/// when the request fails.
pub async fn delete(
    ctx: &AppContext,
    sessions: &mut Vec<WorkoutSession>,
    id: &RecordId,
) -> Result<()> {
    ctx.api
        .delete::<Option<Value>>(&format!("/api/sesiones/{}", id))
        .await?;
    sessions.retain(|s| &s.id != id);
    Ok(())
}

/// `45 min`, `2 h`, `1 h 30 min`
pub fn format_duration(total_minutes: u32) -> String {
    if total_minutes < 60 {
        return format!("{} min", total_minutes);
    }
    let (hours, minutes) = (total_minutes / 60, total_minutes % 60);
    if minutes > 0 {
        format!("{} h {} min", hours, minutes)
    } else {
        format!("{} h", hours)
    }
}

pub fn xp(session: &WorkoutSession) -> u32 {
    u32::from(session.rating.unwrap_or(DEFAULT_RATING)) * XP_PER_STAR
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0 min");
        assert_eq!(format_duration(45), "45 min");
        assert_eq!(format_duration(60), "1 h");
        assert_eq!(format_duration(90), "1 h 30 min");
        assert_eq!(format_duration(125), "2 h 5 min");
    }

    #[test]
    fn test_xp_defaults_to_five_stars() {
        let mut session: WorkoutSession = serde_json::from_value(json!({
            "id": 1,
            "started_at": "2026-10-12T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(xp(&session), 100);

        session.rating = Some(3);
        assert_eq!(xp(&session), 60);
    }
}
