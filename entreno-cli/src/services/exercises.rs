use serde::Serialize;
use uuid::Uuid;

use super::videos::VideoCatalog;
use super::{credentials, Result, ServiceError};
use crate::context::AppContext;
use crate::models::{Exercise, ExerciseForm, RecordId};

const TABLE: &str = "exercises";

#[derive(Serialize)]
struct NewExercise<'a> {
    #[serde(flatten)]
    form: &'a ExerciseForm,
    user_id: Uuid,
}

/// The user's exercise library ordered by name
pub async fn list(ctx: &AppContext) -> Result<Vec<Exercise>> {
    let (token, user_id) = credentials(ctx).await?;

    let exercises = ctx
        .backend
        .table(TABLE, &token)
        .eq("user_id", user_id)
        .order("name", true)
        .fetch()
        .await?;
    Ok(exercises)
}

/// Local filter over a loaded list; a blank term keeps everything
pub fn search<'a>(exercises: &'a [Exercise], term: &str) -> Vec<&'a Exercise> {
    let term = term.trim();
    exercises
        .iter()
        .filter(|e| term.is_empty() || e.matches(term))
        .collect()
}

/// Fill in a catalog video when the form has none
pub fn with_suggested_video(mut form: ExerciseForm, catalog: &VideoCatalog) -> ExerciseForm {
    if let Some(url) = catalog.suggest_url(&form.name, &form.video_url) {
        tracing::debug!("Suggested video for {}: {}", form.name, url);
        form.video_url = url;
    }
    form
}

fn validate(form: &ExerciseForm) -> Result<()> {
    if form.name.trim().is_empty() {
        return Err(ServiceError::Validation(
            "El nombre del ejercicio es obligatorio".to_string(),
        ));
    }
    Ok(())
}

pub async fn create(ctx: &AppContext, form: &ExerciseForm) -> Result<()> {
    validate(form)?;
    let (token, user_id) = credentials(ctx).await?;

    ctx.backend
        .table(TABLE, &token)
        .insert(&NewExercise { form, user_id })
        .await?;

    tracing::info!("Created exercise {}", form.name);
    Ok(())
}

/// Update one of the user's own exercises
pub async fn update(ctx: &AppContext, id: &RecordId, form: &ExerciseForm) -> Result<()> {
    validate(form)?;
    let (token, user_id) = credentials(ctx).await?;

    ctx.backend
        .table(TABLE, &token)
        .eq("id", id)
        .eq("user_id", user_id)
        .update(form)
        .await?;
    Ok(())
}

/// Delete an exercise and drop it from `exercises`
pub async fn delete(
    ctx: &AppContext,
    exercises: &mut Vec<Exercise>,
    id: &RecordId,
) -> Result<()> {
    let (token, _) = credentials(ctx).await?;

    ctx.backend.table(TABLE, &token).eq("id", id).delete().await?;
    exercises.retain(|e| &e.id != id);
    Ok(())
}
