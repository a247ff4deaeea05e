use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use super::{dialogs, spinner, success};
use crate::context::AppContext;
use crate::models::{Exercise, ExerciseForm, RecordId};
use crate::services::exercises;

#[derive(Args, Default)]
pub struct ExercisesCommand {
    #[command(subcommand)]
    action: Option<ExerciseAction>,
}

#[derive(Subcommand)]
enum ExerciseAction {
    /// List the library
    List {
        /// Filter by name, muscle group or equipment
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Add an exercise
    Add,

    /// Edit one of your exercises
    Edit {
        /// Exercise ID
        id: RecordId,
    },

    /// Delete an exercise
    Delete {
        /// Exercise ID
        id: RecordId,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show an exercise's technique video
    Video {
        /// Exercise ID
        id: RecordId,
    },

    /// Search the built-in video catalog
    Catalog {
        /// Text contained in the exercise name
        query: String,
    },
}

impl ExercisesCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        match self.action.unwrap_or(ExerciseAction::List { search: None }) {
            ExerciseAction::List { search } => list(ctx, search.as_deref()).await,
            ExerciseAction::Add => add(ctx).await,
            ExerciseAction::Edit { id } => edit(ctx, &id).await,
            ExerciseAction::Delete { id, force } => delete(ctx, &id, force).await,
            ExerciseAction::Video { id } => {
                let exercise = find(ctx, &id).await?;
                dialogs::exercise_video(&exercise.name, exercise.video_url.as_deref());
                Ok(())
            }
            ExerciseAction::Catalog { query } => {
                let catalog = ctx.video_catalog();
                let found = catalog.search(&query);
                if found.is_empty() {
                    println!("Ningún vídeo del catálogo coincide con \"{}\".", query);
                }
                for entry in found {
                    println!(
                        "{}  {}",
                        entry.name.bold(),
                        crate::services::videos::youtube_url(&entry.video_id)
                    );
                }
                Ok(())
            }
        }
    }
}

async fn load(ctx: &AppContext) -> Result<Vec<Exercise>> {
    let bar = spinner("Cargando ejercicios...");
    let result = exercises::list(ctx).await;
    bar.finish_and_clear();
    result.context("No se pudieron cargar los ejercicios")
}

async fn find(ctx: &AppContext, id: &RecordId) -> Result<Exercise> {
    load(ctx)
        .await?
        .into_iter()
        .find(|e| &e.id == id)
        .with_context(|| format!("Ejercicio {} no encontrado", id))
}

async fn list(ctx: &AppContext, search: Option<&str>) -> Result<()> {
    let all = load(ctx).await?;
    let shown = exercises::search(&all, search.unwrap_or_default());

    println!("Biblioteca de ejercicios ({} de {})", shown.len(), all.len());
    println!();

    if shown.is_empty() {
        println!("No se encontraron ejercicios.");
        return Ok(());
    }

    for exercise in shown {
        let video = if exercise.video_url.as_deref().is_some_and(|u| !u.is_empty()) {
            " ▶".red().to_string()
        } else {
            String::new()
        };
        println!(
            "{:>6}  {}{}  {}  {}",
            exercise.id.to_string().dimmed(),
            exercise.name.bold(),
            video,
            exercise.muscle_group.cyan(),
            exercise.equipment.as_deref().unwrap_or("").dimmed()
        );
    }
    Ok(())
}

async fn add(ctx: &AppContext) -> Result<()> {
    let form = dialogs::exercise_form(&ExerciseForm::default())?;
    let form = exercises::with_suggested_video(form, &ctx.video_catalog());

    exercises::create(ctx, &form).await?;
    success(&format!("Ejercicio \"{}\" creado", form.name));
    Ok(())
}

async fn edit(ctx: &AppContext, id: &RecordId) -> Result<()> {
    let exercise = find(ctx, id).await?;
    let form = dialogs::exercise_form(&ExerciseForm::from(&exercise))?;
    let form = exercises::with_suggested_video(form, &ctx.video_catalog());

    exercises::update(ctx, id, &form).await?;
    success(&format!("Ejercicio \"{}\" actualizado", form.name));
    Ok(())
}

async fn delete(ctx: &AppContext, id: &RecordId, force: bool) -> Result<()> {
    if !force && !dialogs::confirm(&format!("¿Eliminar el ejercicio {}?", id))? {
        println!("Cancelado.");
        return Ok(());
    }

    let mut all = load(ctx).await?;
    exercises::delete(ctx, &mut all, id).await?;
    success("Ejercicio eliminado");
    println!("Quedan {} ejercicios en la biblioteca", all.len());
    Ok(())
}
