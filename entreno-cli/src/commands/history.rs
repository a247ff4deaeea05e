use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Subcommand};
use colored::Colorize;

use super::{dialogs, failure, spinner, success};
use crate::context::AppContext;
use crate::models::{ManualWorkout, RecordId, WorkoutSession};
use crate::services::history::{self, format_duration, xp};

#[derive(Args, Default)]
pub struct HistoryCommand {
    #[command(subcommand)]
    action: Option<HistoryAction>,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List logged sessions
    List {
        /// Number of sessions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Log a session by hand
    Add,

    /// Edit a logged session
    Edit {
        /// Session ID
        id: RecordId,
    },

    /// Delete a logged session
    Delete {
        /// Session ID
        id: RecordId,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl HistoryCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        match self.action.unwrap_or(HistoryAction::List { limit: 20 }) {
            HistoryAction::List { limit } => {
                let sessions = load(ctx).await?;
                print_sessions(&sessions, limit, &ctx.config.ui.date_format);
                Ok(())
            }
            HistoryAction::Add => {
                let workout = dialogs::manual_workout(None)?;
                save(ctx, None, &workout).await
            }
            HistoryAction::Edit { id } => {
                let sessions = load(ctx).await?;
                let session = sessions
                    .iter()
                    .find(|s| s.id == id)
                    .with_context(|| format!("Sesión {} no encontrada", id))?;
                let workout = dialogs::manual_workout(Some(&ManualWorkout::from(session)))?;
                save(ctx, Some(&id), &workout).await
            }
            HistoryAction::Delete { id, force } => delete(ctx, &id, force).await,
        }
    }
}

async fn load(ctx: &AppContext) -> Result<Vec<WorkoutSession>> {
    let bar = spinner("Cargando historial...");
    let result = history::list(ctx).await;
    bar.finish_and_clear();
    result.context("Error al cargar historial")
}

fn print_sessions(sessions: &[WorkoutSession], limit: usize, date_format: &str) {
    if sessions.is_empty() {
        println!("Aún no hay entrenamientos registrados. Añade uno con: entreno history add");
        return;
    }

    for session in sessions.iter().take(limit) {
        let rating = session.rating.unwrap_or(history::DEFAULT_RATING);
        println!(
            "{}  {}  {}",
            session.id.to_string().dimmed(),
            session
                .started_at
                .with_timezone(&Local)
                .format(date_format)
                .to_string()
                .cyan(),
            session.display_name().bold()
        );
        println!(
            "      {}   {}   {} XP",
            format_duration(session.duration().unwrap_or_default()),
            "★".repeat(usize::from(rating.min(5))).yellow(),
            xp(session).to_string().magenta()
        );
    }
}

async fn save(ctx: &AppContext, id: Option<&RecordId>, workout: &ManualWorkout) -> Result<()> {
    match history::save_manual(ctx, id, workout).await {
        Ok(()) => {
            success(&format!("\"{}\" guardado en el historial", workout.name));
            Ok(())
        }
        Err(e) => {
            failure(&format!("Error al procesar el registro: {}", e));
            Err(e.into())
        }
    }
}

async fn delete(ctx: &AppContext, id: &RecordId, force: bool) -> Result<()> {
    if !force && !dialogs::confirm(&format!("¿Eliminar el registro {}?", id))? {
        println!("Cancelado.");
        return Ok(());
    }

    let mut sessions = load(ctx).await?;
    match history::delete(ctx, &mut sessions, id).await {
        Ok(()) => {
            success("Registro eliminado");
            println!("Quedan {} sesiones en el historial", sessions.len());
            Ok(())
        }
        Err(e) => {
            failure(&format!("Error al eliminar el registro: {}", e));
            Err(e.into())
        }
    }
}
