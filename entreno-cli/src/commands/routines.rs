use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use super::{dialogs, failure, spinner, success};
use crate::context::AppContext;
use crate::models::routine::day_name;
use crate::models::{RecordId, Routine};
use crate::services::routines::{self, RoutineBoard};

#[derive(Args, Default)]
pub struct RoutinesCommand {
    #[command(subcommand)]
    action: Option<RoutineAction>,
}

#[derive(Subcommand)]
enum RoutineAction {
    /// List routines with their weekly plan
    List,

    /// Show a routine's exercises
    Show {
        /// Routine ID
        id: String,
    },

    /// Delete a routine
    Delete {
        /// Routine ID
        id: RecordId,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl RoutinesCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        match self.action.unwrap_or(RoutineAction::List) {
            RoutineAction::List => {
                let board = load(ctx).await?;
                print_board(&board);
                Ok(())
            }
            RoutineAction::Show { id } => {
                let routine = routines::get(ctx, &id)
                    .await
                    .with_context(|| format!("No se pudo cargar la rutina {}", id))?;
                print_routine(&routine);
                Ok(())
            }
            RoutineAction::Delete { id, force } => delete(ctx, &id, force).await,
        }
    }
}

async fn load(ctx: &AppContext) -> Result<RoutineBoard> {
    let bar = spinner("Cargando rutinas...");
    let result = RoutineBoard::load(ctx).await;
    bar.finish_and_clear();
    result.context("No pudimos cargar tus rutinas. Revisa tu conexión.")
}

fn stars(rating: u8) -> String {
    let rating = rating.min(5) as usize;
    format!("{}{}", "★".repeat(rating).yellow(), "☆".repeat(5 - rating).dimmed())
}

fn print_board(board: &RoutineBoard) {
    if board.routines.is_empty() {
        println!("No tienes rutinas todavía. Crea una con: entreno coach");
        return;
    }

    for routine in &board.routines {
        println!(
            "{}  {} {}  ({} días/semana)",
            routine.id.to_string().dimmed(),
            routine.name.bold(),
            format!("[{}]", routine.goal.as_deref().unwrap_or("General")).cyan(),
            routine.days_per_week.unwrap_or(routine.routine_days.len() as u8)
        );

        for day_number in 1..=7u8 {
            let Some(day) = routine.routine_days.iter().find(|d| d.day_number == day_number) else {
                continue;
            };
            let status = match board.last_session(&routine.id, day_number) {
                Some(session) => stars(session.rating.unwrap_or(5)),
                None => "Activo".green().to_string(),
            };
            println!(
                "    {:<10} {:<24} {}   entreno train {} --day {}",
                day_name(day_number).unwrap_or_default(),
                day.name,
                status,
                routine.id,
                day_number
            );
        }
        println!();
    }
}

fn print_routine(routine: &Routine) {
    println!("{}", routine.name.bold());
    if let Some(goal) = &routine.goal {
        println!("Objetivo: {}", goal);
    }
    println!();

    for day in &routine.routine_days {
        println!(
            "{} {}",
            day_name(day.day_number).unwrap_or("Día").cyan(),
            day.name.bold()
        );
        for re in &day.routine_exercises {
            let name = re
                .exercise
                .as_ref()
                .and_then(|e| e.name.as_deref())
                .unwrap_or("Ejercicio");
            let weight = re
                .target_weight
                .map(|w| format!(" @ {} kg", w))
                .unwrap_or_default();
            println!(
                "    {:<28} {}x{}{}",
                name,
                re.sets.unwrap_or(3),
                re.reps.unwrap_or(10),
                weight
            );
            if let Some(notes) = re.notes.as_deref().filter(|n| !n.is_empty()) {
                println!("      {}", notes.dimmed());
            }
        }
    }
}

async fn delete(ctx: &AppContext, id: &RecordId, force: bool) -> Result<()> {
    let mut board = load(ctx).await?;

    let name = board
        .routines
        .iter()
        .find(|r| &r.id == id)
        .map(|r| r.name.clone())
        .with_context(|| format!("Rutina {} no encontrada", id))?;

    if !force && !dialogs::confirm(&format!("¿Eliminar la rutina \"{}\"?", name))? {
        println!("Cancelado.");
        return Ok(());
    }

    match board.delete(ctx, id).await {
        Ok(()) => {
            success(&format!("Rutina \"{}\" eliminada", name));
            print_board(&board);
            Ok(())
        }
        Err(e) => {
            failure(&format!("Error al eliminar la rutina: {}", e));
            Err(e.into())
        }
    }
}
