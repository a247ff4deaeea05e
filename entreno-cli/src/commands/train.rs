use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use colored::Colorize;
use dialoguer::{Input, Select};

use super::{dialogs, failure, spinner, success};
use crate::context::AppContext;
use crate::services::workout::{self, format_elapsed, WorkoutTracker};
use crate::session::Route;

#[derive(Args)]
pub struct TrainCommand {
    /// Routine ID
    routine_id: String,

    /// Day of the routine (1 = Monday); defaults to the first day
    #[arg(short, long)]
    day: Option<u8>,
}

const ACTIONS: &[&str] = &[
    "Marcar / desmarcar serie",
    "Cambiar peso o repeticiones",
    "Ajustar RPE",
    "Ver vídeo del ejercicio",
    "Terminar entrenamiento",
    "Salir sin guardar",
];

impl TrainCommand {
    pub fn new(routine_id: String, day: Option<u8>) -> Self {
        Self { routine_id, day }
    }

    pub fn route(&self) -> Route {
        Route::Train {
            routine_id: self.routine_id.clone(),
            day_number: self.day,
        }
    }

    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let bar = spinner("Cargando entrenamiento...");
        let result = WorkoutTracker::load(ctx, &self.routine_id, self.day).await;
        bar.finish_and_clear();
        let mut tracker = result.context("Rutina no encontrada")?;

        println!("{}", tracker.session_name().bold());

        loop {
            print_tracker(&tracker);

            let action = Select::new()
                .with_prompt("Acción")
                .items(ACTIONS)
                .default(0)
                .interact()?;

            match action {
                0 => {
                    let (exercise, set) = pick_set(&tracker)?;
                    let done = tracker.toggle_set(exercise, set)?;
                    if done {
                        success("Serie completada");
                    }
                }
                1 => {
                    let (exercise, set) = pick_set(&tracker)?;
                    let current = &tracker.exercises()[exercise].sets[set];
                    let weight: f64 = Input::new()
                        .with_prompt("Peso (kg)")
                        .default(current.weight)
                        .interact_text()?;
                    let reps: u32 = Input::new()
                        .with_prompt("Repeticiones")
                        .default(current.reps)
                        .interact_text()?;
                    tracker.set_weight(exercise, set, weight)?;
                    tracker.set_reps(exercise, set, reps)?;
                }
                2 => {
                    let exercise = pick_exercise(&tracker)?;
                    let rpe: u8 = Input::new()
                        .with_prompt("RPE (1-10)")
                        .default(tracker.exercises()[exercise].rpe)
                        .interact_text()?;
                    if let Err(e) = tracker.set_rpe(exercise, rpe) {
                        failure(&e.to_string());
                    }
                }
                3 => {
                    let exercise = &tracker.exercises()[pick_exercise(&tracker)?];
                    dialogs::exercise_video(&exercise.exercise_name, exercise.video_url.as_deref());
                }
                4 => return finish(ctx, &tracker).await,
                _ => {
                    if dialogs::confirm("¿Salir sin guardar la sesión?")? {
                        println!("Sesión descartada.");
                        return Ok(());
                    }
                }
            }
        }
    }
}

fn print_tracker(tracker: &WorkoutTracker) {
    let elapsed = tracker.elapsed_seconds(Utc::now());
    println!();
    println!(
        "⏱  {}   {}/{} series",
        format_elapsed(elapsed).cyan(),
        tracker.completed_sets(),
        tracker.total_sets()
    );

    for (i, exercise) in tracker.exercises().iter().enumerate() {
        println!(
            "{}. {}  {}",
            i + 1,
            exercise.exercise_name.bold(),
            format!("RPE {}", exercise.rpe).dimmed()
        );
        for (j, set) in exercise.sets.iter().enumerate() {
            let mark = if set.completed {
                "✓".green().to_string()
            } else {
                "·".dimmed().to_string()
            };
            println!("   {} Serie {}: {} x {} kg", mark, j + 1, set.reps, set.weight);
        }
    }
}

fn pick_exercise(tracker: &WorkoutTracker) -> Result<usize> {
    let names: Vec<&str> = tracker
        .exercises()
        .iter()
        .map(|e| e.exercise_name.as_str())
        .collect();
    Ok(Select::new()
        .with_prompt("Ejercicio")
        .items(&names)
        .default(0)
        .interact()?)
}

fn pick_set(tracker: &WorkoutTracker) -> Result<(usize, usize)> {
    let exercise = pick_exercise(tracker)?;
    let sets: Vec<String> = tracker.exercises()[exercise]
        .sets
        .iter()
        .enumerate()
        .map(|(i, s)| format!("Serie {} ({} x {} kg)", i + 1, s.reps, s.weight))
        .collect();
    let set = Select::new()
        .with_prompt("Serie")
        .items(&sets)
        .default(0)
        .interact()?;
    Ok((exercise, set))
}

async fn finish(ctx: &AppContext, tracker: &WorkoutTracker) -> Result<()> {
    let ended_at = Utc::now();
    let (rating, duration) =
        dialogs::workout_summary(&tracker.session_name(), tracker.elapsed_minutes(ended_at))?;
    let payload = tracker.finish(ended_at, duration, rating)?;

    let bar = spinner("Guardando sesión...");
    let result = workout::save(ctx, &payload).await;
    bar.finish_and_clear();

    match result {
        Ok(()) => {
            success("Sesión guardada");
            println!("Siguiente: entreno routines ({})", Route::Routines);
            Ok(())
        }
        Err(e) => {
            failure(&format!("Error guardando sesión: {}", e));
            Err(e.into())
        }
    }
}
