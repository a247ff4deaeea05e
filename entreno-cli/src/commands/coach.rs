use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dialoguer::{Input, Select};
use serde_json::Value;
use std::time::Duration;

use super::{dialogs, failure, spinner, success};
use crate::context::AppContext;
use crate::models::routine::day_name;
use crate::models::{ChatMessage, GeneratedRoutine};
use crate::services::coach::{CoachMode, CoachSession};

const REST_DAY: &str = "Día de Descanso / Recuperación";

#[derive(Args, Default)]
pub struct CoachCommand {
    /// Open the routine generator right away
    #[arg(short, long)]
    generate: bool,
}

impl CoachCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let mut coach = CoachSession::new();
        let delay = Duration::from_millis(ctx.config.coach.success_delay_ms);

        print_message(&coach.messages()[0]);
        println!(
            "{}",
            "Escribe /generar para diseñar una rutina, /salir para terminar.".dimmed()
        );

        if self.generate {
            generator(ctx, &mut coach, delay).await?;
        }

        loop {
            let text: String = Input::new()
                .with_prompt("Tú")
                .allow_empty(true)
                .interact_text()?;

            match text.trim() {
                "/salir" | "/exit" => return Ok(()),
                "/generar" => generator(ctx, &mut coach, delay).await?,
                _ => {
                    let bar = spinner("El coach está pensando...");
                    let sent = coach.send(&ctx.api, &text).await;
                    bar.finish_and_clear();

                    if sent {
                        if let Some(reply) = coach.messages().last() {
                            print_message(reply);
                        }
                        if coach.routine().is_some() {
                            println!(
                                "{}",
                                "El coach ha propuesto una rutina. Usa /generar para revisarla.".cyan()
                            );
                        }
                    }
                }
            }
        }
    }
}

fn print_message(message: &ChatMessage) {
    if message.is_user() {
        println!("{} {}", "Tú:".bold(), message.content);
    } else {
        println!("{} {}", "Coach:".green().bold(), message.content);
    }
}

async fn generator(ctx: &AppContext, coach: &mut CoachSession, delay: Duration) -> Result<()> {
    coach.open_generator();

    if coach.mode() == CoachMode::Generate {
        let options = dialogs::generate_options(coach.options_mut())?;
        *coach.options_mut() = options;

        let bar = spinner("Diseñando tu rutina...");
        let result = coach.generate(&ctx.api).await.map(|_| ());
        bar.finish_and_clear();

        if let Err(e) = result {
            failure(&format!("Error generando rutina: {}", e));
            coach.back_to_chat();
            return Ok(());
        }
    }

    let Some(routine) = coach.routine() else {
        coach.back_to_chat();
        return Ok(());
    };
    print_preview(routine);

    let choice = Select::new()
        .with_prompt("¿Activar esta rutina?")
        .items(&["Activar rutina", "Descartar"])
        .default(0)
        .interact()?;

    if choice != 0 {
        coach.discard();
        println!("Rutina descartada.");
        return Ok(());
    }

    let bar = spinner("Guardando rutina...");
    let result = coach.accept(&ctx.api).await;
    bar.finish_and_clear();

    if let Err(e) = result {
        failure(&format!("Error al guardar: {}", e));
        return Ok(());
    }

    if let Some(banner) = coach.banner() {
        success(banner);
    }
    coach.complete_activation(delay).await;
    if let Some(message) = coach.messages().last() {
        print_message(message);
    }
    Ok(())
}

fn reps_label(reps: Option<&Value>) -> String {
    match reps {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "-".to_string(),
    }
}

fn print_preview(routine: &GeneratedRoutine) {
    println!();
    println!("{}", routine.name.bold());
    if let Some(goal) = &routine.goal {
        println!("Objetivo: {}", goal.cyan());
    }

    for day_number in 1..=7u8 {
        let label = day_name(day_number).unwrap_or_default();
        let Some(day) = routine.day(day_number) else {
            println!("{:<10} {}", label.bold(), REST_DAY.dimmed());
            continue;
        };

        println!("{:<10} {}", label.bold(), day.name);
        for exercise in &day.exercises {
            let weight = exercise
                .target_weight
                .map(|w| format!(" @ {} kg", w))
                .unwrap_or_default();
            println!(
                "    {:<28} {}x{}{}",
                exercise.name,
                exercise.sets.map(|s| s.to_string()).unwrap_or_else(|| "-".into()),
                reps_label(exercise.reps.as_ref()),
                weight
            );
            if let Some(notes) = exercise.notes.as_deref().filter(|n| !n.is_empty()) {
                println!("      {}", notes.dimmed());
            }
        }
    }
    println!();
}
