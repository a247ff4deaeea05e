//! Interactive prompts shared by the screens.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};

use crate::models::{ExerciseForm, GenerateOptions, ManualWorkout, ProfileForm};

const FITNESS_LEVELS: &[&str] = &["Principiante", "Intermedio", "Avanzado"];
const GOALS: &[&str] = &["Salud", "Hipertrofia", "Fuerza", "Pérdida de grasa", "Resistencia"];
const EQUIPMENT: &[&str] = &["Gimnasio completo", "Mancuernas", "Peso corporal"];

/// Yes/no question, defaulting to no
pub fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

fn select_value(prompt: &str, choices: &[&str], current: &str) -> Result<String> {
    let default = choices.iter().position(|c| *c == current).unwrap_or(0);
    let index = Select::new()
        .with_prompt(prompt)
        .items(choices)
        .default(default)
        .interact()?;
    Ok(choices[index].to_string())
}

fn stars(rating: u8) -> String {
    "★".repeat(rating as usize) + &"☆".repeat(5usize.saturating_sub(rating as usize))
}

/// 1–5 star rating
pub fn rating(prompt: &str, current: u8) -> Result<u8> {
    let items: Vec<String> = (1..=5).map(stars).collect();
    let index = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(usize::from(current.clamp(1, 5)) - 1)
        .interact()?;
    Ok(index as u8 + 1)
}

/// Create or edit a manual history entry
pub fn manual_workout(initial: Option<&ManualWorkout>) -> Result<ManualWorkout> {
    let (hours, minutes) = initial.map(ManualWorkout::split_duration).unwrap_or((1, 0));
    let date = initial
        .map(|w| w.started_at.with_timezone(&Local).date_naive())
        .unwrap_or_else(|| Local::now().date_naive());

    let name: String = Input::new()
        .with_prompt("Nombre (Ej: Pecho y Tríceps)")
        .with_initial_text(initial.map(|w| w.name.clone()).unwrap_or_default())
        .interact_text()?;

    let date: String = Input::new()
        .with_prompt("Fecha (dd/mm/yyyy)")
        .default(date.format("%d/%m/%Y").to_string())
        .validate_with(|input: &String| {
            NaiveDate::parse_from_str(input, "%d/%m/%Y")
                .map(|_| ())
                .map_err(|_| "Usa el formato dd/mm/yyyy")
        })
        .interact_text()?;

    let hours: u32 = Input::new().with_prompt("Horas").default(hours).interact_text()?;
    let minutes: u32 = Input::new()
        .with_prompt("Minutos")
        .default(minutes)
        .validate_with(|m: &u32| if *m < 60 { Ok(()) } else { Err("0-59") })
        .interact_text()?;
    let rating = rating("Valoración", initial.map(|w| w.rating).unwrap_or(5))?;

    let started_at = local_midday(&date)?;
    Ok(ManualWorkout::from_parts(
        name.trim().to_string(),
        started_at,
        hours,
        minutes,
        rating,
    ))
}

/// Noon on a `dd/mm/yyyy` date, so the day survives timezone shifts
fn local_midday(date: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date, "%d/%m/%Y").context("Fecha no válida")?;
    let noon = date.and_hms_opt(12, 0, 0).context("Hora no válida")?;
    let local = Local
        .from_local_datetime(&noon)
        .earliest()
        .context("La fecha no existe en la zona horaria local")?;
    Ok(local.with_timezone(&Utc))
}

/// End-of-workout summary: returns `(rating, duration_minutes)`
pub fn workout_summary(routine_name: &str, initial_duration: u32) -> Result<(u8, u32)> {
    println!();
    println!("{} {}", "Resumen:".bold(), routine_name);

    let rating = rating("¿Cómo fue el entrenamiento?", 5)?;
    let duration: u32 = Input::new()
        .with_prompt("Duración (min)")
        .default(initial_duration)
        .interact_text()?;
    Ok((rating, duration))
}

/// Show where to watch an exercise's technique video
pub fn exercise_video(name: &str, url: Option<&str>) {
    println!();
    println!("{} {}", "▶".red(), name.bold());
    match url.filter(|u| !u.is_empty()) {
        Some(url) => println!("  {}", url.underline()),
        None => println!("  {}", "Sin vídeo disponible".dimmed()),
    }
}

pub fn exercise_form(initial: &ExerciseForm) -> Result<ExerciseForm> {
    let text = |prompt: &str, value: &str| -> Result<String> {
        Ok(Input::<String>::new()
            .with_prompt(prompt)
            .with_initial_text(value)
            .allow_empty(true)
            .interact_text()?)
    };

    Ok(ExerciseForm {
        name: text("Nombre", &initial.name)?,
        muscle_group: text("Grupo muscular", &initial.muscle_group)?,
        equipment: text("Equipamiento", &initial.equipment)?,
        description: text("Descripción", &initial.description)?,
        video_url: text("URL del vídeo (vacío para sugerir)", &initial.video_url)?,
    })
}

pub fn profile_form(initial: &ProfileForm) -> Result<ProfileForm> {
    let full_name: String = Input::new()
        .with_prompt("Nombre")
        .with_initial_text(&initial.full_name)
        .allow_empty(true)
        .interact_text()?;

    let optional = |prompt: &str, current: Option<String>| -> Result<String> {
        Ok(Input::<String>::new()
            .with_prompt(prompt)
            .with_initial_text(current.unwrap_or_default())
            .allow_empty(true)
            .interact_text()?)
    };

    let age = optional("Edad", initial.age.map(|a| a.to_string()))?;
    let weight = optional("Peso (kg)", initial.weight.map(|w| w.to_string()))?;
    let height = optional("Altura (cm)", initial.height.map(|h| h.to_string()))?;

    Ok(ProfileForm {
        full_name,
        age: age.trim().parse().ok(),
        weight: weight.trim().replace(',', ".").parse().ok(),
        height: height.trim().replace(',', ".").parse().ok(),
        fitness_level: select_value("Nivel", FITNESS_LEVELS, &initial.fitness_level)?,
        goal: select_value("Objetivo", GOALS, &initial.goal)?,
    })
}

pub fn generate_options(current: &GenerateOptions) -> Result<GenerateOptions> {
    let days: u8 = Input::new()
        .with_prompt("Días por semana")
        .default(current.days)
        .validate_with(|d: &u8| if (1..=7).contains(d) { Ok(()) } else { Err("1-7") })
        .interact_text()?;

    Ok(GenerateOptions {
        goal: select_value("Objetivo", GOALS, &current.goal)?,
        level: select_value("Nivel", FITNESS_LEVELS, &current.level)?,
        days,
        equipment: select_value("Equipamiento", EQUIPMENT, &current.equipment)?,
    })
}
