use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use super::{dialogs, failure, spinner, success};
use crate::context::AppContext;
use crate::models::{BiometricEntry, ProfileForm, RecordId};
use crate::services::profiles;

#[derive(Args, Default)]
pub struct ProfileCommand {
    #[command(subcommand)]
    action: Option<ProfileAction>,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show the current profile
    Show,

    /// Edit the profile and record a biometric snapshot
    Edit,

    /// List biometric snapshots
    History,

    /// Delete a biometric snapshot
    DeleteEntry {
        /// Snapshot ID
        id: RecordId,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl ProfileCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        match self.action.unwrap_or(ProfileAction::Show) {
            ProfileAction::Show => {
                let form = load(ctx).await?;
                print_profile(&form);
                Ok(())
            }
            ProfileAction::Edit => edit(ctx).await,
            ProfileAction::History => {
                let entries = load_history(ctx).await?;
                print_history(&entries, &ctx.config.ui.date_format);
                Ok(())
            }
            ProfileAction::DeleteEntry { id, force } => {
                if !force && !dialogs::confirm(&format!("¿Eliminar el registro {}?", id))? {
                    println!("Cancelado.");
                    return Ok(());
                }
                let mut entries = load_history(ctx).await?;
                profiles::delete_history_entry(ctx, &mut entries, &id).await?;
                success("Registro eliminado");
                print_history(&entries, &ctx.config.ui.date_format);
                Ok(())
            }
        }
    }
}

async fn load(ctx: &AppContext) -> Result<ProfileForm> {
    let bar = spinner("Cargando perfil...");
    let result = profiles::load_profile(ctx).await;
    bar.finish_and_clear();
    result.context("No se pudo cargar el perfil")
}

async fn load_history(ctx: &AppContext) -> Result<Vec<BiometricEntry>> {
    let bar = spinner("Cargando historial...");
    let result = profiles::list_history(ctx).await;
    bar.finish_and_clear();
    result.context("No se pudo cargar el historial biométrico")
}

fn optional<T: ToString>(value: Option<T>, unit: &str) -> String {
    value
        .map(|v| format!("{}{}", v.to_string(), unit))
        .unwrap_or_else(|| "-".to_string())
}

fn print_profile(form: &ProfileForm) {
    let name = if form.full_name.is_empty() {
        "(sin nombre)"
    } else {
        form.full_name.as_str()
    };
    println!("{}", name.bold());
    println!("  Edad:      {}", optional(form.age, " años"));
    println!("  Peso:      {}", optional(form.weight, " kg"));
    println!("  Altura:    {}", optional(form.height, " cm"));
    println!("  Nivel:     {}", form.fitness_level.cyan());
    println!("  Objetivo:  {}", form.goal.cyan());
}

fn print_history(entries: &[BiometricEntry], date_format: &str) {
    if entries.is_empty() {
        println!("Todavía no hay historial biométrico.");
        return;
    }

    for entry in entries {
        println!(
            "{}  {}  {}  {}  {}",
            entry.id.to_string().dimmed(),
            entry
                .created_at
                .with_timezone(&chrono::Local)
                .format(date_format)
                .to_string()
                .cyan(),
            optional(entry.weight, " kg"),
            optional(entry.height, " cm"),
            entry.goal.as_deref().unwrap_or("-")
        );
    }
}

async fn edit(ctx: &AppContext) -> Result<()> {
    let current = load(ctx).await?;
    let form = dialogs::profile_form(&current)?;

    let bar = spinner("Guardando perfil...");
    let result = profiles::save_profile(ctx, &form).await;
    bar.finish_and_clear();

    match result {
        Ok(()) => {
            success("Perfil actualizado");
            print_profile(&form);
            Ok(())
        }
        Err(e) => {
            failure(&format!("Error al guardar el perfil: {}", e));
            Err(e.into())
        }
    }
}
