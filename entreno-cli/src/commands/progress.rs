use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use super::{dialogs, failure, spinner, success};
use crate::context::AppContext;
use crate::models::{ProgressAnalysis, ProgressPhoto, RecordId};
use crate::services::{analysis, photos};

#[derive(Args, Default)]
pub struct ProgressCommand {
    #[command(subcommand)]
    action: Option<ProgressAction>,
}

#[derive(Subcommand)]
enum ProgressAction {
    /// List progress photos
    Gallery,

    /// Upload a progress photo
    Upload {
        /// Image file (JPEG, PNG or WebP)
        path: PathBuf,

        /// Short description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Delete a progress photo
    Delete {
        /// Photo ID
        id: RecordId,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Ask the AI coach to analyze recent progress
    Analyze,
}

impl ProgressCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        match self.action.unwrap_or(ProgressAction::Gallery) {
            ProgressAction::Gallery => {
                let gallery = load_gallery(ctx).await?;
                print_gallery(&gallery, &ctx.config.ui.date_format);
                Ok(())
            }
            ProgressAction::Upload { path, description } => {
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("No se pudo leer {}", path.display()))?;

                let bar = spinner("Subiendo foto...");
                let result = photos::upload(ctx, &bytes, &description).await;
                bar.finish_and_clear();

                match result {
                    Ok(url) => {
                        success("Foto subida");
                        println!("  {}", url.underline());
                        println!();
                        let gallery = load_gallery(ctx).await?;
                        print_gallery(&gallery, &ctx.config.ui.date_format);
                        Ok(())
                    }
                    Err(e) => {
                        failure(&format!("Error al subir la foto: {}", e));
                        Err(e.into())
                    }
                }
            }
            ProgressAction::Delete { id, force } => {
                if !force && !dialogs::confirm(&format!("¿Eliminar la foto {}?", id))? {
                    println!("Cancelado.");
                    return Ok(());
                }
                let mut gallery = load_gallery(ctx).await?;
                photos::delete(ctx, &mut gallery, &id).await?;
                success("Foto eliminada");
                print_gallery(&gallery, &ctx.config.ui.date_format);
                Ok(())
            }
            ProgressAction::Analyze => {
                let bar = spinner("Analizando tu progreso...");
                let result = analysis::analyze(&ctx.api).await;
                bar.finish_and_clear();

                match result {
                    Ok(report) => print_analysis(&report),
                    Err(e) => failure(&analysis::error_message(&e)),
                }
                Ok(())
            }
        }
    }
}

async fn load_gallery(ctx: &AppContext) -> Result<Vec<ProgressPhoto>> {
    let bar = spinner("Cargando galería...");
    let result = photos::list(ctx).await;
    bar.finish_and_clear();
    result.context("No se pudieron cargar las fotos de progreso")
}

fn print_gallery(gallery: &[ProgressPhoto], date_format: &str) {
    if gallery.is_empty() {
        println!("Aún no has subido fotos de progreso.");
        return;
    }

    for photo in gallery {
        println!(
            "{}  {}  {}",
            photo.id.to_string().dimmed(),
            photo.date_label(date_format).cyan(),
            photo.description.as_deref().unwrap_or_default()
        );
        println!("      {}", photo.image_url.underline());
    }
}

fn print_analysis(report: &ProgressAnalysis) {
    if let Some(analysis) = report.analysis.as_deref() {
        println!("{}", analysis);
    }
    if let Some(suggestion) = report.suggestion.as_deref() {
        println!();
        println!("{} {}", "Sugerencia:".green().bold(), suggestion);
    }
    if !report.changes.is_empty() {
        println!();
        for change in &report.changes {
            let value = change
                .value
                .as_ref()
                .map(|v| format!(" → {}", v))
                .unwrap_or_default();
            println!(
                "  • {}{}: {}",
                change.exercise.bold(),
                value,
                change.reason.as_deref().unwrap_or_default()
            );
        }
    }
}
