use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::io::IsTerminal;

use super::spinner;
use crate::context::AppContext;
use crate::services::stats::{self, DashboardStats};
use crate::ui::{App, Dashboard};

#[derive(Args, Default)]
pub struct DashboardCommand {
    /// Print the summary instead of launching the interactive screen
    #[arg(long)]
    plain: bool,
}

impl DashboardCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let user_name = ctx
            .session
            .user()
            .map(|u| u.display_name())
            .unwrap_or_default();

        let bar = spinner("Cargando panel...");
        let result = stats::load(ctx).await;
        bar.finish_and_clear();
        let stats = result.context("No se pudo cargar el panel")?;

        if self.plain || !std::io::stdout().is_terminal() {
            print_summary(&user_name, &stats);
            return Ok(());
        }

        let mut app = App::new(user_name, stats);
        let mut dashboard = Dashboard::new()?;

        loop {
            dashboard.run(&mut app)?;
            if app.should_quit {
                break;
            }

            match stats::load(ctx).await {
                Ok(stats) => app.set_stats(stats),
                Err(e) => {
                    tracing::warn!("Dashboard refresh failed: {}", e);
                    app.refresh_requested = false;
                }
            }
        }

        // Restores the terminal before printing
        drop(dashboard);

        if let Some(route) = app.next_route {
            println!("Abre {} con: entreno open {}", route.to_string().cyan(), route);
        }
        Ok(())
    }
}

fn print_summary(user_name: &str, stats: &DashboardStats) {
    println!("{}", format!("¡Hola, {}!", user_name).bold());
    println!();
    println!("Entrenamientos totales:      {}", stats.total_sessions.to_string().green());
    println!("Días entrenados esta semana: {}/7", stats.weekly_sessions);
    println!();

    let trend: Vec<String> = stats
        .constancy
        .iter()
        .map(|p| format!("{} {}", p.label, p.score))
        .collect();
    println!("Constancia: {}", trend.join("  ").dimmed());
}
