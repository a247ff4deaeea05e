use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use super::spinner;
use crate::context::AppContext;
use crate::services::stats::{self, ConstancyPoint, DashboardStats, TARGET_SCORE};

const BAR_WIDTH: usize = 30;

#[derive(Args, Default)]
pub struct StatsCommand {}

impl StatsCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let bar = spinner("Cargando estadísticas...");
        let result = stats::load(ctx).await;
        bar.finish_and_clear();
        let stats = result.context("No se pudieron cargar las estadísticas")?;

        print_stats(&stats);
        Ok(())
    }
}

fn trend_bar(point: &ConstancyPoint) -> String {
    let filled = usize::from(point.score) * BAR_WIDTH / 100;
    let bar = "█".repeat(filled);
    if point.meets_target() {
        bar.green().to_string()
    } else {
        bar.yellow().to_string()
    }
}

fn print_stats(stats: &DashboardStats) {
    println!("{}", "Estadísticas".bold());
    println!();
    println!("Sesiones totales:   {}", stats.total_sessions);
    println!("Esta semana:        {} días", stats.weekly_sessions);
    println!();
    println!("Constancia (objetivo ≥ {})", TARGET_SCORE);

    for point in &stats.constancy {
        let mark = if point.meets_target() {
            "✓".green().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "  {} {:<4} {:>3} {}",
            mark,
            point.label,
            point.score,
            trend_bar(point)
        );
    }
}
