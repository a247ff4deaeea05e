mod coach;
mod config_cmd;
mod dashboard;
pub mod dialogs;
mod exercises;
mod history;
mod login;
mod logout;
mod password;
mod profile;
mod progress;
mod register;
mod routines;
mod stats;
mod train;
mod whoami;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::context::AppContext;
use crate::session::{navigate, GuardDecision, Route};

pub use coach::CoachCommand;
pub use dashboard::DashboardCommand;
pub use exercises::ExercisesCommand;
pub use history::HistoryCommand;
pub use login::LoginCommand;
pub use logout::LogoutCommand;
pub use password::{ForgotPasswordCommand, UpdatePasswordCommand};
pub use profile::ProfileCommand;
pub use progress::ProgressCommand;
pub use register::RegisterCommand;
pub use routines::RoutinesCommand;
pub use stats::StatsCommand;
pub use train::TrainCommand;
pub use whoami::WhoamiCommand;

#[derive(Parser)]
#[command(name = "entreno")]
#[command(about = "Terminal client for the Entreno fitness tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "ENTRENO_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login(LoginCommand),

    /// Create an account
    Register(RegisterCommand),

    /// Send a password recovery email
    ForgotPassword(ForgotPasswordCommand),

    /// Set a new password
    UpdatePassword(UpdatePasswordCommand),

    /// Sign out and forget the stored session
    Logout(LogoutCommand),

    /// Show the signed-in user
    Whoami(WhoamiCommand),

    /// Launch the interactive dashboard
    Dashboard(DashboardCommand),

    /// Show constancy statistics
    Stats(StatsCommand),

    /// Browse and manage the exercise library
    Exercises(ExercisesCommand),

    /// Browse and manage routines
    Routines(RoutinesCommand),

    /// Workout history
    History(HistoryCommand),

    /// Progress photos and AI progress analysis
    Progress(ProgressCommand),

    /// Chat with the AI coach and generate routines
    Coach(CoachCommand),

    /// Physical profile and biometric history
    Profile(ProfileCommand),

    /// Train one day of a routine
    Train(TrainCommand),

    /// Resolve an app path (e.g. /entrenar/12/1) and run its screen
    Open {
        /// Path to open
        path: String,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

impl Commands {
    /// Client route this command stands for, if any
    fn route(&self) -> Option<Route> {
        let route = match self {
            Commands::Login(_) => Route::Login,
            Commands::Register(_) => Route::Register,
            Commands::ForgotPassword(_) => Route::ForgotPassword,
            Commands::UpdatePassword(_) => Route::UpdatePassword,
            Commands::Dashboard(_) => Route::Dashboard,
            Commands::Stats(_) => Route::Stats,
            Commands::Exercises(_) => Route::Exercises,
            Commands::Routines(_) => Route::Routines,
            Commands::History(_) => Route::History,
            Commands::Progress(_) => Route::Progress,
            Commands::Coach(_) => Route::Coach,
            Commands::Profile(_) => Route::Profile,
            Commands::Train(cmd) => cmd.route(),
            Commands::Logout(_)
            | Commands::Whoami(_)
            | Commands::Open { .. }
            | Commands::Config(_)
            | Commands::Completions { .. } => return None,
        };
        Some(route)
    }

    /// Default screen for a rendered route
    fn for_route(route: Route) -> Option<Commands> {
        let command = match route {
            Route::Login => Commands::Login(LoginCommand::default()),
            Route::Register => Commands::Register(RegisterCommand::default()),
            Route::ForgotPassword => Commands::ForgotPassword(ForgotPasswordCommand::default()),
            Route::UpdatePassword => Commands::UpdatePassword(UpdatePasswordCommand::default()),
            Route::Dashboard => Commands::Dashboard(DashboardCommand::default()),
            Route::Stats => Commands::Stats(StatsCommand::default()),
            Route::Exercises => Commands::Exercises(ExercisesCommand::default()),
            Route::Routines => Commands::Routines(RoutinesCommand::default()),
            Route::History => Commands::History(HistoryCommand::default()),
            Route::Progress => Commands::Progress(ProgressCommand::default()),
            Route::Coach => Commands::Coach(CoachCommand::default()),
            Route::Profile => Commands::Profile(ProfileCommand::default()),
            Route::Train {
                routine_id,
                day_number,
            } => Commands::Train(TrainCommand::new(routine_id, day_number)),
            Route::Root | Route::Unknown(_) => return None,
        };
        Some(command)
    }
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        let config_path = match self.config {
            Some(path) => path,
            None => Config::config_file()?,
        };

        match self.command {
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config(&config_path),
                ConfigSubcommands::Init { force } => config_cmd::init_config(&config_path, force),
                ConfigSubcommands::Path => {
                    println!("{}", config_path.display());
                    Ok(())
                }
            },
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
            command => {
                let config = Config::load_from(&config_path)?;
                let ctx = AppContext::boot(config, Some(config_path)).await?;

                let result = run(&ctx, command).await;
                ctx.shutdown().await;
                result
            }
        }
    }
}

async fn run(ctx: &AppContext, command: Commands) -> Result<()> {
    let command = match command {
        Commands::Open { path } => match navigate(&path, &ctx.auth_state()) {
            GuardDecision::Render(route) => {
                println!("→ {}", route.to_string().cyan());
                match Commands::for_route(route) {
                    Some(command) => command,
                    None => bail!("No hay nada que mostrar en {}", path),
                }
            }
            GuardDecision::Redirect(route) => bail!("Redirigido a {}", route),
            GuardDecision::Wait => bail!("La sesión todavía se está cargando"),
        },
        command => command,
    };

    if let Some(route) = command.route() {
        require(ctx, &route)?;
    }

    match command {
        Commands::Login(cmd) => cmd.execute(ctx).await,
        Commands::Register(cmd) => cmd.execute(ctx).await,
        Commands::ForgotPassword(cmd) => cmd.execute(ctx).await,
        Commands::UpdatePassword(cmd) => cmd.execute(ctx).await,
        Commands::Logout(cmd) => cmd.execute(ctx).await,
        Commands::Whoami(cmd) => cmd.execute(ctx).await,
        Commands::Dashboard(cmd) => cmd.execute(ctx).await,
        Commands::Stats(cmd) => cmd.execute(ctx).await,
        Commands::Exercises(cmd) => cmd.execute(ctx).await,
        Commands::Routines(cmd) => cmd.execute(ctx).await,
        Commands::History(cmd) => cmd.execute(ctx).await,
        Commands::Progress(cmd) => cmd.execute(ctx).await,
        Commands::Coach(cmd) => cmd.execute(ctx).await,
        Commands::Profile(cmd) => cmd.execute(ctx).await,
        Commands::Train(cmd) => cmd.execute(ctx).await,
        Commands::Open { .. } | Commands::Config(_) | Commands::Completions { .. } => Ok(()),
    }
}

/// Apply the route guard before running a screen
fn require(ctx: &AppContext, route: &Route) -> Result<()> {
    match route.guard(&ctx.auth_state()) {
        GuardDecision::Render(_) => Ok(()),
        GuardDecision::Redirect(Route::Login) => {
            bail!("No has iniciado sesión. Ejecuta `entreno login` primero.")
        }
        GuardDecision::Redirect(other) => bail!("Redirigido a {}", other),
        GuardDecision::Wait => bail!("La sesión todavía se está cargando"),
    }
}

/// Spinner shown while a request is in flight
pub(crate) fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

pub(crate) fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub(crate) fn failure(message: &str) {
    println!("{} {}", "✗".red(), message);
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
