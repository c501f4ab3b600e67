use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "wyrmday", version, about = "Day streaks, quests and a growing dragon")]
struct Cli {
    /// Act as if today were this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    date: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Day lifecycle
    Day {
        #[command(subcommand)]
        action: commands::day::DayAction,
    },
    /// Streak and freeze tokens
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Daily and weekly challenges
    Challenge {
        #[command(subcommand)]
        action: commands::challenge::ChallengeAction,
    },
    /// XP, level and dragon stage
    Xp {
        #[command(subcommand)]
        action: commands::xp::XpAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Everything at once
    Status,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let date = cli.date.as_deref();
    let result = match cli.command {
        Commands::Day { action } => commands::day::run(action, date),
        Commands::Streak { action } => commands::streak::run(action, date),
        Commands::Challenge { action } => commands::challenge::run(action, date),
        Commands::Xp { action } => commands::xp::run(action, date),
        Commands::Config { action } => commands::config::run(action),
        Commands::Status => commands::status::run(date),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
