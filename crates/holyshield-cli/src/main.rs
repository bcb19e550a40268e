use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "holyshield", version, about = "HolyShield conference program CLI")]
struct Cli {
    /// Site config file (.toml or .json). Falls back to $HOLYSHIELD_SITE, then
    /// the bundled site.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalized agenda sessions
    Agenda(commands::agenda::AgendaArgs),
    /// Time x track schedule grid
    Grid(commands::grid::GridArgs),
    /// Session detail by slug
    Session(commands::session::SessionArgs),
    /// Speaker roster per track
    Speakers(commands::speakers::SpeakersArgs),
    /// Time left until the event
    Countdown(commands::countdown::CountdownArgs),
    /// Site configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let default_filter = format!("holyshield_core={level},holyshield_cli={level}");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Agenda(args) => commands::agenda::run(args, config),
        Commands::Grid(args) => commands::grid::run(args, config),
        Commands::Session(args) => commands::session::run(args, config),
        Commands::Speakers(args) => commands::speakers::run(args, config),
        Commands::Countdown(args) => commands::countdown::run(args, config),
        Commands::Config { action } => commands::config::run(action, config),
        Commands::Completions { shell } => {
            commands::completions::run(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
