use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "ganttline", version, about = "Ganttline timeline layout CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign items to non-overlapping lanes
    Lanes(commands::lanes::LanesArgs),
    /// Compute the full render model (geometry, ticks, month dividers)
    Layout(commands::layout::LayoutArgs),
    /// Resolve moving an item into another lane
    Resolve(commands::lanes::ResolveArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Lanes(_) => "lanes",
            Self::Layout(_) => "layout",
            Self::Resolve(_) => "resolve",
            Self::Config { .. } => "config",
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(command = cli.command.name(), "dispatching");
    let result = match cli.command {
        Commands::Lanes(args) => commands::lanes::run_lanes(args),
        Commands::Layout(args) => commands::layout::run(args),
        Commands::Resolve(args) => commands::lanes::run_resolve(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
