mod cmd;
mod location;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "port-roulette",
    about = "Give every project its own development port, and remember it",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory for port-roulette-config.json (falls back to ~/.port-roulette-config.json)
    #[arg(long, global = true, env = "config_dir")]
    config_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Alfred script filter: show the port for a project, or propose one
    Query {
        /// Project name, `reset`, or a save:<project>:<port> token
        #[arg(allow_hyphen_values = true)]
        input: Option<String>,
    },

    /// Confirm a proposed port and print it (passes other input through)
    Save {
        /// save:<project>:<port> token or a bare port
        #[arg(allow_hyphen_values = true)]
        input: String,
    },

    /// Print the port part of a save:<project>:<port> token
    Extract {
        #[arg(allow_hyphen_values = true)]
        input: String,
    },

    /// List assigned ports
    List,

    /// Forget every assignment
    Reset,
}

fn main() {
    let cli = Cli::parse();

    // stdout belongs to the host; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let store = location::resolve_store(cli.config_dir.as_deref());

    let result = match cli.command {
        Commands::Query { input } => cmd::query::run(&store, input.as_deref().unwrap_or("")),
        Commands::Save { input } => cmd::save::run(&store, &input, cli.json),
        Commands::Extract { input } => cmd::extract::run(&input),
        Commands::List => cmd::list::run(&store, cli.json),
        Commands::Reset => cmd::reset::run(&store, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
