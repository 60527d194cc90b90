mod cmd;
mod output;
mod settings;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "claimlens",
    about = "ClaimLens orchestrator: turn claim questions into backend lookups",
    version,
    propagate_version = true
)]
struct Cli {
    /// Path to a YAML config file (default: built-in defaults)
    #[arg(long, global = true, env = "CLAIMLENS_CONFIG")]
    config: Option<PathBuf>,

    /// Base URL of the claim/policy backend (overrides the config file)
    #[arg(long, global = true, env = "CLAIMLENS_BACKEND_URL")]
    backend_url: Option<String>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP orchestration service
    Serve {
        /// Interface to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides server.port)
        #[arg(long, env = "CLAIMLENS_PORT")]
        port: Option<u16>,
    },

    /// Show the plan a prompt compiles to, without calling the backend
    Plan {
        /// Free-text question
        prompt: String,

        /// Claim the question is about
        #[arg(long, default_value = "")]
        claim_id: String,
    },

    /// Answer one question about a claim
    Ask {
        /// Free-text question
        prompt: String,

        /// Claim the question is about
        #[arg(long)]
        claim_id: String,

        /// Serve resources from a JSON fixture file instead of the backend
        #[arg(long)]
        fixtures: Option<PathBuf>,
    },

    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = settings::resolve_config(cli.config.as_deref(), cli.backend_url.as_deref())
        .and_then(|config| match cli.command {
            Commands::Serve { host, port } => cmd::serve::run(&config, host, port),
            Commands::Plan { prompt, claim_id } => cmd::plan::run(&prompt, &claim_id, cli.json),
            Commands::Ask {
                prompt,
                claim_id,
                fixtures,
            } => cmd::ask::run(&config, &prompt, &claim_id, fixtures.as_deref(), cli.json),
            Commands::Config { subcommand } => cmd::config::run(&config, subcommand, cli.json),
        });

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
