use std::path::PathBuf;

use clap::{Parser, Subcommand};
use harmony_core::State;

mod commands;

use commands::evaluate::OutputFormat;

#[derive(Parser)]
#[command(
    name = "harmonyctl",
    about = "Harmony — score infrastructure telemetry and emit operational directives",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate metric samples, one JSON object per line.
    ///
    /// Each line is scored in order against a single scorer, so entropy,
    /// recovery mode, and the closing trend report reflect the whole input.
    Evaluate {
        /// Input file, or "-" for stdin.
        #[arg(short, long, default_value = "-")]
        input: String,
        /// Path to harmony.toml (defaults apply when omitted).
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the directive for a state as JSON.
    Directive {
        /// euphoric, harmonic, contemplative, or mystical.
        state: State,
    },
    /// Manage harmony.toml.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a harmony.toml with default values.
    Init {
        #[arg(short, long, default_value = "harmony.toml")]
        path: PathBuf,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("harmony_scorer=info".parse()?)
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate { input, config, format } => {
            commands::evaluate::evaluate(&input, config.as_deref(), format)
        }
        Commands::Directive { state } => commands::directive::directive(state),
        Commands::Config { action } => match action {
            ConfigAction::Init { path, force } => commands::config::init(&path, force),
        },
    }
}
