//! CLI application for salary document extraction and tax comparison.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{advise, compare, config, process};

/// Compare Indian tax regimes, with salary figures extracted from
/// Form 16 PDFs or salary slip images
#[derive(Parser)]
#[command(name = "taxdoc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract salary fields from a document (PDF or image)
    Process(process::ProcessArgs),

    /// Compare tax liability under the old and new regimes
    Compare(compare::CompareArgs),

    /// Get AI tax advice for a computed comparison
    Advise(advise::AdviseArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Process(args) => process::run(args, cli.config.as_deref()).await,
        Commands::Compare(args) => compare::run(args, cli.config.as_deref()).await,
        Commands::Advise(args) => advise::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args).await,
    }
}
