//! Config command - inspect and initialize the configuration file.

use clap::{Args, Subcommand};

use taxdoc_core::TaxdocConfig;

use super::default_config_path;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

pub async fn run(args: ConfigArgs) -> anyhow::Result<()> {
    let path = default_config_path();

    match args.command {
        ConfigCommand::Show => {
            let config = if path.exists() {
                TaxdocConfig::from_file(&path)?
            } else {
                TaxdocConfig::default()
            };
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "config already exists at {}; use --force to overwrite",
                    path.display()
                );
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            TaxdocConfig::default().save(&path)?;
            println!("Wrote default config to {}", path.display());
        }
        ConfigCommand::Path => {
            println!("{}", path.display());
        }
    }

    Ok(())
}
