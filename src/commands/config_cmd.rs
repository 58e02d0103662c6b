use clap::{Args, Subcommand, ValueEnum};

use crate::config::Config;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Manage configuration
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                // The token never goes to the terminal, whatever the format.
                let mut redacted = config.clone();
                if let Some(token) = redacted.remote.token.as_mut() {
                    let visible: String = token.chars().take(4).collect();
                    *token = format!("{}...", visible);
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&redacted)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &redacted.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        println!("database_path: {}", redacted.database_path.value.display());
                        println!("  source: {}", redacted.database_path.source);
                        println!();

                        println!("remote:");
                        println!("  owner:  {}", redacted.remote.owner.as_deref().unwrap_or("-"));
                        println!("  repo:   {}", redacted.remote.repo.as_deref().unwrap_or("-"));
                        println!("  path:   {}", redacted.remote.path);
                        println!("  branch: {}", redacted.remote.branch);
                        println!("  token:  {}", redacted.remote.token.as_deref().unwrap_or("-"));
                    }
                }
                Ok(())
            }
        }
    }
}
