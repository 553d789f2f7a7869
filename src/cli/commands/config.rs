use clap::Subcommand;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config;

#[derive(Subcommand)]
pub enum ConfigCommands {
    #[command(about = "Print the configuration the server would start with (secrets redacted)")]
    Show,
}

pub async fn handle(cmd: ConfigCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let config = config::init()?;

            match output_format {
                OutputFormat::Json => {
                    output_success(&output_format, "Resolved configuration", config)?;
                }
                OutputFormat::Text => {
                    println!("Environment: {:?}", config.environment);
                    println!("Listen:      {}:{}", config.server.host, config.server.port);
                    println!("Database:    {}", serde_json::to_value(&config.database)?["url"]);
                    println!("Pool size:   {}", config.database.max_connections);
                    println!("Session:     {}h", config.security.session_expiry_hours);
                    println!("Secure cookies: {}", config.security.secure_cookies);
                }
            }
            Ok(())
        }
    }
}
