use serde::Serialize;

use crate::cli::OutputFormat;
use crate::config::{self, AppConfig};
use crate::database::{DatabaseManager, Repositories};

/// JSON shape of a successful command: `{ "success": true, "message", "data" }`
#[derive(Debug, Serialize)]
pub struct CommandSuccess<'a, T: Serialize> {
    pub success: bool,
    pub message: &'a str,
    pub data: &'a T,
}

#[derive(Debug, Serialize)]
pub struct CommandFailure<'a> {
    pub success: bool,
    pub error: &'a str,
}

/// Report a finished command. `data` is the command's own result type and is
/// only printed in JSON mode.
pub fn output_success<T: Serialize>(
    output_format: &OutputFormat,
    message: &str,
    data: &T,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", success_json(message, data)?),
        OutputFormat::Text => println!("✓ {}", message),
    }
    Ok(())
}

pub fn output_error(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", failure_json(message)?),
        OutputFormat::Text => eprintln!("Error: {}", message),
    }
    Ok(())
}

fn success_json<T: Serialize>(message: &str, data: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&CommandSuccess {
        success: true,
        message,
        data,
    })
}

fn failure_json(message: &str) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&CommandFailure {
        success: false,
        error: message,
    })
}

/// Load configuration and open the Postgres-backed repositories
pub async fn connect() -> anyhow::Result<(&'static AppConfig, Repositories)> {
    let config = config::init()?;
    let pool = DatabaseManager::connect(&config.database).await?;
    Ok((config, Repositories::postgres(pool)))
}
