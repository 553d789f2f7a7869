use clap::Subcommand;

use crate::auth::password;
use crate::cli::utils::{connect, output_success};
use crate::cli::OutputFormat;
use crate::database::models::NewUser;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Create a back-office account")]
    Add {
        #[arg(help = "Login email")]
        email: String,
        #[arg(help = "Display name")]
        name: String,
        #[arg(long, help = "Initial password")]
        password: String,
    },
}

pub async fn handle(cmd: UserCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        UserCommands::Add { email, name, password: plain } => {
            let email = email.trim().to_lowercase();
            if plain.len() < 8 {
                anyhow::bail!("Password must be at least 8 characters");
            }

            let (_, repos) = connect().await?;

            if repos.users.find_by_email(&email).await?.is_some() {
                anyhow::bail!("User '{}' already exists", email);
            }

            let user = repos
                .users
                .create(NewUser {
                    email,
                    name,
                    password_hash: password::hash_password(&plain)?,
                })
                .await?;

            output_success(
                &output_format,
                &format!("User '{}' created", user.email),
                &user,
            )
        }
    }
}
