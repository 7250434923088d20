use crate::{services::auth, Config, Database};
use anyhow::Result;
use std::path::Path;

use super::UserCommand;

pub async fn run(config_path: &Path, command: UserCommand) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::open(&config.database.path)?;
    db.migrate()?;

    match command {
        UserCommand::CreateAdmin {
            email,
            username,
            password,
        } => {
            let password = match password {
                Some(p) => p,
                None => {
                    let p = rpassword::prompt_password("Password: ")?;
                    let p_confirm = rpassword::prompt_password("Confirm password: ")?;
                    if p != p_confirm {
                        anyhow::bail!("Passwords do not match");
                    }
                    p
                }
            };

            let account = auth::create_admin_account(&db, &email, &username, &password)?;
            tracing::info!("Admin '{}' created ({})", account.username, account.id);
        }
        UserCommand::List => {
            let accounts = auth::list_accounts(&db)?;

            println!(
                "{:<36} {:<20} {:<30} {:<6}",
                "ID", "USERNAME", "EMAIL", "ADMIN"
            );
            println!("{}", "-".repeat(95));
            for account in accounts {
                println!(
                    "{:<36} {:<20} {:<30} {:<6}",
                    account.id.to_string(),
                    account.username,
                    account.email,
                    if account.is_admin() { "yes" } else { "no" }
                );
            }
        }
    }

    Ok(())
}
