use crate::cli::MigrateCommand;
use crate::{Config, Database};
use anyhow::Result;
use std::path::Path;

pub async fn run(config_path: &Path, command: Option<MigrateCommand>) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::open(&config.database.path)?;

    match command {
        None => {
            db.migrate()?;
            tracing::info!("Migrations complete");
        }
        Some(MigrateCommand::Status) => show_status(&db)?,
    }

    Ok(())
}

fn show_status(db: &Database) -> Result<()> {
    let statuses = db.get_migration_status()?;

    println!("{:<10} {}", "VERSION", "APPLIED");
    println!("{}", "-".repeat(40));
    for (version, applied_at) in &statuses {
        let applied = applied_at.as_deref().unwrap_or("pending");
        println!("{:<10} {}", format!("{:03}", version), applied);
    }

    let pending = statuses.iter().filter(|(_, ts)| ts.is_none()).count();
    if pending > 0 {
        println!("\n{} pending. Run `media-vault migrate` to apply.", pending);
    }

    Ok(())
}
