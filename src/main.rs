use clap::Parser;
use dotenvy::dotenv;
use production_catalog::{
    cli::{self, Cli},
    config::{database, settings},
    errors::Result,
};
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    dotenv().ok();

    match run().await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<String> {
    let cli = Cli::parse();
    let app_config = settings::load_config(&cli.config)?;

    let database_url =
        database::get_database_url(cli.database.as_deref(), app_config.database_url.as_deref());
    ensure_sqlite_parent_dir(&database_url)?;

    let db = database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;
    info!("Database ready");

    cli::run(cli.command, &db, &app_config).await
}

/// Creates the directory of a file-backed `SQLite` URL so `mode=rwc` can
/// create the file itself.
fn ensure_sqlite_parent_dir(database_url: &str) -> Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path.starts_with(':') {
        return Ok(());
    }
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
