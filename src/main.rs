use std::sync::Arc;

use tracing::{error, info};

use filedesk::web::WebServer;
use filedesk::{Config, Database, FileService};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = filedesk::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        filedesk::logging::init_console_only(&config.logging.level);
    }

    info!("filedesk - file management backend");

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> filedesk::Result<()> {
    let db = Arc::new(Database::connect(&config.database).await?);
    db.migrate().await?;

    let files = FileService::from_config(db.clone(), &config.files)?;
    let server = WebServer::new(&config.server, files)?;
    info!("Server configured on {}", server.addr());

    let served = server.run().await;
    db.close().await;
    info!("Database pool closed");
    served?;
    Ok(())
}
