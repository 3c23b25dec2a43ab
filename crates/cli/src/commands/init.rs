use std::path::Path;

use campus_core::config::{CampusConfig, CampusSection, DatabaseConfig};
use campus_core::db::DatabasePool;
use tracing::info;

/// Run the `init` command: create data directory, write default config, and set up the database.
pub async fn run(data_dir: &str) -> anyhow::Result<()> {
    let data_path = Path::new(data_dir);

    if !data_path.exists() {
        std::fs::create_dir_all(data_path)?;
        info!("Created data directory: {}", data_dir);
    }

    let db_path = data_path.join("campus.db");
    let db_path_str = db_path.to_string_lossy().to_string();

    let defaults = CampusConfig::generate_default();
    let config = CampusConfig {
        campus: CampusSection {
            data_dir: data_dir.to_string(),
            database: DatabaseConfig {
                path: Some(db_path_str.clone()),
            },
            ..defaults.campus
        },
        ..defaults
    };

    let config_path = data_path.join("campus.toml");
    let toml_str = toml::to_string_pretty(&config)?;
    std::fs::write(&config_path, &toml_str)?;
    info!("Wrote configuration to {}", config_path.display());

    let connect_str = config
        .campus
        .database
        .connect_url()
        .ok_or_else(|| anyhow::anyhow!("SQLite path not configured"))?;
    DatabasePool::new_sqlite(&connect_str).await?;
    info!("Database initialized at {}", db_path_str);

    println!("Campus initialized successfully!");
    println!("  Data directory: {}", data_dir);
    println!("  Configuration: {}", config_path.display());
    println!("  Database:      {}", db_path_str);
    println!();
    println!("Next steps:");
    println!(
        "  1. Review {} (listen address, page size)",
        config_path.display()
    );
    println!(
        "  2. Run `campus --config {} serve` to start the API",
        config_path.display()
    );

    Ok(())
}
