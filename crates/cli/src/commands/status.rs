use std::path::Path;

use campus_core::config::CampusConfig;
use campus_core::db::repository::{CampusRepository, SchoolRepository};
use campus_core::models::stats::SchoolStats;
use campus_core::stats::school_stats;
use tracing::info;

use super::open_repository;

/// Run the `status` command: show head counts for every school.
pub async fn run(config_path: &str) -> anyhow::Result<()> {
    let config = CampusConfig::load(Path::new(config_path))?;
    config.validate()?;

    info!("Loaded configuration from {}", config_path);

    let repo = open_repository(&config).await?;
    let db_size = config
        .campus
        .database
        .path
        .as_deref()
        .and_then(|path| std::fs::metadata(path).ok())
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|| "unknown".to_string());

    println!("Campus Status");
    println!("=============");
    println!("Instance: {}", config.campus.instance_name);
    println!("Database: SQLite ({})", db_size);
    println!();

    let rows = collect_stats(&repo).await?;
    if rows.is_empty() {
        println!("No schools recorded.");
        return Ok(());
    }

    println!("Schools");
    println!("-------");
    for (name, stats) in &rows {
        println!("{}", format_row(name, stats));
    }

    Ok(())
}

async fn collect_stats(repo: &dyn CampusRepository) -> anyhow::Result<Vec<(String, SchoolStats)>> {
    let mut rows = Vec::new();
    for school in repo.list_schools().await? {
        let stats = school_stats(repo, school.id).await?;
        rows.push((school.name, stats));
    }
    Ok(rows)
}

fn format_row(name: &str, stats: &SchoolStats) -> String {
    format!(
        "#{} {}: {} courses, {} admins, {} teachers, {} students",
        stats.id, name, stats.courses, stats.admins, stats.teachers, stats.students
    )
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
