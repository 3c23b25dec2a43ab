use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;

/// Campus keeps the roster of a school district (schools, their
/// administrators, teachers, courses and enrolled students) in one SQLite
/// file and serves it as a JSON REST API.
#[derive(Parser)]
#[command(name = "campus", version)]
struct Cli {
    /// Campus configuration file (written by `campus init`)
    #[arg(long, default_value = "campus.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Create the data directory, a default campus.toml and an empty roster database
    Init {
        /// Directory that will hold campus.toml and campus.db
        #[arg(long, default_value = "/var/lib/campus")]
        data_dir: String,
    },
    /// Print course, administrator, teacher and student counts for every school
    Status,
    /// Serve the roster API (/api/schools, /api/students, /api/transfer, ...)
    Serve {
        /// Listen address, overriding `server.bind_address`
        #[arg(long)]
        bind: Option<String>,
        /// Listen port, overriding `server.port`
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { data_dir } => commands::init::run(&data_dir).await,
        Commands::Status => commands::status::run(&cli.config).await,
        Commands::Serve { bind, port } => {
            commands::serve::run(&cli.config, bind.as_deref(), port).await
        }
    }
}
