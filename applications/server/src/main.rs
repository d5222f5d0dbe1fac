/// Users Server - user CRUD service and management commands
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, process::ExitCode, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use users_server::{
    config::ServerConfig, create_app, services::database, state::AppState, TestRunner,
};
use users_storage::LocalUserStore;

#[derive(Parser)]
#[command(name = "users-server")]
#[command(about = "Users CRUD service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Drop every table and recreate the schema
    #[command(name = "recreate_db", alias = "recreate-db")]
    RecreateDb {
        /// Allow running against the production environment
        #[arg(long)]
        force: bool,
    },
    /// Insert the fixed development users
    #[command(name = "seed_db", alias = "seed-db")]
    SeedDb,
    /// Run the test suite
    Test,
    /// Run the test suite with coverage reporting
    Cov,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "users_server=info,users_storage=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => serve().await?,
        Commands::RecreateDb { force } => recreate_db(force).await?,
        Commands::SeedDb => seed_db().await?,
        Commands::Test => return Ok(ExitCode::from(TestRunner::from_env()?.run_tests().await?)),
        Commands::Cov => return Ok(ExitCode::from(TestRunner::from_env()?.run_coverage().await?)),
    }

    Ok(ExitCode::SUCCESS)
}

async fn serve() -> anyhow::Result<()> {
    let config = load_config()?;

    tracing::info!("Starting Users Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let pool = database::open_migrated_pool(&config).await?;
    tracing::info!("Database connected");

    let app_state = AppState::new(Arc::new(LocalUserStore::new(pool)));
    let app = create_app(app_state, &config);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn recreate_db(force: bool) -> anyhow::Result<()> {
    let config = load_config()?;
    database::recreate_db(&config, force).await?;
    Ok(())
}

async fn seed_db() -> anyhow::Result<()> {
    let config = load_config()?;
    let users = database::seed_db(&config).await?;

    for user in users {
        println!("  {} - {} <{}>", user.id, user.username, user.email);
    }

    Ok(())
}

fn load_config() -> anyhow::Result<ServerConfig> {
    let config = ServerConfig::load()?;
    config.validate()?;
    Ok(config)
}
