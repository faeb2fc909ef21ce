use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scrabble_backend::{
    build_router,
    config::Config,
    db::{self, GameRepository, MemoryGameRepository, PgGameRepository},
    service::ScrabbleService,
    utils::letters::LetterDistribution,
    AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scrabble_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Scrabble backend server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Letter distribution: bundled table unless a file is configured
    let letters = match &config.game.letters_path {
        Some(path) => LetterDistribution::load(path)
            .await
            .with_context(|| format!("failed to load letter distribution from {}", path))?,
        None => {
            tracing::info!("Using bundled letter distribution");
            LetterDistribution::standard().clone()
        }
    };
    tracing::info!("Draw policy: {:?}", config.game.draw_policy);

    let repo: Arc<dyn GameRepository> = match &config.database {
        Some(database) => {
            // Connect to database
            let pool = db::create_pool(&database.url, database.max_connections).await?;
            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Database migrations completed");

            Arc::new(PgGameRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, games will be kept in memory only");
            Arc::new(MemoryGameRepository::new())
        }
    };

    let state = Arc::new(AppState {
        games: ScrabbleService::new(repo, Arc::new(letters), config.game.draw_policy),
    });

    let app = build_router(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
