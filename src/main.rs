use chrono::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use reelbox::{
    create_router,
    db::{create_pool, migrate_server},
    services::TokenKeys,
    AppState, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("reelbox=debug,tower_http=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let db_pool = create_pool(&config.database_url).await?;
    migrate_server(&db_pool).await?;

    let token_keys = TokenKeys::new(
        config.jwt_secret.as_bytes(),
        Duration::days(config.token_ttl_days),
    );
    let app = create_router(AppState::new(db_pool, token_keys));

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
